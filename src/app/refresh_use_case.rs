use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{info, instrument, warn};

use crate::apis::cyberdefenders::map_lab_record;
use crate::app::ports::PageFetcher;
use crate::error::{FailureStage, RefreshError, Result};
use crate::infra::metadata_writer::write_metadata;
use crate::observability::metrics::refresh as refresh_metrics;
use crate::parser::extract_embedded_json;
use crate::types::{CatalogEntry, EntryOutcome, LabRecord, LabsMetadata};

/// Run one catalog entry through fetch, extract and map. Never fails the run:
/// every problem ends up as the outcome's error.
#[instrument(skip(fetcher, entry), fields(lab = %entry.name, platform = %entry.platform))]
pub async fn refresh_entry(
    fetcher: &dyn PageFetcher,
    entry: &CatalogEntry,
    script_id: &str,
) -> EntryOutcome {
    let url = entry.url();
    let started = Instant::now();
    let fetched = fetcher.fetch(&url).await;
    refresh_metrics::fetch_duration(started.elapsed().as_secs_f64());

    let result = fetched
        .and_then(|html| extract_embedded_json(&html, script_id))
        .and_then(|document| map_lab_record(&document));

    match result {
        Ok(record) => EntryOutcome::updated(&entry.name, record),
        Err(e) => EntryOutcome::skipped(&entry.name, e),
    }
}

/// Per-run tallies reported back to the caller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshSummary {
    pub total: usize,
    pub updated: usize,
    pub skipped: usize,
    /// (lab name, reason) for every skipped entry, in catalog order
    pub failures: Vec<(String, String)>,
}

impl RefreshSummary {
    pub fn from_outcomes(outcomes: &[EntryOutcome]) -> Self {
        let failures: Vec<(String, String)> = outcomes
            .iter()
            .filter_map(|outcome| {
                outcome
                    .result
                    .as_ref()
                    .err()
                    .map(|e| (outcome.name.clone(), e.to_string()))
            })
            .collect();
        Self {
            total: outcomes.len(),
            updated: outcomes.len() - failures.len(),
            skipped: failures.len(),
            failures,
        }
    }
}

pub struct RefreshRun {
    pub outcomes: Vec<EntryOutcome>,
    pub metadata: LabsMetadata,
    pub summary: RefreshSummary,
}

/// Sequential refresh of a whole catalog
pub struct RefreshUseCase {
    fetcher: Box<dyn PageFetcher>,
    script_id: String,
    delay: Duration,
}

impl RefreshUseCase {
    pub fn new(fetcher: Box<dyn PageFetcher>, script_id: impl Into<String>, delay: Duration) -> Self {
        Self {
            fetcher,
            script_id: script_id.into(),
            delay,
        }
    }

    /// Process entries in catalog order, one at a time, pausing `delay` between requests.
    pub async fn run(&self, catalog: &[CatalogEntry]) -> RefreshRun {
        let mut outcomes = Vec::with_capacity(catalog.len());

        for (index, entry) in catalog.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            println!("Fetching data for {}...", entry.name);
            let outcome = refresh_entry(self.fetcher.as_ref(), entry, &self.script_id).await;
            report_outcome(&outcome);
            outcomes.push(outcome);
        }

        let metadata = LabsMetadata::collect(&outcomes);
        let summary = RefreshSummary::from_outcomes(&outcomes);
        info!(
            "Refresh finished: total={} updated={} skipped={}",
            summary.total, summary.updated, summary.skipped
        );

        RefreshRun {
            outcomes,
            metadata,
            summary,
        }
    }

    /// Refresh the catalog and replace `output_path` with the result.
    /// Only a failed write is an error; per-lab failures are reported in the summary.
    pub async fn run_and_write(&self, catalog: &[CatalogEntry], output_path: &Path) -> Result<RefreshSummary> {
        let run = self.run(catalog).await;
        write_metadata(output_path, &run.metadata)?;
        println!("\n✓ Updated metadata for {} labs", run.summary.updated);
        Ok(run.summary)
    }
}

fn display_number(value: &Option<serde_json::Number>) -> String {
    value
        .as_ref()
        .map(|n| n.to_string())
        .unwrap_or_else(|| "None".to_string())
}

/// Console line for a finished entry; failures name the lab and the reason.
fn outcome_line(outcome: &EntryOutcome) -> String {
    match &outcome.result {
        Ok(LabRecord {
            rating,
            player_difficulty,
            ..
        }) => format!(
            "  ✓ Updated: rating={}, player_difficulty={}",
            display_number(rating),
            display_number(player_difficulty)
        ),
        Err(e) => format!("  ✗ Failed to fetch data for {}: {}", outcome.name, e),
    }
}

fn report_outcome(outcome: &EntryOutcome) {
    match &outcome.result {
        Ok(_) => {
            refresh_metrics::record_updated();
            info!(lab = %outcome.name, "Updated lab metadata");
        }
        Err(e) => {
            let stage: FailureStage = e.stage();
            refresh_metrics::record_skipped(stage);
            warn!(lab = %outcome.name, stage = stage.as_str(), "Skipping lab: {}", e);
        }
    }
    println!("{}", outcome_line(outcome));
}
