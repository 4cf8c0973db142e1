//! Counters and histograms for a refresh run.
//!
//! Values go through the `metrics` facade; `init` installs a Prometheus recorder
//! whose handle renders the snapshot once the run is over.

use crate::error::FailureStage;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::fmt;

/// Enum representing all metric names recorded by the refresher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    LabsUpdated,
    LabsSkipped,
    FetchDuration,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::LabsUpdated => "labs_refresh_updated_total",
            MetricName::LabsSkipped => "labs_refresh_skipped_total",
            MetricName::FetchDuration => "labs_refresh_fetch_duration_seconds",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Install the global Prometheus recorder. Returns `None` if one is already installed.
pub fn init() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!("Metrics recorder not installed: {}", e);
            None
        }
    }
}

/// Rendered lines for this crate's metrics only, without `# TYPE` headers
pub fn snapshot(handle: &PrometheusHandle) -> Vec<String> {
    handle
        .render()
        .lines()
        .filter(|line| line.starts_with("labs_refresh_"))
        .map(str::to_string)
        .collect()
}

pub mod refresh {
    use super::{FailureStage, MetricName};

    /// Record a lab whose metadata made it into the output
    pub fn record_updated() {
        ::metrics::counter!(MetricName::LabsUpdated.as_str()).increment(1);
    }

    /// Record a skipped lab, labelled with the stage that failed
    pub fn record_skipped(stage: FailureStage) {
        ::metrics::counter!(MetricName::LabsSkipped.as_str(), "stage" => stage.as_str())
            .increment(1);
    }

    pub fn fetch_duration(duration_secs: f64) {
        ::metrics::histogram!(MetricName::FetchDuration.as_str()).record(duration_secs);
    }
}
