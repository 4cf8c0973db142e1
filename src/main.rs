use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use labs_metadata::app::refresh_use_case::RefreshUseCase;
use labs_metadata::config::Config;
use labs_metadata::constants;
use labs_metadata::infra::http_client::ReqwestHttp;
use labs_metadata::logging;
use labs_metadata::observability;

#[derive(Parser)]
#[command(name = "labs_metadata")]
#[command(about = "Refresh training lab ratings, tactics and categories")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Catalog of labs to refresh (TOML)
    #[arg(long, default_value = constants::DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,

    /// Where to write the metadata JSON (overrides the catalog's fetch.output_path)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Seconds to wait between labs
    #[arg(long)]
    delay_secs: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init_logging();
    let metrics_handle = observability::metrics::init();

    let mut config = Config::load(&cli.catalog)
        .with_context(|| format!("loading catalog {}", cli.catalog.display()))?;
    if let Some(output) = cli.output {
        config.fetch.output_path = output;
    }
    if let Some(delay) = cli.delay_secs {
        config.fetch.delay_seconds = delay;
    }
    if let Some(timeout) = cli.timeout_secs {
        config.fetch.timeout_seconds = timeout;
    }
    info!(
        "Refreshing {} labs from {} into {}",
        config.labs.len(),
        cli.catalog.display(),
        config.fetch.output_path.display()
    );

    let fetcher = ReqwestHttp::new(config.fetch.timeout()).context("building HTTP client")?;
    let use_case = RefreshUseCase::new(
        Box::new(fetcher),
        config.fetch.script_id.clone(),
        config.fetch.delay(),
    );

    let result = use_case
        .run_and_write(&config.labs, &config.fetch.output_path)
        .await;

    if let Some(handle) = &metrics_handle {
        for line in observability::metrics::snapshot(handle) {
            info!("metric {}", line);
        }
    }

    match result {
        Ok(summary) => {
            info!("Updated {}/{} labs", summary.updated, summary.total);
            Ok(())
        }
        Err(e) => {
            error!("Failed to write {}: {}", config.fetch.output_path.display(), e);
            Err(e).with_context(|| format!("writing {}", config.fetch.output_path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_bad_arguments_rejected_by_parser() {
        let err = Cli::try_parse_from(["labs_metadata", "--timeout-secs", "0"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);

        let err = Cli::try_parse_from(["labs_metadata", "--help"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_no_arguments_uses_default_catalog() {
        let cli = Cli::try_parse_from(["labs_metadata"]).unwrap();
        assert_eq!(cli.catalog, PathBuf::from("config/labs.toml"));
        assert!(cli.output.is_none());
    }
}
