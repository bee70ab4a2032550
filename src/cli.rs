//! Shared entry point for the analysis binaries

use crate::{AnalysisConfig, Report};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Log to stderr at `warn` unless `RUST_LOG` says otherwise
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_with(
    unit: fn(&AnalysisConfig) -> crate::Result<Report>,
    config: &AnalysisConfig,
) -> anyhow::Result<Report> {
    debug!(config = %serde_json::to_string(config)?, "effective configuration");
    Ok(unit(config)?)
}

/// Run one unit with the default configuration, print its report and map
/// failure to exit code 1
pub fn execute(unit: fn(&AnalysisConfig) -> crate::Result<Report>) -> ExitCode {
    init_logging();
    match run_with(unit, &AnalysisConfig::default()) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "analysis failed");
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
