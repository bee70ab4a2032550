//! Lung capacity analyses
//!
//! Each unit in [`units`] loads the CSV named by an [`AnalysisConfig`],
//! normalizes it, runs one analysis and returns a printable [`Report`]:
//!
//! | unit | analysis |
//! |---|---|
//! | [`units::explore`] | sample size, summaries, frequency tables, cross-tab, exploratory charts |
//! | [`units::linear`] | OLS with HC3 errors, classical summary, residual diagnostics |
//! | [`units::validation`] | squared age term and nested model comparison |
//! | [`units::quantile`] | quantile regression at several quantiles |
//! | [`units::group_tests`] | two-sample tests by gender and smoking, chi-squared independence |
//! | [`units::classify`] | logistic classification of high lung capacity |
//!
//! The binaries under `src/bin` are thin wrappers that print the report and
//! map any error to exit code 1.
//!
//! ```rust,no_run
//! use lungcap_stats::{units, AnalysisConfig};
//!
//! let config = AnalysisConfig::default().with_charts(false);
//! let report = units::linear::run(&config).unwrap();
//! println!("{report}");
//! ```

pub mod cli;
mod error;
mod report;
pub mod units;

pub use error::{Error, Result};
pub use lungcap_core::AnalysisConfig;
pub use lungcap_report::ReportStyle;
pub use report::Report;

use lungcap_core::{canonicalize, load_csv, Dataset, RecordTable};
use tracing::info;

/// Load and canonicalize the input, keeping incomplete rows
pub fn load_records(config: &AnalysisConfig) -> Result<RecordTable> {
    config.validate()?;
    let raw = load_csv(&config.data_path)?;
    let records = canonicalize(&raw)?;
    info!(rows = records.len(), path = %config.data_path.display(), "records loaded");
    Ok(records)
}

/// Load the input and keep complete rows only
pub fn load_dataset(config: &AnalysisConfig) -> Result<Dataset> {
    Ok(load_records(config)?.complete_cases())
}
