//! Quantile regression at several quantiles with a side-by-side comparison

use super::level_label;
use crate::{load_dataset, AnalysisConfig, Report, Result};
use lungcap_regression::{
    compare_quantiles, fit_quantiles, Formula, QuantRegOptions, QuantileComparison,
};
use lungcap_report::Table;
use tracing::instrument;

/// Terms carried into the comparison table
pub const COMPARED_TERMS: [&str; 2] = ["Height", "C(Smoke)[T.Yes]"];

fn count_word(n: usize) -> String {
    match n {
        2 => "two".to_string(),
        3 => "three".to_string(),
        4 => "four".to_string(),
        5 => "five".to_string(),
        other => other.to_string(),
    }
}

/// Comparison rows keyed by term, estimates then interval bounds, 3 decimals
pub fn comparison_table(cmp: &QuantileComparison) -> Table {
    let mut table = Table::new(std::iter::once(String::new()).chain(cmp.columns()));
    for row in &cmp.rows {
        table.push_numeric(row.term.as_str(), &row.values(), 3);
    }
    table
}

#[instrument(skip_all, fields(path = %config.data_path.display()))]
pub fn run(config: &AnalysisConfig) -> Result<Report> {
    let data = load_dataset(config)?;
    let options = QuantRegOptions::default().with_confidence_level(config.confidence_level);
    let fits = fit_quantiles(&Formula::base(), &data, &config.quantiles, &options)?;
    let cmp = compare_quantiles(&fits, &COMPARED_TERMS)?;

    let mut report = Report::new();
    report.section(format!(
        "Successfully fitted all {} Quantile Regression models.",
        count_word(fits.len())
    ));
    let covariance = fits
        .first()
        .map(|fit| fit.covariance_type().name())
        .unwrap_or_default();
    report.section(format!(
        "--- Comparison of Coefficients with {}% Confidence Intervals ---\nCovariance Type: {}\n{}",
        level_label(config.confidence_level),
        covariance,
        comparison_table(&cmp)
    ));
    Ok(report)
}
