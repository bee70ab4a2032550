//! Squared age term and the reduced-versus-full model comparison

use super::ols_summary;
use crate::{load_dataset, AnalysisConfig, Report, Result};
use lungcap_core::Error;
use lungcap_regression::{compare_nested, fit_ols, FittedModel, Formula, NestedComparison};
use tracing::instrument;

const SQUARED_TERM: &str = "I(Age**2)";

/// Likelihood-ratio summary line under the ANOVA table
pub fn lr_line(cmp: &NestedComparison) -> String {
    format!(
        "Likelihood-ratio test: LR statistic = {:.3}, df = {:.0}, p-value = {:.3}",
        cmp.lr_statistic, cmp.df_diff, cmp.lr_p_value
    )
}

#[instrument(skip_all, fields(path = %config.data_path.display()))]
pub fn run(config: &AnalysisConfig) -> Result<Report> {
    let data = load_dataset(config)?;
    let mut report = Report::new();

    let polynomial = fit_ols(&Formula::polynomial(), &data)?;
    let squared = polynomial
        .coefficient(SQUARED_TERM)
        .ok_or_else(|| Error::Computation(format!("{SQUARED_TERM} missing from the polynomial fit")))?;
    report.section(format!(
        "--- Results for Polynomial Model (Check p-value for {SQUARED_TERM}) ---\n\
         {SQUARED_TERM}: coef = {:.3e}, t = {:.3}, p-value = {:.3}\n\n{}",
        squared.estimate,
        squared.statistic,
        squared.p_value,
        ols_summary(&polynomial, config.confidence_level)?
    ));

    let reduced = fit_ols(&Formula::reduced(), &data)?;
    let full = fit_ols(&Formula::base(), &data)?;
    let cmp = compare_nested(&reduced, &full)?;
    report.section(format!(
        "--- Results for Likelihood-Ratio Test ---\n\
         Reduced: {}\nFull:    {}\n\n{cmp}\n\n{}",
        reduced.formula().describe(),
        full.formula().describe(),
        lr_line(&cmp)
    ));
    Ok(report)
}
