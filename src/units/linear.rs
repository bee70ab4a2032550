//! Multiple linear regression with HC3 standard errors and residual diagnostics

use super::{level_label, ols_summary};
use crate::{load_dataset, AnalysisConfig, Report, Result};
use lungcap_regression::{
    fit_ols, qq_points, readable_label, residuals_vs_fitted, CovarianceType, FittedModel,
    Formula, OlsFit, ResidualSummary,
};
use lungcap_report::{
    coef, lowess, save_chart, LowessOptions, QqChart, ReportStyle, ResidualChart, Table,
};
use std::path::PathBuf;
use tracing::{info, instrument};

/// Robust coefficient table with readable term labels
pub fn coefficient_table(fit: &OlsFit, level: f64) -> Result<Table> {
    let pct = level_label(level);
    let mut table = Table::new([
        "Term".to_string(),
        "Estimate".to_string(),
        "Std. Error (HC3)".to_string(),
        format!("{pct}% CI Low"),
        format!("{pct}% CI High"),
        "p-value".to_string(),
    ]);
    for c in fit.coefficients_with(CovarianceType::HC3, level)? {
        table.push_row([
            readable_label(&c.term),
            coef(c.estimate),
            coef(c.std_error),
            coef(c.interval.lower),
            coef(c.interval.upper),
            coef(c.p_value),
        ]);
    }
    Ok(table)
}

/// Write the Q–Q and residual-vs-fitted charts
pub fn render_diagnostics(fit: &OlsFit, config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    let style = ReportStyle::default();
    let mut paths = save_chart(
        &QqChart {
            title: "Q–Q Plot of Residuals".to_string(),
            points: qq_points(fit.residuals())?,
        },
        &config.output_dir,
        "fig_residual_qq",
        &style,
    )?;

    let points = residuals_vs_fitted(fit);
    let (fitted, residuals): (Vec<f64>, Vec<f64>) = points.iter().copied().unzip();
    let trend = lowess(&fitted, &residuals, &LowessOptions::default())?;
    paths.extend(save_chart(
        &ResidualChart {
            title: "Residuals vs Fitted".to_string(),
            points,
            trend,
        },
        &config.output_dir,
        "fig_residuals_vs_fitted",
        &style,
    )?);
    Ok(paths)
}

#[instrument(skip_all, fields(path = %config.data_path.display()))]
pub fn run(config: &AnalysisConfig) -> Result<Report> {
    let data = load_dataset(config)?;
    let formula = Formula::base();
    let fit = fit_ols(&formula, &data)?;
    let mut report = Report::new();

    report.section(format!(
        "=== Multiple Linear Regression: LungCap ~ Age + Height + Smoke + Gender + Caesarean ===\n\
         n = {}, R^2 = {:.3}, Adj. R^2 = {:.3}\n{}",
        fit.n_obs(),
        fit.r_squared(),
        fit.adj_r_squared(),
        coefficient_table(&fit, config.confidence_level)?
    ));
    report.section(format!(
        "--- Full OLS summary (classical SEs) ---\n\n{}",
        ols_summary(&fit, config.confidence_level)?
    ));

    let resid = ResidualSummary::of(&fit);
    report.section(format!(
        "--- Residuals ---\ncount = {}, sum = {:.3e}, min = {:.3}, max = {:.3}",
        resid.count, resid.sum, resid.min, resid.max
    ));

    if config.render_charts {
        let paths = render_diagnostics(&fit, config)?;
        info!(charts = paths.len(), "diagnostic charts written");
        report.add_charts(paths);
    }
    Ok(report)
}
