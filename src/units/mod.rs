//! One module per analysis; each exposes `run(&AnalysisConfig) -> Result<Report>`

pub mod classify;
pub mod explore;
pub mod linear;
pub mod quantile;
pub mod validation;

use lungcap_regression::{CovarianceType, FittedModel, OlsFit};
use lungcap_report::{coef, fixed, Table};

/// Interval bound column labels for a confidence level, e.g. `[0.025` and `0.975]`
fn bound_labels(level: f64) -> (String, String) {
    let alpha = (1.0 - level) / 2.0;
    (format!("[{alpha:.3}"), format!("{:.3}]", 1.0 - alpha))
}

/// Percentage label of a confidence level, e.g. `95`
pub(crate) fn level_label(level: f64) -> String {
    let pct = level * 100.0;
    if (pct - pct.round()).abs() < 1e-9 {
        format!("{}", pct.round())
    } else {
        format!("{pct:.1}")
    }
}

/// Classical-SE regression summary: fit statistics then one row per term
pub(crate) fn ols_summary(fit: &OlsFit, level: f64) -> crate::Result<String> {
    let stats = [
        ("Dep. Variable:", fit.formula().response().name().to_string()),
        ("Model:", "OLS".to_string()),
        ("No. Observations:", fit.n_obs().to_string()),
        ("Df Residuals:", format!("{:.0}", fit.df_resid())),
        ("Df Model:", format!("{:.0}", fit.df_model())),
        ("R-squared:", coef(fit.r_squared())),
        ("Adj. R-squared:", coef(fit.adj_r_squared())),
        ("F-statistic:", fixed(fit.f_statistic(), 2)),
        ("Prob (F-statistic):", format!("{:.3e}", fit.f_p_value()?)),
        ("Log-Likelihood:", fixed(fit.log_likelihood(), 2)),
        ("AIC:", fixed(fit.aic(), 1)),
        ("BIC:", fixed(fit.bic(), 1)),
    ];
    let mut out = format!("OLS Regression Results: {}\n", fit.formula().describe());
    for (name, value) in stats {
        out.push_str(&format!("{name:<22}{value:>14}\n"));
    }
    out.push('\n');

    let (low, high) = bound_labels(level);
    let mut table = Table::new([
        String::new(),
        "coef".to_string(),
        "std err".to_string(),
        "t".to_string(),
        "P>|t|".to_string(),
        low,
        high,
    ]);
    for c in fit.coefficients_with(CovarianceType::NonRobust, level)? {
        table.push_numeric(
            c.term,
            &[
                c.estimate,
                c.std_error,
                c.statistic,
                c.p_value,
                c.interval.lower,
                c.interval.upper,
            ],
            3,
        );
    }
    out.push_str(&table.to_string());
    Ok(out)
}
