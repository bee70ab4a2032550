//! Nested model comparison: ANOVA F test and likelihood ratio

use crate::ols::OlsFit;
use crate::types::FittedModel;
use lungcap_core::inference::{chi2_upper_p, f_upper_p};
use lungcap_core::{Error, Result};
use std::fmt;
use tracing::instrument;

/// One row of the ANOVA table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnovaRow {
    pub df_resid: f64,
    pub ssr: f64,
}

/// Comparison of a reduced model against a full model that nests it
#[derive(Debug, Clone, PartialEq)]
pub struct NestedComparison {
    pub reduced: AnovaRow,
    pub full: AnovaRow,
    /// Number of extra parameters in the full model
    pub df_diff: f64,
    /// Reduction in residual sum of squares
    pub ss_diff: f64,
    pub f_statistic: f64,
    pub f_p_value: f64,
    /// `n ln(ssr_reduced / ssr_full)`
    pub lr_statistic: f64,
    pub lr_p_value: f64,
}

/// Compare two OLS fits made on the same rows
#[instrument(skip_all)]
pub fn compare_nested(reduced: &OlsFit, full: &OlsFit) -> Result<NestedComparison> {
    if reduced.n_obs() != full.n_obs() {
        return Err(Error::SampleSizeMismatch {
            reduced: reduced.n_obs(),
            full: full.n_obs(),
        });
    }
    if !full.formula().nests(reduced.formula()) || full.n_params() <= reduced.n_params() {
        return Err(Error::InvalidParameter(format!(
            "'{}' does not nest '{}'",
            full.formula().describe(),
            reduced.formula().describe()
        )));
    }

    let df_diff = (full.n_params() - reduced.n_params()) as f64;
    let ss_diff = reduced.ssr() - full.ssr();
    let f_statistic = (ss_diff / df_diff) / (full.ssr() / full.df_resid());
    let lr_statistic = full.n_obs() as f64 * (reduced.ssr() / full.ssr()).ln();

    Ok(NestedComparison {
        reduced: AnovaRow {
            df_resid: reduced.df_resid(),
            ssr: reduced.ssr(),
        },
        full: AnovaRow {
            df_resid: full.df_resid(),
            ssr: full.ssr(),
        },
        df_diff,
        ss_diff,
        f_statistic,
        f_p_value: f_upper_p(f_statistic, df_diff, full.df_resid())?,
        lr_statistic,
        lr_p_value: chi2_upper_p(lr_statistic, df_diff)?,
    })
}

impl fmt::Display for NestedComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>10} {:>12} {:>8} {:>12} {:>10} {:>10}",
            "df_resid", "ssr", "df_diff", "ss_diff", "F", "Pr(>F)"
        )?;
        writeln!(
            f,
            "{:>10.1} {:>12.3} {:>8.1} {:>12} {:>10} {:>10}",
            self.reduced.df_resid, self.reduced.ssr, 0.0, "NaN", "NaN", "NaN"
        )?;
        write!(
            f,
            "{:>10.1} {:>12.3} {:>8.1} {:>12.3} {:>10.3} {:>10.3}",
            self.full.df_resid,
            self.full.ssr,
            self.df_diff,
            self.ss_diff,
            self.f_statistic,
            self.f_p_value
        )
    }
}
