//! Reference distributions for p-values and critical values

use crate::{Error, Result};
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, Normal, StudentsT};

fn students_t(df: f64) -> Result<StudentsT> {
    StudentsT::new(0.0, 1.0, df)
        .map_err(|e| Error::Computation(format!("Failed to create t-distribution: {e}")))
}

fn standard_normal() -> Result<Normal> {
    Normal::new(0.0, 1.0)
        .map_err(|e| Error::Computation(format!("Failed to create normal distribution: {e}")))
}

/// Two-sided p-value of a t statistic
pub fn t_two_sided_p(t: f64, df: f64) -> Result<f64> {
    if !t.is_finite() {
        return Err(Error::non_finite("t statistic"));
    }
    Ok((2.0 * students_t(df)?.cdf(-t.abs())).min(1.0))
}

/// Critical value `t` such that `P(|T| <= t) = level`
pub fn t_critical(level: f64, df: f64) -> Result<f64> {
    if !(level > 0.0 && level < 1.0) {
        return Err(Error::invalid_probability("Confidence level", level));
    }
    Ok(students_t(df)?.inverse_cdf(1.0 - (1.0 - level) / 2.0))
}

/// Two-sided p-value of a standard normal statistic
pub fn normal_two_sided_p(z: f64) -> Result<f64> {
    Ok((2.0 * standard_normal()?.cdf(-z.abs())).min(1.0))
}

/// Standard normal quantile function
pub fn normal_quantile(p: f64) -> Result<f64> {
    if !(p > 0.0 && p < 1.0) {
        return Err(Error::invalid_probability("Probability", p));
    }
    Ok(standard_normal()?.inverse_cdf(p))
}

/// Standard normal density
pub fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * std::f64::consts::PI).sqrt()
}

/// Upper tail probability of an F statistic
pub fn f_upper_p(f: f64, df_num: f64, df_den: f64) -> Result<f64> {
    let dist = FisherSnedecor::new(df_num, df_den)
        .map_err(|e| Error::Computation(format!("Failed to create F distribution: {e}")))?;
    Ok(dist.sf(f).clamp(0.0, 1.0))
}

/// Upper tail probability of a chi-squared statistic
pub fn chi2_upper_p(x: f64, df: f64) -> Result<f64> {
    let dist = ChiSquared::new(df)
        .map_err(|e| Error::Computation(format!("Failed to create chi-squared distribution: {e}")))?;
    Ok(dist.sf(x).clamp(0.0, 1.0))
}
