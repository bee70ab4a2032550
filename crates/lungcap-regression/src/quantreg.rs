//! Linear quantile regression
//!
//! Estimates are found by iteratively reweighted least squares on the check
//! loss. Standard errors use the kernel sandwich
//! `(XᵀX)⁺ Xᵀ D X (XᵀX)⁺`, where `D` depends on a density estimate of the
//! residuals at zero (Epanechnikov kernel, Hall–Sheather bandwidth).
//!
//! # Example
//!
//! ```rust,no_run
//! use lungcap_core::Dataset;
//! use lungcap_regression::{fit_quantiles, Formula, QuantRegOptions};
//!
//! let data = Dataset::from_path("LungCapData.csv").unwrap();
//! let fits = fit_quantiles(&Formula::base(), &data, &[0.1, 0.5, 0.9], &QuantRegOptions::default()).unwrap();
//! assert_eq!(fits.len(), 3);
//! ```

use crate::formula::Formula;
use crate::types::{Coefficient, ConfidenceInterval, CovarianceType, FittedModel};
use lungcap_core::inference::{normal_pdf, normal_quantile, t_critical, t_two_sided_p};
use lungcap_core::{Dataset, Error, Result};
use nalgebra::{DMatrix, DVector};
use tracing::{debug, instrument, warn};

/// Residuals closer to zero than this are pushed out to it before reweighting
const RESIDUAL_FLOOR: f64 = 1e-6;
/// First iteration at which cycle detection runs
const CYCLE_CHECK_START: usize = 300;
const CYCLE_CHECK_EVERY: usize = 100;
/// How far back to look for a repeated estimate
const CYCLE_LOOKBACK: usize = 10;

/// Stopping rules for the IRLS solver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantRegOptions {
    pub max_iter: usize,
    /// Convergence threshold on the largest absolute parameter change
    pub p_tol: f64,
    /// Confidence level of the reported intervals
    pub confidence_level: f64,
}

impl Default for QuantRegOptions {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            p_tol: 1e-6,
            confidence_level: 0.95,
        }
    }
}

impl QuantRegOptions {
    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }
}

/// Moore–Penrose inverse with a cutoff relative to the largest singular value
fn pinv(m: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    let max_sv = m.clone().svd(false, false).singular_values.max();
    m.clone()
        .pseudo_inverse(1e-15 * max_sv)
        .map_err(|e| Error::Computation(format!("Pseudo-inverse failed: {e}")))
}

fn matrix_rank(m: &DMatrix<f64>) -> usize {
    let singular = m.clone().svd(false, false).singular_values;
    let max_sv = singular.max();
    let tol = max_sv * m.nrows().max(m.ncols()) as f64 * f64::EPSILON;
    singular.iter().filter(|&&s| s > tol).count()
}

/// Linear interpolation percentile of unsorted data, `p` in [0, 100]
fn percentile(values: &[f64], p: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let pos = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

fn population_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt()
}

/// Hall–Sheather bandwidth on the probability scale
pub fn hall_sheather(n: usize, q: f64) -> Result<f64> {
    let z = normal_quantile(q)?;
    let num = 1.5 * normal_pdf(z).powi(2);
    let den = 2.0 * z * z + 1.0;
    Ok((n as f64).powf(-1.0 / 3.0)
        * normal_quantile(0.975)?.powf(2.0 / 3.0)
        * (num / den).powf(1.0 / 3.0))
}

fn epanechnikov(u: f64) -> f64 {
    if u.abs() <= 1.0 {
        0.75 * (1.0 - u * u)
    } else {
        0.0
    }
}

/// A fitted quantile regression
#[derive(Debug, Clone)]
pub struct QuantileFit {
    quantile: f64,
    formula: Formula,
    params: DVector<f64>,
    coefficients: Vec<Coefficient>,
    residuals: Vec<f64>,
    fitted: Vec<f64>,
    iterations: usize,
    bandwidth: f64,
}

impl QuantileFit {
    pub fn quantile(&self) -> f64 {
        self.quantile
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn params(&self) -> &DVector<f64> {
        &self.params
    }

    /// IRLS iterations used
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Bandwidth of the residual density estimate, on the residual scale
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Estimator behind the reported standard errors
    pub fn covariance_type(&self) -> CovarianceType {
        CovarianceType::KernelSandwich
    }

    /// Predicted conditional quantile for each subject
    pub fn predict(&self, data: &Dataset) -> Vec<f64> {
        (self.formula.design_matrix(data) * &self.params)
            .iter()
            .copied()
            .collect()
    }
}

impl FittedModel for QuantileFit {
    fn coefficients(&self) -> &[Coefficient] {
        &self.coefficients
    }

    fn n_obs(&self) -> usize {
        self.residuals.len()
    }

    fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    fn fitted_values(&self) -> &[f64] {
        &self.fitted
    }
}

/// Outcome of the IRLS loop
struct Irls {
    beta: DVector<f64>,
    iterations: usize,
}

fn irls(x: &DMatrix<f64>, y: &DVector<f64>, q: f64, options: &QuantRegOptions) -> Result<Irls> {
    let k = x.ncols();
    let mut beta = DVector::from_element(k, 1.0);
    let mut xstar = x.clone();
    let mut history: Vec<DVector<f64>> = Vec::new();
    let mut diff = f64::INFINITY;
    let mut iterations = 0;

    while iterations < options.max_iter && diff > options.p_tol {
        iterations += 1;
        let beta0 = beta;
        beta = pinv(&xstar.tr_mul(x))? * xstar.tr_mul(y);

        let weights: Vec<f64> = (y - x * &beta)
            .iter()
            .map(|&r| {
                let r = match r {
                    r if r.abs() >= RESIDUAL_FLOOR => r,
                    r if r >= 0.0 => RESIDUAL_FLOOR,
                    _ => -RESIDUAL_FLOOR,
                };
                let weighted = if r < 0.0 { q * r } else { (1.0 - q) * r };
                weighted.abs()
            })
            .collect();
        xstar = DMatrix::from_fn(x.nrows(), k, |i, j| x[(i, j)] / weights[i]);

        diff = (&beta - &beta0).amax();
        history.push(beta.clone());

        if iterations >= CYCLE_CHECK_START && iterations % CYCLE_CHECK_EVERY == 0 {
            let cycled = (2..CYCLE_LOOKBACK).any(|back| history[history.len() - back] == beta);
            if cycled {
                warn!(iterations, q, "Convergence cycle detected; keeping current estimate");
                return Ok(Irls { beta, iterations });
            }
        }
    }

    if diff > options.p_tol {
        return Err(Error::NotConverged { iterations });
    }
    Ok(Irls { beta, iterations })
}

/// Fit the conditional `q` quantile of the formula's response
#[instrument(skip(formula, data, options), fields(n = data.len()))]
pub fn fit_quantile(
    formula: &Formula,
    data: &Dataset,
    q: f64,
    options: &QuantRegOptions,
) -> Result<QuantileFit> {
    if !(q > 0.0 && q < 1.0) {
        return Err(Error::invalid_probability("Quantile", q));
    }
    let x = formula.design_matrix(data);
    let y = formula.response_vector(data);
    let (n, k) = x.shape();
    if n <= k {
        return Err(Error::InsufficientData {
            expected: k + 1,
            actual: n,
        });
    }

    let Irls { beta, iterations } = irls(&x, &y, q, options)?;

    let fitted_vec = &x * &beta;
    let resid_vec = &y - &fitted_vec;
    let e: Vec<f64> = resid_vec.iter().copied().collect();

    let iqre = percentile(&e, 75.0) - percentile(&e, 25.0);
    let h_prob = hall_sheather(n, q)?;
    let scale = population_std(y.as_slice()).min(iqre / 1.34);
    let h = scale * (normal_quantile(q + h_prob)? - normal_quantile(q - h_prob)?);
    if !(h > 0.0) {
        return Err(Error::Computation(format!(
            "Degenerate kernel bandwidth {h} at quantile {q}"
        )));
    }
    let fhat0 = e.iter().map(|&r| epanechnikov(r / h)).sum::<f64>() / (n as f64 * h);
    if !(fhat0 > 0.0) {
        return Err(Error::Computation(format!(
            "Residual density at zero vanished at quantile {q}"
        )));
    }

    let d: Vec<f64> = e
        .iter()
        .map(|&r| {
            if r > 0.0 {
                (q / fhat0).powi(2)
            } else {
                ((1.0 - q) / fhat0).powi(2)
            }
        })
        .collect();
    let xtxi = pinv(&x.tr_mul(&x))?;
    let xd = DMatrix::from_fn(n, k, |i, j| x[(i, j)] * d[i]);
    let vcov = &xtxi * x.tr_mul(&xd) * &xtxi;

    let df_resid = (n - matrix_rank(&x)) as f64;
    let critical = t_critical(options.confidence_level, df_resid)?;
    let coefficients = formula
        .term_names()
        .into_iter()
        .enumerate()
        .map(|(j, term)| {
            let estimate = beta[j];
            let std_error = vcov[(j, j)].sqrt();
            let statistic = estimate / std_error;
            Ok(Coefficient {
                term,
                estimate,
                std_error,
                statistic,
                p_value: t_two_sided_p(statistic, df_resid)?,
                interval: ConfidenceInterval::symmetric(
                    estimate,
                    std_error,
                    critical,
                    options.confidence_level,
                ),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(q, iterations, bandwidth = h, "quantile fit complete");
    Ok(QuantileFit {
        quantile: q,
        formula: formula.clone(),
        params: beta,
        coefficients,
        residuals: e,
        fitted: fitted_vec.iter().copied().collect(),
        iterations,
        bandwidth: h,
    })
}

/// Fit every quantile; the first failure aborts the whole batch
pub fn fit_quantiles(
    formula: &Formula,
    data: &Dataset,
    quantiles: &[f64],
    options: &QuantRegOptions,
) -> Result<Vec<QuantileFit>> {
    quantiles
        .iter()
        .map(|&q| fit_quantile(formula, data, q, options))
        .collect()
}

/// Column label for a quantile's estimate, e.g. `Quantile_50_Median`
pub fn quantile_column(q: f64) -> String {
    let pct = (q * 100.0).round() as u32;
    if pct == 50 {
        "Quantile_50_Median".to_string()
    } else {
        format!("Quantile_{pct}")
    }
}

/// One term's estimates and interval bounds across quantiles
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub term: String,
    /// Estimate per quantile, in fit order
    pub estimates: Vec<f64>,
    /// `(low, high)` per quantile, in fit order
    pub intervals: Vec<(f64, f64)>,
}

impl ComparisonRow {
    /// Estimates followed by interval bounds, matching [`QuantileComparison::columns`]
    pub fn values(&self) -> Vec<f64> {
        self.estimates
            .iter()
            .copied()
            .chain(self.intervals.iter().flat_map(|&(lo, hi)| [lo, hi]))
            .collect()
    }
}

/// Selected terms compared across several quantile fits
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileComparison {
    pub quantiles: Vec<f64>,
    pub rows: Vec<ComparisonRow>,
}

impl QuantileComparison {
    /// Estimate columns then `CI_<pct>_low`/`CI_<pct>_high` pairs
    pub fn columns(&self) -> Vec<String> {
        let estimates = self.quantiles.iter().map(|&q| quantile_column(q));
        let bounds = self.quantiles.iter().flat_map(|&q| {
            let pct = (q * 100.0).round() as u32;
            [format!("CI_{pct}_low"), format!("CI_{pct}_high")]
        });
        estimates.chain(bounds).collect()
    }
}

/// Look up `terms` in each fit and lay them side by side
pub fn compare_quantiles(fits: &[QuantileFit], terms: &[&str]) -> Result<QuantileComparison> {
    let rows = terms
        .iter()
        .map(|&term| {
            let coefs = fits
                .iter()
                .map(|fit| {
                    fit.coefficient(term).ok_or_else(|| {
                        Error::InvalidInput(format!(
                            "Term {term} not in the q={} model",
                            fit.quantile()
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(ComparisonRow {
                term: term.to_string(),
                estimates: coefs.iter().map(|c| c.estimate).collect(),
                intervals: coefs
                    .iter()
                    .map(|c| (c.interval.lower, c.interval.upper))
                    .collect(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuantileComparison {
        quantiles: fits.iter().map(QuantileFit::quantile).collect(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hall_sheather_reference() {
        // At the median z = 0, so the bandwidth reduces to a closed form
        let h = hall_sheather(654, 0.5).unwrap();
        let expected = 654f64.powf(-1.0 / 3.0)
            * 1.959963985f64.powf(2.0 / 3.0)
            * (1.5 * normal_pdf(0.0).powi(2)).powf(1.0 / 3.0);
        assert_relative_eq!(h, expected, epsilon = 1e-8);
        assert!(hall_sheather(654, 0.0).is_err());
    }

    #[test]
    fn test_kernel_support() {
        assert_eq!(epanechnikov(0.0), 0.75);
        assert_eq!(epanechnikov(1.5), 0.0);
        assert_relative_eq!(epanechnikov(0.5), 0.5625);
    }

    #[test]
    fn test_percentile_interpolates() {
        let v = [4.0, 1.0, 3.0, 2.0];
        assert_relative_eq!(percentile(&v, 25.0), 1.75);
        assert_relative_eq!(percentile(&v, 75.0), 3.25);
    }

    #[test]
    fn test_column_names() {
        assert_eq!(quantile_column(0.1), "Quantile_10");
        assert_eq!(quantile_column(0.5), "Quantile_50_Median");
        assert_eq!(quantile_column(0.9), "Quantile_90");
        let cmp = QuantileComparison {
            quantiles: vec![0.1, 0.5, 0.9],
            rows: Vec::new(),
        };
        assert_eq!(
            cmp.columns(),
            vec![
                "Quantile_10",
                "Quantile_50_Median",
                "Quantile_90",
                "CI_10_low",
                "CI_10_high",
                "CI_50_low",
                "CI_50_high",
                "CI_90_low",
                "CI_90_high"
            ]
        );
    }

    #[test]
    fn test_row_values_order() {
        let row = ComparisonRow {
            term: "Height".to_string(),
            estimates: vec![1.0, 2.0],
            intervals: vec![(0.5, 1.5), (1.5, 2.5)],
        };
        assert_eq!(row.values(), vec![1.0, 2.0, 0.5, 1.5, 1.5, 2.5]);
    }

    #[test]
    fn test_rejects_bad_quantile() {
        let data = Dataset::default();
        let err = fit_quantile(&Formula::reduced(), &data, 1.0, &QuantRegOptions::default());
        assert!(matches!(err, Err(Error::InvalidParameter(_))));
    }
}
