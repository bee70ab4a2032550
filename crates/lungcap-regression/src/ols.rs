//! Ordinary least squares with classical and HC3 covariance
//!
//! The fit solves the normal equations through a Cholesky factorization of
//! `XᵀX` after an SVD rank check, so a rank-deficient design fails with
//! [`Error::SingularMatrix`] instead of producing arbitrary estimates.

use crate::formula::Formula;
use crate::types::{Coefficient, ConfidenceInterval, CovarianceType, FittedModel};
use lungcap_core::inference::{f_upper_p, t_critical, t_two_sided_p};
use lungcap_core::{Dataset, Error, Result};
use nalgebra::{DMatrix, DVector};
use tracing::{debug, instrument};

/// Relative singular value threshold below which the design is rank deficient
const RANK_TOLERANCE: f64 = 1e-10;

/// Inverse of `XᵀX`, failing on rank-deficient designs
pub(crate) fn gram_inverse(x: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    let k = x.ncols();
    let singular = x.clone().svd(false, false).singular_values;
    let max_sv = singular.max();
    let rank = singular.iter().filter(|&&s| s > RANK_TOLERANCE * max_sv).count();
    if rank < k {
        return Err(Error::SingularMatrix(format!(
            "design matrix has rank {rank} but {k} columns"
        )));
    }

    x.tr_mul(x)
        .cholesky()
        .map(|c| c.inverse())
        .ok_or_else(|| Error::SingularMatrix("XᵀX is not positive definite".to_string()))
}

/// A fitted OLS model
#[derive(Debug, Clone)]
pub struct OlsFit {
    formula: Formula,
    design: DMatrix<f64>,
    params: DVector<f64>,
    xtx_inv: DMatrix<f64>,
    residuals: Vec<f64>,
    fitted: Vec<f64>,
    leverage: Vec<f64>,
    ssr: f64,
    centered_tss: f64,
    coefficients: Vec<Coefficient>,
}

/// Fit `formula` to every row of `data`
#[instrument(skip_all, fields(formula = %formula.describe(), n = data.len()))]
pub fn fit_ols(formula: &Formula, data: &Dataset) -> Result<OlsFit> {
    let x = formula.design_matrix(data);
    let y = formula.response_vector(data);
    let (n, k) = x.shape();
    if n <= k {
        return Err(Error::InsufficientData {
            expected: k + 1,
            actual: n,
        });
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(Error::non_finite("regression data"));
    }

    let xtx_inv = gram_inverse(&x)?;
    let params = &xtx_inv * x.tr_mul(&y);
    let fitted_vec = &x * &params;
    let resid_vec = &y - &fitted_vec;

    let leverage = (0..n)
        .map(|i| {
            let row = x.row(i);
            (row * &xtx_inv * row.transpose())[(0, 0)]
        })
        .collect();

    let ssr = resid_vec.norm_squared();
    let y_mean = y.mean();
    let centered_tss = y.iter().map(|v| (v - y_mean).powi(2)).sum();

    let mut fit = OlsFit {
        formula: formula.clone(),
        design: x,
        params,
        xtx_inv,
        residuals: resid_vec.iter().copied().collect(),
        fitted: fitted_vec.iter().copied().collect(),
        leverage,
        ssr,
        centered_tss,
        coefficients: Vec::new(),
    };
    fit.coefficients = fit.coefficients_with(CovarianceType::NonRobust, 0.95)?;
    debug!(r_squared = fit.r_squared(), ssr, "OLS fit complete");
    Ok(fit)
}

impl OlsFit {
    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn params(&self) -> &DVector<f64> {
        &self.params
    }

    /// Number of estimated parameters, intercept included
    pub fn n_params(&self) -> usize {
        self.params.len()
    }

    pub fn df_model(&self) -> f64 {
        (self.n_params() - 1) as f64
    }

    pub fn df_resid(&self) -> f64 {
        (self.n_obs() - self.n_params()) as f64
    }

    /// Residual sum of squares
    pub fn ssr(&self) -> f64 {
        self.ssr
    }

    /// Diagonal of the hat matrix
    pub fn leverage(&self) -> &[f64] {
        &self.leverage
    }

    pub fn r_squared(&self) -> f64 {
        1.0 - self.ssr / self.centered_tss
    }

    pub fn adj_r_squared(&self) -> f64 {
        1.0 - (self.n_obs() as f64 - 1.0) / self.df_resid() * (1.0 - self.r_squared())
    }

    /// Overall F statistic against the intercept-only model
    pub fn f_statistic(&self) -> f64 {
        let ess = self.centered_tss - self.ssr;
        (ess / self.df_model()) / (self.ssr / self.df_resid())
    }

    pub fn f_p_value(&self) -> Result<f64> {
        f_upper_p(self.f_statistic(), self.df_model(), self.df_resid())
    }

    /// Gaussian log-likelihood at the estimates
    pub fn log_likelihood(&self) -> f64 {
        let n = self.n_obs() as f64;
        -n / 2.0 * ((2.0 * std::f64::consts::PI).ln() + (self.ssr / n).ln() + 1.0)
    }

    pub fn aic(&self) -> f64 {
        -2.0 * self.log_likelihood() + 2.0 * self.n_params() as f64
    }

    pub fn bic(&self) -> f64 {
        -2.0 * self.log_likelihood() + (self.n_obs() as f64).ln() * self.n_params() as f64
    }

    /// Parameter covariance matrix
    pub fn covariance(&self, kind: CovarianceType) -> Result<DMatrix<f64>> {
        match kind {
            CovarianceType::NonRobust => Ok(&self.xtx_inv * (self.ssr / self.df_resid())),
            CovarianceType::HC3 => {
                let k = self.n_params();
                let mut meat = DMatrix::<f64>::zeros(k, k);
                for (i, (&e, &h)) in self.residuals.iter().zip(&self.leverage).enumerate() {
                    if h >= 1.0 - 1e-12 {
                        return Err(Error::Computation(format!(
                            "Observation {i} has leverage 1; HC3 is undefined"
                        )));
                    }
                    let w = (e / (1.0 - h)).powi(2);
                    let row = self.design.row(i);
                    meat += row.transpose() * row * w;
                }
                Ok(&self.xtx_inv * meat * &self.xtx_inv)
            }
            CovarianceType::KernelSandwich => Err(Error::InvalidParameter(
                "Kernel sandwich covariance applies to quantile regression only".to_string(),
            )),
        }
    }

    /// Per-term inference under the given covariance and confidence level
    pub fn coefficients_with(&self, kind: CovarianceType, level: f64) -> Result<Vec<Coefficient>> {
        let cov = self.covariance(kind)?;
        let df = self.df_resid();
        let critical = t_critical(level, df)?;

        self.formula
            .term_names()
            .into_iter()
            .enumerate()
            .map(|(j, term)| {
                let estimate = self.params[j];
                let std_error = cov[(j, j)].sqrt();
                let statistic = estimate / std_error;
                Ok(Coefficient {
                    term,
                    estimate,
                    std_error,
                    statistic,
                    p_value: t_two_sided_p(statistic, df)?,
                    interval: ConfidenceInterval::symmetric(estimate, std_error, critical, level),
                })
            })
            .collect()
    }

    /// `Xᵀe`; zero up to rounding for any least squares solution
    pub fn design_residual_products(&self) -> Vec<f64> {
        let e = DVector::from_column_slice(&self.residuals);
        self.design.tr_mul(&e).iter().copied().collect()
    }
}

impl FittedModel for OlsFit {
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lungcap_core::{Gender, Subject, YesNo};

    fn exact_data() -> Dataset {
        // LungCap = 1 + 0.5 Age exactly, Height varies independently
        let subjects = (0..12)
            .map(|i| {
                let age = 5.0 + i as f64;
                Subject {
                    lung_cap: 1.0 + 0.5 * age,
                    age,
                    height: 50.0 + ((i * 7) % 5) as f64,
                    smoke: YesNo::from(i % 3 == 0),
                    gender: if i % 2 == 0 { Gender::Male } else { Gender::Female },
                    caesarean: YesNo::from(i % 4 == 1),
                }
            })
            .collect();
        Dataset::new(subjects)
    }

    #[test]
    fn test_recovers_exact_relationship() {
        let fit = fit_ols(&Formula::reduced(), &exact_data()).unwrap();
        assert_relative_eq!(fit.params()[0], 1.0, epsilon = 1e-8);
        assert_relative_eq!(fit.params()[1], 0.5, epsilon = 1e-10);
        assert_relative_eq!(fit.params()[2], 0.0, epsilon = 1e-10);
        assert!(fit.ssr() < 1e-12);
    }

    #[test]
    fn test_singular_design_rejected() {
        // All male: the gender indicator duplicates the intercept
        let subjects: Vec<Subject> = exact_data()
            .iter()
            .map(|s| Subject {
                gender: Gender::Male,
                ..*s
            })
            .collect();
        let err = fit_ols(&Formula::base(), &Dataset::new(subjects)).unwrap_err();
        assert!(matches!(err, Error::SingularMatrix(_)));
    }

    #[test]
    fn test_too_few_rows() {
        let data = Dataset::new(exact_data().subjects()[..3].to_vec());
        assert!(matches!(
            fit_ols(&Formula::reduced(), &data),
            Err(Error::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_hc3_rejects_kernel_request() {
        let fit = fit_ols(&Formula::reduced(), &exact_data()).unwrap();
        assert!(fit.covariance(CovarianceType::KernelSandwich).is_err());
    }
}
