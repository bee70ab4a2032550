//! Common types for fitted models

use std::fmt;

/// A confidence interval with lower and upper bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    /// Lower bound of the interval
    pub lower: f64,
    /// Upper bound of the interval
    pub upper: f64,
    /// The point estimate (center of interval)
    pub estimate: f64,
    /// Confidence level (e.g., 0.95 for 95% CI)
    pub confidence_level: f64,
}

impl ConfidenceInterval {
    pub fn new(lower: f64, upper: f64, estimate: f64, confidence_level: f64) -> Self {
        Self {
            lower,
            upper,
            estimate,
            confidence_level,
        }
    }

    /// Symmetric interval `estimate ± critical * std_error`
    pub fn symmetric(estimate: f64, std_error: f64, critical: f64, confidence_level: f64) -> Self {
        let margin = critical * std_error;
        Self::new(estimate - margin, estimate + margin, estimate, confidence_level)
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}% CI: [{:.3}, {:.3}], estimate: {:.3}",
            self.confidence_level * 100.0,
            self.lower,
            self.upper,
            self.estimate
        )
    }
}

/// Covariance estimator behind reported standard errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CovarianceType {
    /// Classical `σ² (XᵀX)⁻¹`
    NonRobust,
    /// Heteroskedasticity-consistent, leverage-adjusted sandwich
    HC3,
    /// Kernel density sandwich used by quantile regression
    KernelSandwich,
}

impl CovarianceType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NonRobust => "nonrobust",
            Self::HC3 => "HC3",
            Self::KernelSandwich => "robust kernel",
        }
    }
}

/// Estimate and inference for one term of a fitted model
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficient {
    /// Raw term name, e.g. `C(Smoke)[T.Yes]`
    pub term: String,
    pub estimate: f64,
    pub std_error: f64,
    /// t statistic
    pub statistic: f64,
    pub p_value: f64,
    pub interval: ConfidenceInterval,
}

/// Read access shared by every fitted regression
pub trait FittedModel {
    /// Per-term estimates in design column order
    fn coefficients(&self) -> &[Coefficient];

    /// Rows used in the fit
    fn n_obs(&self) -> usize;

    fn residuals(&self) -> &[f64];

    fn fitted_values(&self) -> &[f64];

    /// Look up a term by raw name
    fn coefficient(&self, term: &str) -> Option<&Coefficient> {
        self.coefficients().iter().find(|c| c.term == term)
    }

    fn term_names(&self) -> Vec<&str> {
        self.coefficients().iter().map(|c| c.term.as_str()).collect()
    }
}
