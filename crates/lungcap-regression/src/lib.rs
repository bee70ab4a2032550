//! Regression models for lung capacity
//!
//! - **OLS**: [`fit_ols`] with classical and HC3 covariance ([`CovarianceType`])
//! - **Nested tests**: [`compare_nested`] gives the ANOVA F test and the
//!   likelihood-ratio statistic for a reduced model inside a full one
//! - **Quantile regression**: [`fit_quantile`] / [`fit_quantiles`] by IRLS
//!   with kernel sandwich standard errors, and [`compare_quantiles`] for the
//!   side-by-side table
//! - **Diagnostics**: Q–Q points and residual/fitted pairs
//!
//! Models are described by a [`Formula`] whose design columns follow the
//! usual treatment coding: intercept, categorical indicators, then numeric
//! terms.
//!
//! # Example
//!
//! ```rust
//! use lungcap_core::{Dataset, Gender, Subject, YesNo};
//! use lungcap_regression::{fit_ols, CovarianceType, FittedModel, Formula};
//!
//! let subjects = (0..20)
//!     .map(|i| Subject {
//!         lung_cap: 2.0 + 0.3 * i as f64 + (i % 3) as f64 * 0.1,
//!         age: 5.0 + i as f64,
//!         height: 50.0 + (i * 7 % 11) as f64,
//!         smoke: YesNo::from(i % 4 == 0),
//!         gender: if i % 2 == 0 { Gender::Male } else { Gender::Female },
//!         caesarean: YesNo::from(i % 5 == 2),
//!     })
//!     .collect();
//! let data = Dataset::new(subjects);
//!
//! let fit = fit_ols(&Formula::base(), &data).unwrap();
//! assert_eq!(fit.coefficients().len(), 6);
//! let robust = fit.coefficients_with(CovarianceType::HC3, 0.95).unwrap();
//! assert!(robust.iter().all(|c| c.std_error > 0.0));
//! ```

mod diagnostics;
mod formula;
mod nested;
mod ols;
mod quantreg;
mod types;

pub use diagnostics::{qq_points, residuals_vs_fitted, QqPoints, ResidualSummary};
pub use formula::{readable_label, Formula, Term};
pub use nested::{compare_nested, AnovaRow, NestedComparison};
pub use ols::{fit_ols, OlsFit};
pub use quantreg::{
    compare_quantiles, fit_quantile, fit_quantiles, hall_sheather, quantile_column,
    ComparisonRow, QuantRegOptions, QuantileComparison, QuantileFit,
};
pub use types::{Coefficient, ConfidenceInterval, CovarianceType, FittedModel};
