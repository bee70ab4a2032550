//! Residual diagnostics

use crate::types::FittedModel;
use lungcap_core::inference::normal_quantile;
use lungcap_core::{Error, Result};

/// Points of a normal Q–Q plot
#[derive(Debug, Clone, PartialEq)]
pub struct QqPoints {
    /// Standard normal quantiles at plotting positions `i / (n + 1)`
    pub theoretical: Vec<f64>,
    /// Residuals in ascending order
    pub sample: Vec<f64>,
}

impl QqPoints {
    /// Endpoints of the 45° reference line over the plotted range
    pub fn reference_line(&self) -> [(f64, f64); 2] {
        let lo = self
            .theoretical
            .iter()
            .chain(&self.sample)
            .fold(f64::INFINITY, |a, &b| a.min(b));
        let hi = self
            .theoretical
            .iter()
            .chain(&self.sample)
            .fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        [(lo, lo), (hi, hi)]
    }
}

pub fn qq_points(residuals: &[f64]) -> Result<QqPoints> {
    if residuals.is_empty() {
        return Err(Error::InsufficientData {
            expected: 1,
            actual: 0,
        });
    }
    let n = residuals.len();
    let mut sample = residuals.to_vec();
    sample.sort_by(f64::total_cmp);
    let theoretical = (1..=n)
        .map(|i| normal_quantile(i as f64 / (n + 1) as f64))
        .collect::<Result<Vec<_>>>()?;
    Ok(QqPoints {
        theoretical,
        sample,
    })
}

/// Summary checks on a fitted model's residuals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidualSummary {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl ResidualSummary {
    pub fn of(model: &impl FittedModel) -> Self {
        let r = model.residuals();
        let sum: f64 = r.iter().sum();
        Self {
            count: r.len(),
            sum,
            mean: sum / r.len() as f64,
            min: r.iter().copied().fold(f64::INFINITY, f64::min),
            max: r.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

/// `(fitted, residual)` pairs in row order
pub fn residuals_vs_fitted(model: &impl FittedModel) -> Vec<(f64, f64)> {
    model
        .fitted_values()
        .iter()
        .copied()
        .zip(model.residuals().iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_qq_positions_are_symmetric() {
        let qq = qq_points(&[0.3, -1.2, 0.0, 2.0, -0.4]).unwrap();
        assert_eq!(qq.sample, vec![-1.2, -0.4, 0.0, 0.3, 2.0]);
        assert_relative_eq!(qq.theoretical[2], 0.0, epsilon = 1e-12);
        assert_relative_eq!(qq.theoretical[0], -qq.theoretical[4], epsilon = 1e-12);
        // i/(n+1) = 1/6
        assert_relative_eq!(qq.theoretical[0], -0.967421566, epsilon = 1e-6);
    }

    #[test]
    fn test_reference_line_spans_both_axes() {
        let qq = qq_points(&[-3.0, 3.0]).unwrap();
        let [(x0, y0), (x1, y1)] = qq.reference_line();
        assert_eq!((x0, y0), (-3.0, -3.0));
        assert_eq!((x1, y1), (3.0, 3.0));
    }

    #[test]
    fn test_empty_residuals() {
        assert!(qq_points(&[]).is_err());
    }
}
