//! Locally weighted scatterplot smoothing
//!
//! Thin layer over the `lowess` crate's batch adapter: tricube neighbourhood
//! weights with bisquare robustifying passes, returned as `(x, ŷ)` pairs.

use lowess::prelude::{Batch, Lowess, LowessResult, RobustnessMethod, WeightFunction};

use crate::error::{Error, Result};

/// Smoother settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowessOptions {
    /// Share of points in each local neighbourhood
    pub frac: f64,
    /// Robustifying iterations after the initial fit
    pub iterations: usize,
}

impl Default for LowessOptions {
    fn default() -> Self {
        Self {
            frac: 2.0 / 3.0,
            iterations: 3,
        }
    }
}

fn into_pairs(result: LowessResult<f64>) -> Vec<(f64, f64)> {
    result.x.into_iter().zip(result.y).collect()
}

/// Smoothed `(x, ŷ)` pairs sorted by `x`
pub fn lowess(x: &[f64], y: &[f64], options: &LowessOptions) -> Result<Vec<(f64, f64)>> {
    if x.len() != y.len() {
        return Err(Error::InvalidInput(format!(
            "LOWESS inputs differ in length: {} and {}",
            x.len(),
            y.len()
        )));
    }
    if !(options.frac > 0.0 && options.frac <= 1.0) {
        return Err(Error::InvalidInput(format!(
            "LOWESS fraction {} must be in (0, 1]",
            options.frac
        )));
    }
    if x.len() < 2 {
        return Ok(x.iter().copied().zip(y.iter().copied()).collect());
    }

    let result = Lowess::<f64>::new()
        .fraction(options.frac)
        .iterations(options.iterations)
        .weight_function(WeightFunction::Tricube)
        .robustness_method(RobustnessMethod::Bisquare)
        .adapter(Batch)
        .build()
        .map_err(|e| Error::Smoothing(e.to_string()))?
        .fit(x, y)
        .map_err(|e| Error::Smoothing(e.to_string()))?;

    Ok(into_pairs(result))
}
