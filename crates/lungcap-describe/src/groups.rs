//! Group membership and box-plot aggregates behind the exploratory charts

use crate::summary::{quantile_sorted, sorted_finite};
use lungcap_core::{Categorical, Dataset, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Outcome values of one level of a categorical column
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub label: &'static str,
    pub values: Vec<f64>,
}

/// Split the outcome by each level of a column, in canonical level order
pub fn outcome_groups(data: &Dataset, by: Categorical) -> Vec<Group> {
    let (reference, other) = data.split_outcome(by);
    let [ref_label, other_label] = by.levels();
    vec![
        Group {
            label: ref_label,
            values: reference,
        },
        Group {
            label: other_label,
            values: other,
        },
    ]
}

/// Five-number box summary with Tukey whiskers
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest value within 1.5 IQR below Q1
    pub whisker_low: f64,
    /// Largest value within 1.5 IQR above Q3
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn from_values(values: &[f64]) -> Result<Self> {
        let sorted = sorted_finite(values);
        let q1 = quantile_sorted(&sorted, 0.25)?;
        let median = quantile_sorted(&sorted, 0.5)?;
        let q3 = quantile_sorted(&sorted, 0.75)?;
        let fence = 1.5 * (q3 - q1);
        let (lo_fence, hi_fence) = (q1 - fence, q3 + fence);

        let inside: Vec<f64> = sorted
            .iter()
            .copied()
            .filter(|v| (lo_fence..=hi_fence).contains(v))
            .collect();
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| !(lo_fence..=hi_fence).contains(v))
            .collect();

        Ok(Self {
            q1,
            median,
            q3,
            whisker_low: inside.first().copied().unwrap_or(q1),
            whisker_high: inside.last().copied().unwrap_or(q3),
            outliers,
        })
    }
}

/// Deterministic horizontal offsets in `[-width, width]` for strip points
pub fn jitter(n: usize, width: f64, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-width..=width)).collect()
}
