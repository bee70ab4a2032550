//! Per-column summaries of continuous variables

use lungcap_core::{Continuous, Error, RecordTable, Result};
use statrs::statistics::Statistics;

/// Quantile of sorted data by linear interpolation between order statistics
///
/// Position `p * (n - 1)`; matches the default of most dataframe libraries.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Result<f64> {
    if sorted.is_empty() {
        return Err(Error::InsufficientData {
            expected: 1,
            actual: 0,
        });
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::InvalidParameter(format!(
            "Quantile {p} must be in [0, 1]"
        )));
    }

    let h = p * (sorted.len() - 1) as f64;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    Ok(sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo]))
}

/// Sort a copy of the data, NaN excluded
pub fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Count, mean, SD, min, quartiles and max of one column
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl ContinuousSummary {
    /// Summarize non-missing values
    pub fn from_values(name: impl Into<String>, values: &[f64]) -> Result<Self> {
        let sorted = sorted_finite(values);
        let count = sorted.len();
        if count == 0 {
            return Err(Error::InsufficientData {
                expected: 1,
                actual: 0,
            });
        }

        Ok(Self {
            name: name.into(),
            count,
            mean: sorted.iter().mean(),
            std_dev: if count > 1 { sorted.iter().std_dev() } else { f64::NAN },
            min: sorted[0],
            q1: quantile_sorted(&sorted, 0.25)?,
            median: quantile_sorted(&sorted, 0.5)?,
            q3: quantile_sorted(&sorted, 0.75)?,
            max: sorted[count - 1],
        })
    }

    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Summaries of LungCap, Age and Height over every row where the value is present
pub fn describe_continuous(records: &RecordTable) -> Result<Vec<ContinuousSummary>> {
    Continuous::ALL
        .iter()
        .map(|&column| {
            let values: Vec<f64> = records
                .records()
                .iter()
                .filter_map(|r| match column {
                    Continuous::LungCap => r.lung_cap,
                    Continuous::Age => r.age,
                    Continuous::Height => r.height,
                })
                .collect();
            ContinuousSummary::from_values(column.name(), &values)
        })
        .collect()
}
