//! Binary target and one-hot feature encoding

use lungcap_core::{Categorical, Dataset, Error, Result};
use nalgebra::DMatrix;
use std::fmt;

/// Feature columns in design order
pub const FEATURE_NAMES: [&str; 5] = ["Age", "Height", "Smoke_Yes", "Gender_Male", "Caesarean_Yes"];

/// Lung capacity relative to the sample median
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LungCapClass {
    Low,
    High,
}

impl LungCapClass {
    pub const ALL: [Self; 2] = [Self::Low, Self::High];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Lung Cap",
            Self::High => "High Lung Cap",
        }
    }

    /// Position in confusion matrices and reports
    pub fn index(&self) -> usize {
        match self {
            Self::Low => 0,
            Self::High => 1,
        }
    }
}

impl fmt::Display for LungCapClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Features and target for every subject, in dataset order
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedData {
    /// One row per subject, columns as in [`FEATURE_NAMES`]
    pub features: DMatrix<f64>,
    pub target: Vec<LungCapClass>,
    /// Threshold used for the target
    pub median: f64,
}

impl EncodedData {
    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    /// Rows at `indices`, in that order
    pub fn select(&self, indices: &[usize]) -> (DMatrix<f64>, Vec<LungCapClass>) {
        let features = self.features.select_rows(indices);
        let target = indices.iter().map(|&i| self.target[i]).collect();
        (features, target)
    }

    pub fn class_counts(&self) -> [usize; 2] {
        self.target.iter().fold([0, 0], |mut acc, c| {
            acc[c.index()] += 1;
            acc
        })
    }
}

/// `High` when LungCap is strictly above the median
pub fn encode(data: &Dataset) -> Result<EncodedData> {
    if data.is_empty() {
        return Err(Error::InsufficientData {
            expected: 1,
            actual: 0,
        });
    }
    let median = median(&data.column(lungcap_core::Continuous::LungCap));
    let target = data
        .iter()
        .map(|s| {
            if s.lung_cap > median {
                LungCapClass::High
            } else {
                LungCapClass::Low
            }
        })
        .collect();

    let subjects = data.subjects();
    let features = DMatrix::from_fn(subjects.len(), FEATURE_NAMES.len(), |i, j| {
        let s = &subjects[i];
        match j {
            0 => s.age,
            1 => s.height,
            2 => f64::from(u8::from(Categorical::Smoke.indicator(s))),
            3 => f64::from(u8::from(Categorical::Gender.indicator(s))),
            _ => f64::from(u8::from(Categorical::Caesarean.indicator(s))),
        }
    });

    Ok(EncodedData {
        features,
        target,
        median,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lungcap_core::{Gender, Subject, YesNo};

    fn subject(lung_cap: f64, smoke: bool, male: bool) -> Subject {
        Subject {
            lung_cap,
            age: 10.0,
            height: 60.0,
            smoke: YesNo::from(smoke),
            gender: if male { Gender::Male } else { Gender::Female },
            caesarean: YesNo::No,
        }
    }

    #[test]
    fn test_median_split_is_strict() {
        let data = Dataset::new(vec![
            subject(1.0, false, false),
            subject(2.0, false, false),
            subject(3.0, false, false),
        ]);
        let enc = encode(&data).unwrap();
        assert_eq!(enc.median, 2.0);
        assert_eq!(
            enc.target,
            vec![LungCapClass::Low, LungCapClass::Low, LungCapClass::High]
        );
        assert_eq!(enc.class_counts(), [2, 1]);
    }

    #[test]
    fn test_one_hot_columns() {
        let data = Dataset::new(vec![subject(5.0, true, false), subject(6.0, false, true)]);
        let enc = encode(&data).unwrap();
        assert_eq!(enc.features.ncols(), 5);
        assert_eq!(enc.features.row(0).iter().copied().collect::<Vec<_>>(), vec![10.0, 60.0, 1.0, 0.0, 0.0]);
        assert_eq!(enc.features.row(1).iter().copied().collect::<Vec<_>>(), vec![10.0, 60.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_select_rows() {
        let data = Dataset::new(vec![subject(1.0, false, false), subject(9.0, true, true)]);
        let enc = encode(&data).unwrap();
        let (x, y) = enc.select(&[1]);
        assert_eq!(x.nrows(), 1);
        assert_eq!(y, vec![LungCapClass::High]);
    }

    #[test]
    fn test_empty_dataset() {
        assert!(encode(&Dataset::default()).is_err());
    }
}
