//! The normalized dataset every analysis unit consumes

use crate::loader::{load_csv, RawTable};
use crate::normalize::{canonicalize, RecordTable};
use crate::types::{columns, Gender, Subject, YesNo};
use crate::Result;
use std::path::Path;

/// Continuous columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Continuous {
    LungCap,
    Age,
    Height,
}

impl Continuous {
    pub const ALL: [Self; 3] = [Self::LungCap, Self::Age, Self::Height];

    pub fn name(&self) -> &'static str {
        match self {
            Self::LungCap => columns::LUNG_CAP,
            Self::Age => columns::AGE,
            Self::Height => columns::HEIGHT,
        }
    }

    pub fn value(&self, subject: &Subject) -> f64 {
        match self {
            Self::LungCap => subject.lung_cap,
            Self::Age => subject.age,
            Self::Height => subject.height,
        }
    }
}

/// Two-level categorical columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Categorical {
    Smoke,
    Gender,
    Caesarean,
}

impl Categorical {
    pub const ALL: [Self; 3] = [Self::Smoke, Self::Gender, Self::Caesarean];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Smoke => columns::SMOKE,
            Self::Gender => columns::GENDER,
            Self::Caesarean => columns::CAESAREAN,
        }
    }

    /// Canonical labels, reference level first
    pub fn levels(&self) -> [&'static str; 2] {
        match self {
            Self::Gender => ["Female", "Male"],
            Self::Smoke | Self::Caesarean => ["No", "Yes"],
        }
    }

    /// Whether the subject carries the non-reference level
    pub fn indicator(&self, subject: &Subject) -> bool {
        match self {
            Self::Smoke => subject.smoke == YesNo::Yes,
            Self::Gender => subject.gender == Gender::Male,
            Self::Caesarean => subject.caesarean == YesNo::Yes,
        }
    }

    /// Canonical label of the subject's level
    pub fn label(&self, subject: &Subject) -> &'static str {
        self.levels()[usize::from(self.indicator(subject))]
    }
}

/// Complete, canonical rows in input order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    subjects: Vec<Subject>,
}

impl Dataset {
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }

    /// Load and normalize a CSV file in one step
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(canonicalize(&load_csv(path)?)?.complete_cases())
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Subject> {
        self.subjects.iter()
    }

    /// Values of one continuous column
    pub fn column(&self, column: Continuous) -> Vec<f64> {
        self.subjects.iter().map(|s| column.value(s)).collect()
    }

    /// Outcome values split by a categorical column: (reference level, other level)
    pub fn split_outcome(&self, by: Categorical) -> (Vec<f64>, Vec<f64>) {
        self.subjects
            .iter()
            .fold((Vec::new(), Vec::new()), |(mut reference, mut other), s| {
                if by.indicator(s) {
                    other.push(s.lung_cap);
                } else {
                    reference.push(s.lung_cap);
                }
                (reference, other)
            })
    }

    /// Write the dataset back out with canonical labels
    pub fn to_raw_table(&self) -> RawTable {
        let headers = columns::REQUIRED.iter().map(|c| c.to_string()).collect();
        let rows = self
            .subjects
            .iter()
            .map(|s| {
                vec![
                    s.lung_cap.to_string(),
                    s.age.to_string(),
                    s.height.to_string(),
                    s.smoke.to_string(),
                    s.gender.to_string(),
                    s.caesarean.to_string(),
                ]
            })
            .collect();
        // REQUIRED has six entries and every row has six cells
        RawTable::new(headers, rows).unwrap_or_default()
    }
}

impl From<RecordTable> for Dataset {
    fn from(records: RecordTable) -> Self {
        records.complete_cases()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Subject;
    type IntoIter = std::slice::Iter<'a, Subject>;

    fn into_iter(self) -> Self::IntoIter {
        self.subjects.iter()
    }
}
