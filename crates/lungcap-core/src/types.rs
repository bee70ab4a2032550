//! Typed rows and categorical levels of the lung capacity dataset

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column names of the input file
pub mod columns {
    pub const LUNG_CAP: &str = "LungCap";
    pub const AGE: &str = "Age";
    pub const HEIGHT: &str = "Height";
    pub const SMOKE: &str = "Smoke";
    pub const GENDER: &str = "Gender";
    pub const CAESAREAN: &str = "Caesarean";

    /// Incidental index column written by some exporters
    pub const INDEX: &str = "Unnamed: 0";

    /// All columns a retained row must have
    pub const REQUIRED: [&str; 6] = [LUNG_CAP, AGE, HEIGHT, SMOKE, GENDER, CAESAREAN];
}

/// A two-level categorical variable with a fixed reference level
pub trait Level: Copy + Eq + fmt::Display + 'static {
    /// All levels in canonical (alphabetical) order; the first is the reference
    const LEVELS: [Self; 2];

    /// Canonical Title Case label
    fn label(&self) -> &'static str;

    /// Reference level used when encoding indicators
    fn reference() -> Self {
        Self::LEVELS[0]
    }

    /// Whether this is the non-reference level
    fn is_indicator(&self) -> bool {
        *self != Self::reference()
    }
}

/// Gender of the subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Level for Gender {
    const LEVELS: [Self; 2] = [Self::Female, Self::Male];

    fn label(&self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Yes/No answer (smoking status, caesarean birth)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum YesNo {
    No,
    Yes,
}

impl Level for YesNo {
    const LEVELS: [Self; 2] = [Self::No, Self::Yes];

    fn label(&self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes",
        }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// A canonicalized row whose fields may still be missing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Record {
    pub lung_cap: Option<f64>,
    pub age: Option<f64>,
    pub height: Option<f64>,
    pub smoke: Option<YesNo>,
    pub gender: Option<Gender>,
    pub caesarean: Option<YesNo>,
}

impl Record {
    /// Convert into a complete row, or `None` if any required field is missing
    pub fn complete(&self) -> Option<Subject> {
        Some(Subject {
            lung_cap: self.lung_cap?,
            age: self.age?,
            height: self.height?,
            smoke: self.smoke?,
            gender: self.gender?,
            caesarean: self.caesarean?,
        })
    }
}

/// A complete row of the normalized dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub lung_cap: f64,
    pub age: f64,
    pub height: f64,
    pub smoke: YesNo,
    pub gender: Gender,
    pub caesarean: YesNo,
}

impl From<Subject> for Record {
    fn from(s: Subject) -> Self {
        Self {
            lung_cap: Some(s.lung_cap),
            age: Some(s.age),
            height: Some(s.height),
            smoke: Some(s.smoke),
            gender: Some(s.gender),
            caesarean: Some(s.caesarean),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_levels() {
        assert_eq!(Gender::reference(), Gender::Female);
        assert_eq!(YesNo::reference(), YesNo::No);
        assert!(Gender::Male.is_indicator());
        assert!(!YesNo::No.is_indicator());
    }

    #[test]
    fn test_labels_are_title_case() {
        assert_eq!(Gender::Male.to_string(), "Male");
        assert_eq!(Gender::Female.to_string(), "Female");
        assert_eq!(YesNo::Yes.to_string(), "Yes");
        assert_eq!(YesNo::No.to_string(), "No");
    }

    #[test]
    fn test_record_completion() {
        let mut record = Record {
            lung_cap: Some(7.2),
            age: Some(10.0),
            height: Some(60.1),
            smoke: Some(YesNo::No),
            gender: Some(Gender::Male),
            caesarean: None,
        };
        assert!(record.complete().is_none());

        record.caesarean = Some(YesNo::Yes);
        let subject = record.complete().unwrap();
        assert_eq!(subject.caesarean, YesNo::Yes);
        assert_eq!(Record::from(subject), record);
    }
}
