//! Model formulas and design matrix construction
//!
//! A [`Formula`] is the typed equivalent of
//! `LungCap ~ Age + Height + C(Smoke) + C(Gender) + C(Caesarean)`. Each
//! categorical predictor contributes one indicator column against its
//! reference level. Columns are ordered intercept first, then categorical
//! indicators, then numeric terms, each group in formula order.

use lungcap_core::{Categorical, Continuous, Dataset, Error, Result, Subject};
use nalgebra::{DMatrix, DVector};

/// One column of a design matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term {
    Intercept,
    /// A continuous predictor entered linearly
    Linear(Continuous),
    /// A continuous predictor squared
    Squared(Continuous),
    /// Indicator of the non-reference level of a categorical predictor
    Indicator(Categorical),
}

impl Term {
    /// Encoded term name, e.g. `Age`, `I(Age**2)`, `C(Smoke)[T.Yes]`
    pub fn name(&self) -> String {
        match self {
            Self::Intercept => "Intercept".to_string(),
            Self::Linear(c) => c.name().to_string(),
            Self::Squared(c) => format!("I({}**2)", c.name()),
            Self::Indicator(c) => format!("C({})[T.{}]", c.name(), c.levels()[1]),
        }
    }

    /// Value of this column for one subject
    pub fn value(&self, subject: &Subject) -> f64 {
        match self {
            Self::Intercept => 1.0,
            Self::Linear(c) => c.value(subject),
            Self::Squared(c) => c.value(subject).powi(2),
            Self::Indicator(c) => f64::from(u8::from(c.indicator(subject))),
        }
    }

    fn is_categorical(&self) -> bool {
        matches!(self, Self::Indicator(_))
    }
}

/// Response plus ordered design terms
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    response: Continuous,
    terms: Vec<Term>,
}

impl Formula {
    /// Build from predictors in formula order; the intercept is added and
    /// indicator terms are moved ahead of numeric ones
    pub fn new(response: Continuous, predictors: &[Term]) -> Result<Self> {
        let mut seen = Vec::new();
        for term in predictors {
            if *term == Term::Intercept {
                return Err(Error::InvalidParameter(
                    "Intercept is always included and cannot be listed as a predictor".to_string(),
                ));
            }
            if seen.contains(term) {
                return Err(Error::InvalidParameter(format!(
                    "Term {} listed more than once",
                    term.name()
                )));
            }
            if matches!(term, Term::Linear(c) | Term::Squared(c) if *c == response) {
                return Err(Error::InvalidParameter(format!(
                    "Response {} cannot be a predictor",
                    response.name()
                )));
            }
            seen.push(*term);
        }
        Ok(Self::ordered(response, predictors))
    }

    fn ordered(response: Continuous, predictors: &[Term]) -> Self {
        let mut terms = vec![Term::Intercept];
        terms.extend(predictors.iter().filter(|t| t.is_categorical()));
        terms.extend(predictors.iter().filter(|t| !t.is_categorical()));
        Self { response, terms }
    }

    /// `LungCap ~ Age + Height + C(Smoke) + C(Gender) + C(Caesarean)`
    pub fn base() -> Self {
        Self::ordered(
            Continuous::LungCap,
            &[
                Term::Linear(Continuous::Age),
                Term::Linear(Continuous::Height),
                Term::Indicator(Categorical::Smoke),
                Term::Indicator(Categorical::Gender),
                Term::Indicator(Categorical::Caesarean),
            ],
        )
    }

    /// `LungCap ~ Age + Height`
    pub fn reduced() -> Self {
        Self::ordered(
            Continuous::LungCap,
            &[
                Term::Linear(Continuous::Age),
                Term::Linear(Continuous::Height),
            ],
        )
    }

    /// Base formula with `I(Age**2)` after `Age`
    pub fn polynomial() -> Self {
        Self::ordered(
            Continuous::LungCap,
            &[
                Term::Linear(Continuous::Age),
                Term::Squared(Continuous::Age),
                Term::Linear(Continuous::Height),
                Term::Indicator(Categorical::Smoke),
                Term::Indicator(Categorical::Gender),
                Term::Indicator(Categorical::Caesarean),
            ],
        )
    }

    pub fn response(&self) -> Continuous {
        self.response
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn term_names(&self) -> Vec<String> {
        self.terms.iter().map(Term::name).collect()
    }

    /// Whether every term of `other` also appears here
    pub fn nests(&self, other: &Formula) -> bool {
        self.response == other.response && other.terms.iter().all(|t| self.terms.contains(t))
    }

    /// Human-readable formula text
    pub fn describe(&self) -> String {
        let rhs: Vec<String> = self
            .terms
            .iter()
            .filter(|t| **t != Term::Intercept)
            .map(|t| match t {
                Term::Indicator(c) => c.name().to_string(),
                other => other.name(),
            })
            .collect();
        format!("{} ~ {}", self.response.name(), rhs.join(" + "))
    }

    /// Design matrix, one row per subject
    pub fn design_matrix(&self, data: &Dataset) -> DMatrix<f64> {
        let subjects = data.subjects();
        DMatrix::from_fn(subjects.len(), self.terms.len(), |i, j| {
            self.terms[j].value(&subjects[i])
        })
    }

    pub fn response_vector(&self, data: &Dataset) -> DVector<f64> {
        DVector::from_vec(data.column(self.response))
    }
}

/// Rewrite encoded indicator names into readable contrasts
///
/// Only the exact encoded names are rewritten; anything else passes through.
pub fn readable_label(term: &str) -> String {
    match term {
        "C(Smoke)[T.Yes]" => "Smoke: Yes vs No".to_string(),
        "C(Gender)[T.Male]" => "Gender: Male vs Female".to_string(),
        "C(Caesarean)[T.Yes]" => "Caesarean: Yes vs No".to_string(),
        other => other.to_string(),
    }
}
