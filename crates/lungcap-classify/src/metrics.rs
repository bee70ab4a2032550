//! Confusion matrix and per-class classification report

use crate::encode::LungCapClass;
use lungcap_core::{Error, Result};
use std::fmt;
use tracing::warn;

/// Counts with `High` as the positive class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfusionMatrix {
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub true_positives: usize,
}

impl ConfusionMatrix {
    pub fn from_predictions(actual: &[LungCapClass], predicted: &[LungCapClass]) -> Result<Self> {
        if actual.len() != predicted.len() {
            return Err(Error::size_mismatch(actual.len(), predicted.len(), "predictions"));
        }
        let mut cm = Self::default();
        for (a, p) in actual.iter().zip(predicted) {
            match (a, p) {
                (LungCapClass::Low, LungCapClass::Low) => cm.true_negatives += 1,
                (LungCapClass::Low, LungCapClass::High) => cm.false_positives += 1,
                (LungCapClass::High, LungCapClass::Low) => cm.false_negatives += 1,
                (LungCapClass::High, LungCapClass::High) => cm.true_positives += 1,
            }
        }
        Ok(cm)
    }

    /// `[[TN, FP], [FN, TP]]`: rows are actual classes, columns predicted
    pub fn as_array(&self) -> [[usize; 2]; 2] {
        [
            [self.true_negatives, self.false_positives],
            [self.false_negatives, self.true_positives],
        ]
    }

    pub fn total(&self) -> usize {
        self.true_negatives + self.false_positives + self.false_negatives + self.true_positives
    }

    pub fn accuracy(&self) -> f64 {
        (self.true_positives + self.true_negatives) as f64 / self.total() as f64
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [[tn, fp], [fn_, tp]] = self.as_array();
        let width = [tn, fp, fn_, tp].iter().map(|v| v.to_string().len()).max().unwrap_or(1);
        writeln!(f, "[[{tn:>width$} {fp:>width$}]")?;
        write!(f, " [{fn_:>width$} {tp:>width$}]]")
    }
}

/// Precision, recall, F1 and support for one row of the report
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Ratio with zero for an empty denominator
fn ratio(num: usize, den: usize, what: &str, label: &str) -> f64 {
    if den == 0 {
        warn!(label, "{what} is ill-defined; set to 0.0");
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Per-class metrics plus accuracy and averaged rows
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
    /// Decimal places used by `Display`
    pub digits: usize,
}

impl ClassificationReport {
    pub fn from_confusion(cm: &ConfusionMatrix) -> Self {
        let counts = cm.as_array();
        let classes: Vec<ClassMetrics> = LungCapClass::ALL
            .iter()
            .map(|class| {
                let k = class.index();
                let tp = counts[k][k];
                let predicted = counts[0][k] + counts[1][k];
                let support = counts[k][0] + counts[k][1];
                let label = class.label();
                let precision = ratio(tp, predicted, "Precision", label);
                let recall = ratio(tp, support, "Recall", label);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };
                ClassMetrics {
                    label: label.to_string(),
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect();

        let total = cm.total();
        let n_classes = classes.len() as f64;
        let average = |label: &str, weight: &dyn Fn(&ClassMetrics) -> f64| {
            let norm: f64 = classes.iter().map(|c| weight(c)).sum();
            let avg = |metric: fn(&ClassMetrics) -> f64| {
                classes.iter().map(|c| metric(c) * weight(c)).sum::<f64>() / norm
            };
            ClassMetrics {
                label: label.to_string(),
                precision: avg(|c| c.precision),
                recall: avg(|c| c.recall),
                f1: avg(|c| c.f1),
                support: total,
            }
        };
        let macro_avg = average("macro avg", &|_| 1.0 / n_classes);
        let weighted_avg = average("weighted avg", &|c| c.support as f64);

        Self {
            classes,
            accuracy: cm.accuracy(),
            macro_avg,
            weighted_avg,
            digits: 2,
        }
    }

    pub fn with_digits(mut self, digits: usize) -> Self {
        self.digits = digits;
        self
    }

    fn total_support(&self) -> usize {
        self.classes.iter().map(|c| c.support).sum()
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.digits;
        let width = self
            .classes
            .iter()
            .map(|c| c.label.len())
            .chain([self.weighted_avg.label.len(), d])
            .max()
            .unwrap_or(0);

        let row = |f: &mut fmt::Formatter<'_>, m: &ClassMetrics| {
            writeln!(
                f,
                "{:>width$}  {:>9.d$} {:>9.d$} {:>9.d$} {:>9}",
                m.label, m.precision, m.recall, m.f1, m.support
            )
        };

        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for m in &self.classes {
            row(f, m)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9.d$} {:>9}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.total_support()
        )?;
        row(f, &self.macro_avg)?;
        row(f, &self.weighted_avg)
    }
}
