//! Chi-squared test of independence on a contingency table

use crate::types::{TestKind, TestResult};
use lungcap_core::inference::chi2_upper_p;
use lungcap_core::{Categorical, Dataset, Error, Result};
use tracing::warn;

/// Conventional lower bound on expected cell counts
pub const MIN_EXPECTED_FREQUENCY: f64 = 5.0;

/// Observed counts with labelled rows and columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContingencyTable {
    row_labels: Vec<String>,
    column_labels: Vec<String>,
    counts: Vec<Vec<usize>>,
}

impl ContingencyTable {
    pub fn new(
        row_labels: Vec<String>,
        column_labels: Vec<String>,
        counts: Vec<Vec<usize>>,
    ) -> Result<Self> {
        if counts.len() != row_labels.len() {
            return Err(Error::size_mismatch(row_labels.len(), counts.len(), "contingency rows"));
        }
        if let Some(row) = counts.iter().find(|r| r.len() != column_labels.len()) {
            return Err(Error::size_mismatch(
                column_labels.len(),
                row.len(),
                "contingency columns",
            ));
        }
        if row_labels.len() < 2 || column_labels.len() < 2 {
            return Err(Error::InvalidInput(
                "Contingency table needs at least two rows and two columns".to_string(),
            ));
        }
        Ok(Self {
            row_labels,
            column_labels,
            counts,
        })
    }

    /// Cross-classify subjects; levels appear in canonical order
    pub fn from_dataset(data: &Dataset, rows: Categorical, columns: Categorical) -> Result<Self> {
        let mut counts = vec![vec![0; 2]; 2];
        for s in data {
            counts[usize::from(rows.indicator(s))][usize::from(columns.indicator(s))] += 1;
        }
        let labels = |c: Categorical| -> Vec<String> {
            c.levels().iter().map(|l| l.to_string()).collect()
        };
        Self::new(labels(rows), labels(columns), counts)
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    pub fn counts(&self) -> &[Vec<usize>] {
        &self.counts
    }

    pub fn row_totals(&self) -> Vec<usize> {
        self.counts.iter().map(|r| r.iter().sum()).collect()
    }

    pub fn column_totals(&self) -> Vec<usize> {
        (0..self.column_labels.len())
            .map(|j| self.counts.iter().map(|r| r[j]).sum())
            .collect()
    }

    pub fn total(&self) -> usize {
        self.row_totals().iter().sum()
    }

    /// Expected counts under independence
    pub fn expected(&self) -> Vec<Vec<f64>> {
        let total = self.total() as f64;
        let cols = self.column_totals();
        self.row_totals()
            .iter()
            .map(|&r| cols.iter().map(|&c| r as f64 * c as f64 / total).collect())
            .collect()
    }

    pub fn degrees_of_freedom(&self) -> usize {
        (self.row_labels.len() - 1) * (self.column_labels.len() - 1)
    }
}

/// Outcome of [`chi_squared_independence`]
#[derive(Debug, Clone, PartialEq)]
pub struct ChiSquaredResult {
    pub statistic: f64,
    pub p_value: f64,
    pub dof: usize,
    pub expected: Vec<Vec<f64>>,
    pub min_expected: f64,
    /// Whether the Yates correction was applied
    pub corrected: bool,
}

impl ChiSquaredResult {
    /// Whether every expected count reaches `threshold`
    pub fn is_valid(&self, threshold: f64) -> bool {
        self.min_expected >= threshold
    }

    pub fn as_test_result(&self) -> TestResult {
        TestResult::new(
            TestKind::ChiSquared,
            self.statistic,
            self.p_value,
            Some(self.dof as f64),
        )
    }
}

/// Pearson test of independence; with `correction`, 1-dof tables get the
/// Yates adjustment (each `|O - E|` shrunk by at most 0.5)
pub fn chi_squared_independence(
    table: &ContingencyTable,
    correction: bool,
) -> Result<ChiSquaredResult> {
    let expected = table.expected();
    let min_expected = expected
        .iter()
        .flatten()
        .fold(f64::INFINITY, |a, &b| a.min(b));
    if !(min_expected > 0.0) {
        return Err(Error::InvalidInput(
            "A row or column of the contingency table is empty".to_string(),
        ));
    }

    let dof = table.degrees_of_freedom();
    let corrected = correction && dof == 1;
    let statistic: f64 = table
        .counts()
        .iter()
        .flatten()
        .zip(expected.iter().flatten())
        .map(|(&o, &e)| {
            let diff = (o as f64 - e).abs();
            let diff = if corrected { diff - diff.min(0.5) } else { diff };
            diff * diff / e
        })
        .sum();

    if min_expected < MIN_EXPECTED_FREQUENCY {
        warn!(min_expected, "Expected cell count below {MIN_EXPECTED_FREQUENCY}");
    }

    Ok(ChiSquaredResult {
        statistic,
        p_value: chi2_upper_p(statistic, dof as f64)?,
        dof,
        expected,
        min_expected,
        corrected,
    })
}
