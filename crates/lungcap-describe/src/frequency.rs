//! Frequency tables for categorical columns

use lungcap_core::{Categorical, Level, Record, RecordTable};

/// Label used for absent values
pub const MISSING_LABEL: &str = "Missing";

/// One level of a frequency table
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyRow {
    pub label: String,
    pub count: usize,
    /// Share of all rows, in percent
    pub percent: f64,
}

/// Counts of each level of one categorical column, missing counted separately
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable {
    pub column: Categorical,
    pub rows: Vec<FrequencyRow>,
}

impl FrequencyTable {
    /// Tabulate a column over every record, including those with missing fields
    ///
    /// Rows are ordered by descending count; ties keep the canonical level
    /// order with `Missing` last. Levels that never occur are omitted.
    pub fn from_records(records: &RecordTable, column: Categorical) -> Self {
        let labels: Vec<Option<&'static str>> =
            records.records().iter().map(|r| label_of(r, column)).collect();
        let total = labels.len();

        let mut candidates: Vec<(String, usize)> = column
            .levels()
            .iter()
            .map(|&level| {
                let count = labels.iter().filter(|l| **l == Some(level)).count();
                (level.to_string(), count)
            })
            .collect();
        candidates.push((
            MISSING_LABEL.to_string(),
            labels.iter().filter(|l| l.is_none()).count(),
        ));

        // Stable sort keeps canonical order among ties
        candidates.sort_by(|a, b| b.1.cmp(&a.1));

        let rows = candidates
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(label, count)| FrequencyRow {
                label,
                count,
                percent: if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64 * 100.0
                },
            })
            .collect();

        Self { column, rows }
    }

    pub fn total(&self) -> usize {
        self.rows.iter().map(|r| r.count).sum()
    }

    pub fn count(&self, label: &str) -> usize {
        self.rows
            .iter()
            .find(|r| r.label == label)
            .map_or(0, |r| r.count)
    }
}

fn label_of(record: &Record, column: Categorical) -> Option<&'static str> {
    match column {
        Categorical::Smoke => record.smoke.map(|v| v.label()),
        Categorical::Gender => record.gender.map(|v| v.label()),
        Categorical::Caesarean => record.caesarean.map(|v| v.label()),
    }
}
