//! Schema normalization: index column removal, numeric coercion, label cleanup
//!
//! Normalization never fails on bad cell values. A value that cannot be
//! coerced becomes missing and the row is dropped by
//! [`RecordTable::complete_cases`]. Only a header lacking a required column
//! is an error.

use crate::dataset::Dataset;
use crate::loader::RawTable;
use crate::types::{columns, Gender, Record, YesNo};
use crate::{Error, Result};
use tracing::{debug, info};

/// Canonicalize a yes/no label (`y`, `1`, `true` → Yes; `n`, `0`, `false` → No)
pub fn canonical_yes_no(raw: &str) -> Option<YesNo> {
    match raw.trim().to_lowercase().as_str() {
        "yes" | "y" | "1" | "true" => Some(YesNo::Yes),
        "no" | "n" | "0" | "false" => Some(YesNo::No),
        _ => None,
    }
}

/// Canonicalize a gender label (`m` → Male, `f` → Female)
pub fn canonical_gender(raw: &str) -> Option<Gender> {
    match raw.trim().to_lowercase().as_str() {
        "male" | "m" => Some(Gender::Male),
        "female" | "f" => Some(Gender::Female),
        _ => None,
    }
}

/// Coerce text to a finite number; anything else is missing
pub fn parse_numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Drop the incidental index column (`Unnamed: 0`, or an unnamed leading column)
pub fn drop_index_column(raw: &RawTable) -> RawTable {
    let keep: Vec<usize> = raw
        .headers()
        .iter()
        .enumerate()
        .filter(|(_, h)| {
            let h = h.trim();
            h != columns::INDEX && !h.is_empty()
        })
        .map(|(i, _)| i)
        .collect();

    if keep.len() == raw.headers().len() {
        return raw.clone();
    }
    debug!(
        dropped = raw.headers().len() - keep.len(),
        "dropping index column"
    );

    let headers = keep.iter().map(|&i| raw.headers()[i].clone()).collect();
    let rows = raw
        .rows()
        .iter()
        .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
        .collect();
    // Widths are consistent by construction
    RawTable::new(headers, rows).unwrap_or_default()
}

/// Canonicalized rows with possibly-missing fields
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordTable {
    records: Vec<Record>,
}

impl RecordTable {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Keep only rows with every required field present
    pub fn complete_cases(&self) -> Dataset {
        let subjects: Vec<_> = self.records.iter().filter_map(Record::complete).collect();
        let dropped = self.records.len() - subjects.len();
        if dropped > 0 {
            info!(dropped, retained = subjects.len(), "dropped incomplete rows");
        }
        Dataset::new(subjects)
    }
}

/// Canonicalize every cell of a raw table
pub fn canonicalize(raw: &RawTable) -> Result<RecordTable> {
    let table = drop_index_column(raw);

    let missing: Vec<String> = columns::REQUIRED
        .iter()
        .filter(|name| table.column_index(name).is_none())
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(Error::MissingColumns(missing));
    }

    // All present, checked above
    let idx = |name: &str| table.column_index(name).unwrap_or_default();
    let (i_cap, i_age, i_height) = (
        idx(columns::LUNG_CAP),
        idx(columns::AGE),
        idx(columns::HEIGHT),
    );
    let (i_smoke, i_gender, i_caes) = (
        idx(columns::SMOKE),
        idx(columns::GENDER),
        idx(columns::CAESAREAN),
    );

    let records = table
        .rows()
        .iter()
        .map(|row| Record {
            lung_cap: parse_numeric(&row[i_cap]),
            age: parse_numeric(&row[i_age]),
            height: parse_numeric(&row[i_height]),
            smoke: canonical_yes_no(&row[i_smoke]),
            gender: canonical_gender(&row[i_gender]),
            caesarean: canonical_yes_no(&row[i_caes]),
        })
        .collect();

    Ok(RecordTable::new(records))
}

/// Full normalization: canonicalize then drop incomplete rows
pub fn normalize(raw: &RawTable) -> Result<Dataset> {
    Ok(canonicalize(raw)?.complete_cases())
}
