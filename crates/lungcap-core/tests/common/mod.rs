//! Common test utilities for lungcap-core tests

use lungcap_core::RawTable;

/// Header used by every generated table, with the exporter's index column
pub const HEADER: [&str; 7] = [
    "Unnamed: 0",
    "LungCap",
    "Age",
    "Height",
    "Smoke",
    "Gender",
    "Caesarean",
];

pub const SMOKE_SPELLINGS: [&str; 8] = ["yes", "no", "Y", "N", "YES", " no ", "1", "false"];
pub const GENDER_SPELLINGS: [&str; 6] = ["male", "female", "m", "f", "MALE", "Female"];

/// Build a raw table from (lung_cap, age, height, smoke, gender, caesarean) cells
pub fn raw_table(rows: &[[String; 6]]) -> RawTable {
    let headers = HEADER.iter().map(|h| h.to_string()).collect();
    let rows = rows
        .iter()
        .enumerate()
        .map(|(i, cells)| {
            let mut row = vec![(i + 1).to_string()];
            row.extend(cells.iter().cloned());
            row
        })
        .collect();
    RawTable::new(headers, rows).unwrap()
}
