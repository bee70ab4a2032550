//! CSV loading into an untyped table
//!
//! The loader keeps every cell as text. Coercion and label cleanup happen in
//! [`crate::normalize`], so a malformed value never aborts the load.

use crate::{Error, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, instrument};

/// Header plus string records, exactly as read from disk
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a table from headers and rows; every row must match the header width
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some(bad) = rows.iter().find(|r| r.len() != headers.len()) {
            return Err(Error::size_mismatch(headers.len(), bad.len(), "CSV row"));
        }
        Ok(Self { headers, rows })
    }

    /// Parse CSV content from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    /// Column names in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows in file order
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Serialize back to CSV text
    pub fn to_csv_string(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| Error::Io(io::Error::new(io::ErrorKind::Other, e.to_string())))?;
        String::from_utf8(bytes).map_err(|e| Error::InvalidInput(e.to_string()))
    }
}

/// Load a CSV file, failing with [`Error::FileNotFound`] when it is absent
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_csv(path: impl AsRef<Path>) -> Result<RawTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::file_not_found(path),
        _ => Error::Io(e),
    })?;

    let table = RawTable::from_reader(file)?;
    debug!(
        rows = table.len(),
        columns = table.headers().len(),
        "loaded raw table"
    );
    Ok(table)
}
