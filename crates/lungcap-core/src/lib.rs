//! Core types for the lung capacity analyses
//!
//! This crate owns the first two pipeline stages shared by every analysis:
//!
//! - **Loading**: [`load_csv`] reads the input file into a [`RawTable`] of
//!   strings and fails with [`Error::FileNotFound`] when it is absent.
//! - **Normalization**: [`canonicalize`] drops the index column, coerces
//!   numbers and canonicalizes labels into a [`RecordTable`];
//!   [`RecordTable::complete_cases`] then yields the [`Dataset`].
//!
//! # Example
//!
//! ```rust
//! use lungcap_core::{normalize, RawTable, Gender};
//!
//! let csv = "LungCap,Age,Height,Smoke,Gender,Caesarean\n6.475,6,62.1,n,M,0\n";
//! let raw = RawTable::from_reader(csv.as_bytes()).unwrap();
//! let data = normalize(&raw).unwrap();
//! assert_eq!(data.subjects()[0].gender, Gender::Male);
//! ```

mod config;
mod dataset;
mod error;
pub mod inference;
mod loader;
mod normalize;
mod types;

pub use config::{AnalysisConfig, DEFAULT_DATA_FILE};
pub use dataset::{Categorical, Continuous, Dataset};
pub use error::{Error, Result};
pub use loader::{load_csv, RawTable};
pub use normalize::{
    canonical_gender, canonical_yes_no, canonicalize, drop_index_column, normalize,
    parse_numeric, RecordTable,
};
pub use types::{columns, Gender, Level, Record, Subject, YesNo};
