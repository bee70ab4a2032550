//! Descriptive and exploratory aggregates
//!
//! Everything here works on the canonicalized [`RecordTable`] (missing values
//! still present) or on the complete [`Dataset`]:
//!
//! - [`ContinuousSummary`]: count, mean, SD, min, quartiles, max
//! - [`FrequencyTable`]: level counts and percentages, missing as its own level
//! - [`CrossTab`]: age group × smoking status with margins and row percentages
//! - [`BoxStats`] / [`outcome_groups`]: the numbers behind the box plots
//!
//! [`RecordTable`]: lungcap_core::RecordTable
//! [`Dataset`]: lungcap_core::Dataset

mod crosstab;
mod frequency;
mod groups;
mod summary;

pub use crosstab::{AgeGroup, CrossTab};
pub use frequency::{FrequencyRow, FrequencyTable, MISSING_LABEL};
pub use groups::{jitter, outcome_groups, BoxStats, Group};
pub use summary::{describe_continuous, quantile_sorted, sorted_finite, ContinuousSummary};
