//! Group-comparison hypothesis tests
//!
//! - [`t_test`]: Student or Welch two-sample t-test, chosen by [`VarianceAssumption`]
//! - [`levene`]: median-centred Levene test for equal variances
//! - [`mann_whitney_u`]: rank-sum test with tie and continuity correction
//! - [`chi_squared_independence`]: Pearson test on a [`ContingencyTable`]
//!
//! [`compare_groups`] runs the first three for LungCap across one binary
//! factor of a [`Dataset`](lungcap_core::Dataset).

mod chi_squared;
mod comparison;
mod levene;
mod mann_whitney;
mod ttest;
mod types;

pub use chi_squared::{
    chi_squared_independence, ChiSquaredResult, ContingencyTable, MIN_EXPECTED_FREQUENCY,
};
pub use comparison::{compare_groups, GroupComparison, GroupSummary};
pub use levene::levene;
pub use mann_whitney::mann_whitney_u;
pub use ttest::t_test;
pub use types::{TestKind, TestResult, VarianceAssumption};
