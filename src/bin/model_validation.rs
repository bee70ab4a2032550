//! Polynomial age term and nested model comparison

use lungcap_stats::{cli, units};
use std::process::ExitCode;

fn main() -> ExitCode {
    cli::execute(units::validation::run)
}
