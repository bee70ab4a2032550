//! Descriptive statistics, frequency tables and exploratory charts

use lungcap_stats::{cli, units};
use std::process::ExitCode;

fn main() -> ExitCode {
    cli::execute(units::explore::run)
}
