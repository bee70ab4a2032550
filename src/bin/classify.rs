//! Logistic classification of high lung capacity

use lungcap_stats::{cli, units};
use std::process::ExitCode;

fn main() -> ExitCode {
    cli::execute(units::classify::run)
}
