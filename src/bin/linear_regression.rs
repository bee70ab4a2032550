//! Multiple linear regression with HC3 standard errors

use lungcap_stats::{cli, units};
use std::process::ExitCode;

fn main() -> ExitCode {
    cli::execute(units::linear::run)
}
