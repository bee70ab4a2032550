//! Quantile regression at the 10th, 50th and 90th percentiles

use lungcap_stats::{cli, units};
use std::process::ExitCode;

fn main() -> ExitCode {
    cli::execute(units::quantile::run)
}
