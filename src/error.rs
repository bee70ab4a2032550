//! Error type for the analysis units

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] lungcap_core::Error),

    #[error(transparent)]
    Report(#[from] lungcap_report::Error),
}

impl Error {
    /// Missing input file or required column
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::Core(e) => e.is_configuration(),
            Self::Report(lungcap_report::Error::Core(e)) => e.is_configuration(),
            Self::Report(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
