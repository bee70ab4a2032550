//! Error types for lungcap-report

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] lungcap_core::Error),

    /// Chart backend failure
    #[error("Plotting error: {0}")]
    Plot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Smoothing failed: {0}")]
    Smoothing(String),
}

pub type Result<T> = std::result::Result<T, Error>;
