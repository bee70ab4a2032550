//! Error types for lung capacity analyses
//!
//! Provides a unified error type for all lungcap crates.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Core error type for loading, cleaning and model fitting
#[derive(Error, Debug)]
pub enum Error {
    /// Input file does not exist
    #[error("'{}' not found. Place the file next to this script and rerun.", path.display())]
    FileNotFound { path: PathBuf },

    /// Required columns absent from the input header
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Malformed CSV content
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Design matrix is rank deficient
    #[error("Singular matrix: {0}")]
    SingularMatrix(String),

    /// Iterative estimator did not converge
    #[error("Estimator did not converge after {iterations} iterations")]
    NotConverged { iterations: usize },

    /// Two models compared on different row sets
    #[error("Sample size mismatch: {reduced} rows in the reduced model, {full} in the full model")]
    SampleSizeMismatch { reduced: usize, full: usize },

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a missing input file
    pub fn file_not_found(path: impl AsRef<Path>) -> Self {
        Self::FileNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create an error for an invalid probability (quantile, confidence level, fraction)
    pub fn invalid_probability(name: &str, p: f64) -> Self {
        Self::InvalidParameter(format!("{name} {p} must be in (0, 1)"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Computation(format!("{context} contains NaN or infinite values"))
    }

    /// Whether this error is a configuration problem rather than an estimation failure
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::FileNotFound { .. } | Self::MissingColumns(_))
    }
}
