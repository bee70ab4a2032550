//! Configuration shared by the analysis units

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default input file name
pub const DEFAULT_DATA_FILE: &str = "LungCapData.csv";

/// Parameters of an analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Input CSV
    pub data_path: PathBuf,
    /// Directory chart files are written to
    pub output_dir: PathBuf,
    /// Confidence level for intervals (e.g., 0.95 for 95% CI)
    pub confidence_level: f64,
    /// Quantiles fitted by the quantile regression unit
    pub quantiles: Vec<f64>,
    /// Seed for the train/test split and plot jitter
    pub seed: u64,
    /// Share of rows held out for testing
    pub test_fraction: f64,
    /// Ages at or below this value fall into the younger group
    pub age_split: f64,
    /// Chi-squared validity threshold on expected cell counts
    pub min_expected_frequency: f64,
    /// Whether units render chart files
    pub render_charts: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            output_dir: PathBuf::from("."),
            confidence_level: 0.95,
            quantiles: vec![0.10, 0.50, 0.90],
            seed: 42,
            test_fraction: 0.2,
            age_split: 13.0,
            min_expected_frequency: 5.0,
            render_charts: true,
        }
    }
}

impl AnalysisConfig {
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_test_fraction(mut self, fraction: f64) -> Self {
        self.test_fraction = fraction;
        self
    }

    pub fn with_charts(mut self, render: bool) -> Self {
        self.render_charts = render;
        self
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        let open_unit = |v: f64| v > 0.0 && v < 1.0;
        if !open_unit(self.confidence_level) {
            return Err(Error::invalid_probability(
                "Confidence level",
                self.confidence_level,
            ));
        }
        if !open_unit(self.test_fraction) {
            return Err(Error::invalid_probability("Test fraction", self.test_fraction));
        }
        if let Some(&q) = self.quantiles.iter().find(|&&q| !open_unit(q)) {
            return Err(Error::invalid_probability("Quantile", q));
        }
        if self.min_expected_frequency < 0.0 {
            return Err(Error::InvalidParameter(
                "Minimum expected frequency must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}
