//! Types for test results

use std::fmt;

/// Which test produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestKind {
    StudentT,
    WelchT,
    Levene,
    MannWhitneyU,
    ChiSquared,
}

impl TestKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StudentT => "Student t-test",
            Self::WelchT => "Welch t-test",
            Self::Levene => "Levene (median)",
            Self::MannWhitneyU => "Mann-Whitney U",
            Self::ChiSquared => "Chi-squared",
        }
    }
}

/// Variance assumption for a two-sample t-test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VarianceAssumption {
    /// Pooled variance, `n1 + n2 - 2` degrees of freedom
    #[default]
    Equal,
    /// Separate variances, Welch–Satterthwaite degrees of freedom
    Unequal,
}

impl VarianceAssumption {
    pub fn test_kind(&self) -> TestKind {
        match self {
            Self::Equal => TestKind::StudentT,
            Self::Unequal => TestKind::WelchT,
        }
    }
}

/// Statistic and p-value of one test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestResult {
    pub kind: TestKind,
    pub statistic: f64,
    pub p_value: f64,
    /// Degrees of freedom where the reference distribution has one
    pub df: Option<f64>,
}

impl TestResult {
    pub fn new(kind: TestKind, statistic: f64, p_value: f64, df: Option<f64>) -> Self {
        Self {
            kind,
            statistic,
            p_value,
            df,
        }
    }

    /// Whether the null is rejected at level `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: statistic = {:.3}, p-value = {:.3}",
            self.kind.name(),
            self.statistic,
            self.p_value
        )?;
        if let Some(df) = self.df {
            write!(f, ", df = {df:.1}")?;
        }
        Ok(())
    }
}
