//! All two-sample tests of LungCap across one binary factor

use crate::levene::levene;
use crate::mann_whitney::mann_whitney_u;
use crate::ttest::{mean_var, t_test};
use crate::types::{TestResult, VarianceAssumption};
use lungcap_core::{Categorical, Dataset, Result};
use tracing::instrument;

/// Sample description for one level
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub label: &'static str,
    pub n: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl GroupSummary {
    fn new(label: &'static str, values: &[f64]) -> Self {
        let (mean, var) = mean_var(values);
        Self {
            label,
            n: values.len(),
            mean,
            std_dev: var.sqrt(),
        }
    }
}

/// Outcome of every group test for one factor; the non-reference level is
/// the first sample (Male vs Female, Yes vs No)
#[derive(Debug, Clone, PartialEq)]
pub struct GroupComparison {
    pub factor: Categorical,
    pub first: GroupSummary,
    pub second: GroupSummary,
    pub student: TestResult,
    pub welch: TestResult,
    pub levene: TestResult,
    pub mann_whitney: TestResult,
}

#[instrument(skip(data), fields(n = data.len()))]
pub fn compare_groups(data: &Dataset, factor: Categorical) -> Result<GroupComparison> {
    let (reference, other) = data.split_outcome(factor);
    let [reference_label, other_label] = factor.levels();

    Ok(GroupComparison {
        factor,
        student: t_test(&other, &reference, VarianceAssumption::Equal)?,
        welch: t_test(&other, &reference, VarianceAssumption::Unequal)?,
        levene: levene(&[&other, &reference])?,
        mann_whitney: mann_whitney_u(&other, &reference)?,
        first: GroupSummary::new(other_label, &other),
        second: GroupSummary::new(reference_label, &reference),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lungcap_core::{Gender, Subject, YesNo};

    #[test]
    fn test_non_reference_level_comes_first() {
        let subjects = (0..20)
            .map(|i| Subject {
                lung_cap: (if i % 2 == 0 { 9.0 } else { 6.0 }) + (i % 5) as f64 * 0.3,
                age: 10.0,
                height: 60.0,
                smoke: YesNo::No,
                gender: if i % 2 == 0 { Gender::Male } else { Gender::Female },
                caesarean: YesNo::No,
            })
            .collect();
        let cmp = compare_groups(&Dataset::new(subjects), Categorical::Gender).unwrap();
        assert_eq!(cmp.first.label, "Male");
        assert_eq!(cmp.second.label, "Female");
        assert_eq!(cmp.first.n + cmp.second.n, 20);
        assert!(cmp.student.statistic > 0.0);
        assert!(cmp.welch.p_value < 0.001);
        assert_eq!(cmp.mann_whitney.statistic, 100.0);
    }
}
