//! Levene's test for equal variances, centred on group medians
//! (the Brown–Forsythe variant)

use crate::types::{TestKind, TestResult};
use lungcap_core::inference::f_upper_p;
use lungcap_core::{Error, Result};

pub(crate) fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

pub fn levene(groups: &[&[f64]]) -> Result<TestResult> {
    let k = groups.len();
    if k < 2 {
        return Err(Error::InvalidParameter(format!(
            "Levene's test needs at least two groups, got {k}"
        )));
    }
    if let Some(g) = groups.iter().find(|g| g.is_empty()) {
        return Err(Error::InsufficientData {
            expected: 1,
            actual: g.len(),
        });
    }

    let deviations: Vec<Vec<f64>> = groups
        .iter()
        .map(|g| {
            let m = median(g);
            g.iter().map(|v| (v - m).abs()).collect()
        })
        .collect();
    let total: usize = groups.iter().map(|g| g.len()).sum();
    let group_means: Vec<f64> = deviations
        .iter()
        .map(|z| z.iter().sum::<f64>() / z.len() as f64)
        .collect();
    let grand_mean = deviations.iter().flatten().sum::<f64>() / total as f64;

    let between: f64 = deviations
        .iter()
        .zip(&group_means)
        .map(|(z, m)| z.len() as f64 * (m - grand_mean).powi(2))
        .sum();
    let within: f64 = deviations
        .iter()
        .zip(&group_means)
        .map(|(z, m)| z.iter().map(|v| (v - m).powi(2)).sum::<f64>())
        .sum();
    if within == 0.0 {
        return Err(Error::Computation(
            "No spread around group medians; Levene statistic undefined".to_string(),
        ));
    }

    let df_between = (k - 1) as f64;
    let df_within = (total - k) as f64;
    let w = (df_within / df_between) * between / within;
    Ok(TestResult::new(
        TestKind::Levene,
        w,
        f_upper_p(w, df_between, df_within)?,
        Some(df_between),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_median() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_hand_computed_statistic() {
        // deviations from medians: [2, 1, 0, 1, 2] and [4, 2, 0, 2, 4]
        // group means 1.2 and 2.4, grand mean 1.8
        // between = 5 * 0.36 * 2 = 3.6, within = 2.8 + 11.2 = 14
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [2.0, 4.0, 6.0, 8.0, 10.0];
        let r = levene(&[&a, &b]).unwrap();
        assert_relative_eq!(r.statistic, 8.0 * 3.6 / 14.0, epsilon = 1e-12);
        assert_eq!(r.df, Some(1.0));
        assert!(r.p_value > 0.05 && r.p_value < 1.0);
    }

    #[test]
    fn test_shift_invariance() {
        let a = [1.0, 4.0, 2.5, 7.0, 3.0];
        let b = [0.5, 9.0, 4.0, 3.0, 6.5, 2.0];
        let shifted: Vec<f64> = b.iter().map(|v| v + 100.0).collect();
        let r1 = levene(&[&a, &b]).unwrap();
        let r2 = levene(&[&a, &shifted]).unwrap();
        assert_relative_eq!(r1.statistic, r2.statistic, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_single_group() {
        assert!(levene(&[&[1.0, 2.0]]).is_err());
        assert!(levene(&[&[1.0, 2.0], &[]]).is_err());
    }
}
