//! Mann–Whitney U test, normal approximation

use crate::types::{TestKind, TestResult};
use lungcap_core::inference::normal_two_sided_p;
use lungcap_core::{Error, Result};
use tracing::debug;

/// Average ranks (1-based) and the sizes of tie groups
pub(crate) fn rank_with_ties(values: &[f64]) -> (Vec<f64>, Vec<usize>) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut ties = Vec::new();
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end share the mean of ranks start+1..=end
        let rank = (start + end + 1) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        if end - start > 1 {
            ties.push(end - start);
        }
        start = end;
    }
    (ranks, ties)
}

/// Two-sided test with tie and continuity correction
///
/// The reported statistic is U for `first`.
pub fn mann_whitney_u(first: &[f64], second: &[f64]) -> Result<TestResult> {
    for sample in [first, second] {
        if sample.is_empty() {
            return Err(Error::InsufficientData {
                expected: 1,
                actual: 0,
            });
        }
        if sample.iter().any(|v| !v.is_finite()) {
            return Err(Error::non_finite("Mann-Whitney sample"));
        }
    }

    let (n1, n2) = (first.len() as f64, second.len() as f64);
    let n = n1 + n2;
    let pooled: Vec<f64> = first.iter().chain(second).copied().collect();
    let (ranks, ties) = rank_with_ties(&pooled);

    let r1: f64 = ranks[..first.len()].iter().sum();
    let u1 = r1 - n1 * (n1 + 1.0) / 2.0;
    let u2 = n1 * n2 - u1;

    let tie_term: f64 = ties.iter().map(|&t| (t.pow(3) - t) as f64).sum();
    let sigma = (n1 * n2 / 12.0 * ((n + 1.0) - tie_term / (n * (n - 1.0)))).sqrt();
    if !(sigma > 0.0) {
        return Err(Error::Computation(
            "All observations tied; Mann-Whitney variance is zero".to_string(),
        ));
    }

    let mu = n1 * n2 / 2.0;
    let z = (u1.max(u2) - mu - 0.5) / sigma;
    debug!(u1, z, tie_groups = ties.len(), "Mann-Whitney U");
    // the continuity correction can push z below zero; the p-value caps at 1
    let p_value = if z > 0.0 { normal_two_sided_p(z)? } else { 1.0 };
    Ok(TestResult::new(TestKind::MannWhitneyU, u1, p_value, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ranks_average_ties() {
        let (ranks, ties) = rank_with_ties(&[3.0, 1.0, 3.0, 2.0, 3.0]);
        assert_eq!(ranks, vec![4.0, 1.0, 4.0, 2.0, 4.0]);
        assert_eq!(ties, vec![3]);
    }

    #[test]
    fn test_hand_computed_statistic() {
        // pooled ranks: first gets 1, 2, 4; second gets 3, 5, 6
        let r = mann_whitney_u(&[1.0, 2.0, 4.0], &[3.0, 5.0, 6.0]).unwrap();
        assert_eq!(r.statistic, 1.0);
        // mu = 4.5, sigma = sqrt(9 / 12 * 7), z = (8 - 4.5 - 0.5) / sigma
        let z = 3.0 / (9.0f64 / 12.0 * 7.0).sqrt();
        assert_relative_eq!(r.p_value, normal_two_sided_p(z).unwrap(), epsilon = 1e-12);
    }

    #[test]
    fn test_u_statistics_sum_to_product() {
        let a = [1.5, 2.0, 2.0, 7.0];
        let b = [2.0, 3.0, 0.5];
        let ab = mann_whitney_u(&a, &b).unwrap();
        let ba = mann_whitney_u(&b, &a).unwrap();
        assert_relative_eq!(ab.statistic + ba.statistic, 12.0);
        assert_relative_eq!(ab.p_value, ba.p_value, epsilon = 1e-12);
    }

    #[test]
    fn test_identical_samples_not_significant() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let r = mann_whitney_u(&a, &a).unwrap();
        assert_eq!(r.statistic, 8.0);
        assert_eq!(r.p_value, 1.0);
    }

    #[test]
    fn test_all_tied() {
        assert!(mann_whitney_u(&[1.0, 1.0], &[1.0]).is_err());
    }
}
