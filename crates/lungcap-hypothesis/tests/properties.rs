//! Property tests for the two-sample tests

use approx::assert_relative_eq;
use lungcap_hypothesis::{
    chi_squared_independence, levene, mann_whitney_u, t_test, ContingencyTable,
    VarianceAssumption,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

fn sample(n: usize, mean: f64, sd: f64, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dist = Normal::new(mean, sd).unwrap();
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}

proptest! {
    #[test]
    fn p_values_are_probabilities(
        a in prop::collection::vec(-50.0f64..50.0, 3..40),
        b in prop::collection::vec(-50.0f64..50.0, 3..40),
    ) {
        for variance in [VarianceAssumption::Equal, VarianceAssumption::Unequal] {
            if let Ok(r) = t_test(&a, &b, variance) {
                prop_assert!((0.0..=1.0).contains(&r.p_value));
            }
        }
        if let Ok(r) = levene(&[&a, &b]) {
            prop_assert!(r.statistic >= 0.0);
            prop_assert!((0.0..=1.0).contains(&r.p_value));
        }
        if let Ok(r) = mann_whitney_u(&a, &b) {
            prop_assert!(r.statistic >= 0.0);
            prop_assert!(r.statistic <= (a.len() * b.len()) as f64);
            prop_assert!((0.0..=1.0).contains(&r.p_value));
        }
    }

    #[test]
    fn swapping_samples_flips_t(
        a in prop::collection::vec(0.0f64..10.0, 3..20),
        b in prop::collection::vec(0.0f64..10.0, 3..20),
    ) {
        if let (Ok(ab), Ok(ba)) = (
            t_test(&a, &b, VarianceAssumption::Unequal),
            t_test(&b, &a, VarianceAssumption::Unequal),
        ) {
            prop_assert!((ab.statistic + ba.statistic).abs() < 1e-9);
            prop_assert!((ab.p_value - ba.p_value).abs() < 1e-9);
        }
    }

    #[test]
    fn expected_total_matches_observed(
        counts in prop::collection::vec(1usize..200, 4),
    ) {
        let table = ContingencyTable::new(
            vec!["Female".into(), "Male".into()],
            vec!["No".into(), "Yes".into()],
            vec![counts[..2].to_vec(), counts[2..].to_vec()],
        )
        .unwrap();
        let result = chi_squared_independence(&table, true).unwrap();
        let expected: f64 = result.expected.iter().flatten().sum();
        prop_assert!((expected - table.total() as f64).abs() < 1e-9);
        prop_assert!(result.statistic >= 0.0);
    }
}

#[test]
fn test_detects_mean_shift() {
    let a = sample(200, 8.0, 2.0, 1);
    let b = sample(200, 7.0, 2.0, 2);
    assert!(t_test(&a, &b, VarianceAssumption::Equal).unwrap().p_value < 0.01);
    assert!(mann_whitney_u(&a, &b).unwrap().p_value < 0.01);
}

#[test]
fn test_detects_spread_difference() {
    let a = sample(300, 5.0, 1.0, 3);
    let b = sample(300, 5.0, 3.0, 4);
    let r = levene(&[&a, &b]).unwrap();
    assert!(r.p_value < 1e-6);
}

#[test]
fn test_welch_matches_student_for_balanced_equal_spread() {
    let a = sample(100, 3.0, 1.0, 5);
    let b = sample(100, 3.2, 1.0, 6);
    let student = t_test(&a, &b, VarianceAssumption::Equal).unwrap();
    let welch = t_test(&a, &b, VarianceAssumption::Unequal).unwrap();
    assert_relative_eq!(student.statistic, welch.statistic, epsilon = 1e-10);
}
