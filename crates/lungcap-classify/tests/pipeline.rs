//! End-to-end classification on synthetic cohorts

use approx::assert_relative_eq;
use lungcap_classify::{encode, evaluate, stratified_split, LogisticOptions, LungCapClass};
use lungcap_core::{Dataset, Gender, Subject, YesNo};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

fn cohort(n: usize, seed: u64) -> Dataset {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.0).unwrap();
    let subjects = (0..n)
        .map(|_| {
            let age: f64 = rng.gen_range(3.0..19.0);
            let height = 46.0 + 1.3 * age + rng.gen_range(-4.0..4.0);
            let smoke = age > 10.0 && rng.gen_bool(0.2);
            Subject {
                lung_cap: -11.0 + 0.1 * age + 0.27 * height - 0.5 * f64::from(u8::from(smoke))
                    + noise.sample(&mut rng),
                age,
                height,
                smoke: YesNo::from(smoke),
                gender: if rng.gen_bool(0.5) { Gender::Male } else { Gender::Female },
                caesarean: YesNo::from(rng.gen_bool(0.2)),
            }
        })
        .collect();
    Dataset::new(subjects)
}

#[test]
fn test_confusion_matrix_covers_test_rows() {
    let data = cohort(654, 42);
    let eval = evaluate(&data, 0.2, 42, &LogisticOptions::default()).unwrap();

    assert_eq!(eval.n_test, 131);
    assert_eq!(eval.n_train, 523);
    assert_eq!(eval.confusion.total(), eval.n_test);
    let [[tn, _], [_, tp]] = eval.confusion.as_array();
    assert_relative_eq!(eval.accuracy(), (tn + tp) as f64 / 131.0);
    assert!(eval.accuracy() > 0.7);

    let support: usize = eval.report.classes.iter().map(|c| c.support).sum();
    assert_eq!(support, 131);
}

#[test]
fn test_same_seed_same_result() {
    let data = cohort(300, 1);
    let a = evaluate(&data, 0.2, 42, &LogisticOptions::default()).unwrap();
    let b = evaluate(&data, 0.2, 42, &LogisticOptions::default()).unwrap();
    assert_eq!(a.confusion, b.confusion);
    assert_eq!(a.model, b.model);
}

#[test]
fn test_split_preserves_class_balance() {
    let data = cohort(654, 3);
    let enc = encode(&data).unwrap();
    let split = stratified_split(&enc.target, 0.2, 42).unwrap();
    let high_in_test = split
        .test
        .iter()
        .filter(|&&i| enc.target[i] == LungCapClass::High)
        .count();
    // 327 High of 654, so 65 or 66 of the 131 test rows
    assert!((65..=66).contains(&high_in_test));
}

proptest! {
    #[test]
    fn median_split_is_balanced(values in prop::collection::hash_set(0u32..100_000, 2..200)) {
        let subjects = values
            .iter()
            .map(|&v| Subject {
                lung_cap: f64::from(v) / 1000.0,
                age: 10.0,
                height: 60.0,
                smoke: YesNo::No,
                gender: Gender::Female,
                caesarean: YesNo::No,
            })
            .collect();
        let enc = encode(&Dataset::new(subjects)).unwrap();
        let [low, high] = enc.class_counts();
        prop_assert!(low.abs_diff(high) <= 1);
    }
}
