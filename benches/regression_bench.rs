use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lungcap_classify::{evaluate, LogisticOptions};
use lungcap_core::{Dataset, Gender, Subject, YesNo};
use lungcap_regression::{fit_ols, fit_quantile, CovarianceType, Formula, QuantRegOptions};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;

/// Synthetic cohort shaped like the lung capacity data
fn generate_cohort(size: usize, seed: u64) -> Dataset {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.0).unwrap();
    let subjects = (0..size)
        .map(|_| {
            let age: f64 = rng.gen_range(3.0..19.0);
            let height = 46.0 + 1.3 * age + rng.gen_range(-4.0..4.0);
            let smoke = age > 10.0 && rng.gen_bool(0.25);
            let male = rng.gen_bool(0.5);
            Subject {
                lung_cap: -11.5 + 0.12 * age + 0.27 * height - if smoke { 0.6 } else { 0.0 }
                    + if male { 0.35 } else { 0.0 }
                    + noise.sample(&mut rng),
                age,
                height,
                smoke: YesNo::from(smoke),
                gender: if male { Gender::Male } else { Gender::Female },
                caesarean: YesNo::from(rng.gen_bool(0.2)),
            }
        })
        .collect();
    Dataset::new(subjects)
}

fn bench_ols(c: &mut Criterion) {
    let mut group = c.benchmark_group("OLS");
    for &size in &[100, 654, 5000] {
        let data = generate_cohort(size, 42);
        group.bench_with_input(BenchmarkId::new("fit_base", size), &data, |b, data| {
            b.iter(|| fit_ols(&Formula::base(), black_box(data)))
        });
        let fit = fit_ols(&Formula::base(), &data).unwrap();
        group.bench_with_input(BenchmarkId::new("hc3", size), &fit, |b, fit| {
            b.iter(|| fit.coefficients_with(CovarianceType::HC3, black_box(0.95)))
        });
    }
    group.finish();
}

fn bench_quantile(c: &mut Criterion) {
    let mut group = c.benchmark_group("QuantileRegression");
    group.sample_size(20);
    let data = generate_cohort(654, 42);
    let options = QuantRegOptions::default();
    for &q in &[0.1, 0.5, 0.9] {
        group.bench_with_input(BenchmarkId::new("irls", q), &q, |b, &q| {
            b.iter(|| fit_quantile(&Formula::base(), black_box(&data), q, &options))
        });
    }
    group.finish();
}

fn bench_logistic(c: &mut Criterion) {
    let data = generate_cohort(654, 42);
    let options = LogisticOptions::default();
    c.bench_function("logistic_evaluate_654", |b| {
        b.iter(|| evaluate(black_box(&data), 0.2, 42, &options))
    });
}

criterion_group!(benches, bench_ols, bench_quantile, bench_logistic);
criterion_main!(benches);
