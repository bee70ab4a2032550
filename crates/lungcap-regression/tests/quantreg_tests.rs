//! Quantile regression on a synthetic cohort

mod common;

use common::synthetic_dataset;
use lungcap_core::Error;
use lungcap_regression::{
    compare_quantiles, fit_ols, fit_quantile, fit_quantiles, CovarianceType, FittedModel,
    Formula, QuantRegOptions,
};

#[test]
fn test_median_prediction_lies_between_outer_quantiles() {
    let data = synthetic_dataset(654, 42);
    let fits = fit_quantiles(
        &Formula::base(),
        &data,
        &[0.1, 0.5, 0.9],
        &QuantRegOptions::default(),
    )
    .unwrap();

    let low = fits[0].predict(&data);
    let mid = fits[1].predict(&data);
    let high = fits[2].predict(&data);
    let inside = (0..data.len())
        .filter(|&i| low[i] <= mid[i] && mid[i] <= high[i])
        .count();
    assert!(inside as f64 / data.len() as f64 > 0.9, "only {inside} rows ordered");
}

#[test]
fn test_share_of_rows_below_fitted_quantile() {
    let data = synthetic_dataset(500, 8);
    for q in [0.1, 0.5, 0.9] {
        let fit = fit_quantile(&Formula::base(), &data, q, &QuantRegOptions::default()).unwrap();
        let below = fit.residuals().iter().filter(|&&r| r < 0.0).count() as f64;
        let share = below / data.len() as f64;
        assert!((share - q).abs() < 0.05, "q={q}: {share}");
    }
}

#[test]
fn test_median_close_to_ols_for_symmetric_noise() {
    let data = synthetic_dataset(654, 13);
    let median = fit_quantile(&Formula::base(), &data, 0.5, &QuantRegOptions::default()).unwrap();
    let ols = fit_ols(&Formula::base(), &data).unwrap();
    let qh = median.coefficient("Height").unwrap();
    let oh = ols.coefficient("Height").unwrap();
    assert!(qh.interval.contains(oh.estimate));
    assert!(qh.std_error > 0.0);
}

#[test]
fn test_comparison_table_shape() {
    let data = synthetic_dataset(300, 4);
    let fits = fit_quantiles(
        &Formula::base(),
        &data,
        &[0.1, 0.5, 0.9],
        &QuantRegOptions::default(),
    )
    .unwrap();
    let table = compare_quantiles(&fits, &["Height", "C(Smoke)[T.Yes]"]).unwrap();

    assert_eq!(table.columns().len(), 9);
    assert_eq!(table.rows.len(), 2);
    for row in &table.rows {
        assert_eq!(row.values().len(), 9);
        for (est, (lo, hi)) in row.estimates.iter().zip(&row.intervals) {
            assert!(lo <= est && est <= hi);
        }
    }

    assert!(compare_quantiles(&fits, &["Weight"]).is_err());
}

#[test]
fn test_iteration_budget_exhaustion_fails_whole_batch() {
    let data = synthetic_dataset(200, 9);
    let options = QuantRegOptions {
        max_iter: 2,
        ..QuantRegOptions::default()
    };
    let result = fit_quantiles(&Formula::base(), &data, &[0.1, 0.5, 0.9], &options);
    assert!(matches!(result, Err(Error::NotConverged { iterations: 2 })));
}

#[test]
fn test_quantile_fit_reports_kernel_sandwich() {
    let data = synthetic_dataset(200, 21);
    let fit = fit_quantile(&Formula::base(), &data, 0.5, &QuantRegOptions::default()).unwrap();
    assert_eq!(fit.covariance_type(), CovarianceType::KernelSandwich);
    assert_eq!(fit.covariance_type().name(), "robust kernel");

    let ols = fit_ols(&Formula::base(), &data).unwrap();
    assert!(ols.covariance(CovarianceType::KernelSandwich).is_err());
}
