//! Lung capacity classification
//!
//! The pipeline labels each subject `High` or `Low` against the median
//! LungCap ([`encode`]), splits rows with [`stratified_split`], trains an
//! L2-regularized [`fit_logistic`] model and scores the held-out rows with
//! a [`ConfusionMatrix`] and [`ClassificationReport`].
//!
//! [`evaluate`] runs the whole sequence.

mod encode;
mod logistic;
mod metrics;
mod split;

pub use encode::{encode, EncodedData, LungCapClass, FEATURE_NAMES};
pub use logistic::{fit_logistic, LogisticModel, LogisticOptions};
pub use metrics::{ClassMetrics, ClassificationReport, ConfusionMatrix};
pub use split::{stratified_split, TrainTestSplit};

use lungcap_core::{Dataset, Result};
use tracing::info;

/// Everything produced by one train/evaluate run
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub median: f64,
    pub n_train: usize,
    pub n_test: usize,
    pub model: LogisticModel,
    pub confusion: ConfusionMatrix,
    pub report: ClassificationReport,
}

impl Evaluation {
    pub fn accuracy(&self) -> f64 {
        self.confusion.accuracy()
    }
}

/// Encode, split, train on the training rows and score the test rows
pub fn evaluate(
    data: &Dataset,
    test_fraction: f64,
    seed: u64,
    options: &LogisticOptions,
) -> Result<Evaluation> {
    let encoded = encode(data)?;
    let split = stratified_split(&encoded.target, test_fraction, seed)?;
    let (x_train, y_train) = encoded.select(&split.train);
    let (x_test, y_test) = encoded.select(&split.test);

    let model = fit_logistic(&x_train, &y_train, options)?;
    info!(iterations = model.iterations(), "logistic model trained");

    let predicted = model.predict(&x_test);
    let confusion = ConfusionMatrix::from_predictions(&y_test, &predicted)?;
    Ok(Evaluation {
        median: encoded.median,
        n_train: split.train.len(),
        n_test: split.test.len(),
        model,
        report: ClassificationReport::from_confusion(&confusion),
        confusion,
    })
}
