//! Logistic classification of above-median lung capacity

use crate::{load_dataset, AnalysisConfig, Report, Result};
use lungcap_classify::{evaluate, Evaluation, LogisticOptions};
use tracing::instrument;

/// Accuracy, confusion matrix with its named cells, and the per-class report
pub fn evaluation_text(eval: &Evaluation) -> String {
    let cm = &eval.confusion;
    format!(
        "--- Model Evaluation on Unseen Test Data ---\n\
         Accuracy: {:.2}%\n\n\
         Confusion Matrix:\n{cm}\n\n\
         Breakdown of the Confusion Matrix:\n\
         True Negatives (TN): {} (Correctly predicted 'Low')\n\
         False Positives (FP): {} (Incorrectly predicted 'High')\n\
         False Negatives (FN): {} (Incorrectly predicted 'Low')\n\
         True Positives (TP): {} (Correctly predicted 'High')\n\n\
         Full Classification Report:\n{}",
        eval.accuracy() * 100.0,
        cm.true_negatives,
        cm.false_positives,
        cm.false_negatives,
        cm.true_positives,
        eval.report
    )
}

#[instrument(skip_all, fields(path = %config.data_path.display()))]
pub fn run(config: &AnalysisConfig) -> Result<Report> {
    let data = load_dataset(config)?;
    let eval = evaluate(
        &data,
        config.test_fraction,
        config.seed,
        &LogisticOptions::default(),
    )?;

    let mut report = Report::new();
    report.section(format!(
        "Binary target variable 'High_Lung_Cap' created based on the median value of {:.2}",
        eval.median
    ));
    report.section(format!(
        "Data split into {} training samples and {} testing samples.\n\
         Logistic Regression model has been trained.",
        eval.n_train, eval.n_test
    ));
    report.section(evaluation_text(&eval));
    Ok(report)
}
