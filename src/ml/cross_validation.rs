// ============================================================
// Layer 5 — Cross-Validation
// ============================================================
// For each stratified fold: train a fresh forest on the other
// k-1 folds, predict the held-out fold and record accuracy.
//
//   accuracy = correct predictions / test rows
//
// The report's mean is the plain average over folds. Fold f's
// forest is seeded with seed + f so runs are reproducible.

use serde::{Deserialize, Serialize};

use crate::data::dataset::LabeledDataset;
use crate::data::splitter::{stratified_folds, train_indices};
use crate::domain::error::PipelineResult;
use crate::domain::line_class::LineClass;
use crate::ml::forest::{ForestParams, RandomForest};

pub const DEFAULT_FOLDS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidationReport {
    pub classes:     Vec<LineClass>,
    pub fold_scores: Vec<f64>,
    pub mean:        f64,
}

impl CrossValidationReport {
    /// Class keys joined with `+`, e.g. `EN_LINES+FR_LINES`
    pub fn combination(&self) -> String {
        combination_name(&self.classes)
    }
}

pub fn combination_name(classes: &[LineClass]) -> String {
    classes.iter().map(|c| c.key()).collect::<Vec<_>>().join("+")
}

pub fn evaluate(
    dataset: &LabeledDataset,
    k_folds: usize,
    params:  &ForestParams,
    seed:    u64,
) -> PipelineResult<CrossValidationReport> {
    let labels = dataset.labels();
    let folds  = stratified_folds(&labels, k_folds)?;
    let rows: Vec<&[f64]> = dataset.samples().iter().map(|s| s.features.as_slice()).collect();
    let n_classes = dataset.classes().len();
    tracing::debug!(
        "Cross-validating {} rows of {} features over {} classes",
        dataset.len(),
        dataset.width(),
        n_classes
    );

    let mut fold_scores = Vec::with_capacity(folds.len());
    for (f, test) in folds.iter().enumerate() {
        let train = train_indices(rows.len(), test);
        let train_rows: Vec<&[f64]> = train.iter().map(|&i| rows[i]).collect();
        let train_labels: Vec<usize> = train.iter().map(|&i| labels[i]).collect();

        let forest = RandomForest::fit(
            &train_rows,
            &train_labels,
            n_classes,
            params,
            seed.wrapping_add(f as u64),
        )?;

        let correct = test
            .iter()
            .filter(|&&i| forest.predict(rows[i]) == labels[i])
            .count();
        let accuracy = correct as f64 / test.len() as f64;

        tracing::debug!(
            "fold {}/{}: {}/{} correct ({:.4})",
            f + 1,
            folds.len(),
            correct,
            test.len(),
            accuracy
        );
        fold_scores.push(accuracy);
    }

    let mean = fold_scores.iter().sum::<f64>() / fold_scores.len() as f64;
    let report = CrossValidationReport {
        classes: dataset.classes().to_vec(),
        fold_scores,
        mean,
    };
    tracing::info!("{}: mean accuracy {:.4} over {} folds", report.combination(), mean, k_folds);
    Ok(report)
}
