// ============================================================
// Layer 4 — Stratified K-Fold Splitter
// ============================================================
// Splits labelled rows into k folds for cross-validation.
// Every fold keeps the class proportions of the whole dataset:
//
//   class A rows: a0 a1 a2 a3 a4 a5 a6      k = 3
//                 └──f0──┘ └─f1─┘ └─f2─┘
//   class B rows: b0 b1 b2 b3 b4 b5
//                 └─f0─┘ └─f1─┘ └─f2─┘
//
//   fold f test set = block f of every class
//   fold f train set = everything else
//
// Why stratify?
//   The balancer hands over rows grouped by class. A plain
//   contiguous split would test on one class at a time and the
//   accuracy would mean nothing.
//
// Blocks are contiguous in row order and the first n % k blocks
// of a class hold one extra row, so the split is deterministic.
// Shuffling, when wanted, happens earlier in the balancer.

use std::collections::BTreeMap;

use crate::domain::error::{PipelineError, PipelineResult};

/// Test-set row indices for each of `k` folds.
///
/// # Returns
/// `k` vectors of row indices, sorted ascending. Together they cover
/// every row exactly once.
pub fn stratified_folds(labels: &[usize], k: usize) -> PipelineResult<Vec<Vec<usize>>> {
    if k < 2 {
        return Err(PipelineError::ConfigMismatch(format!(
            "k-fold cross-validation needs at least 2 folds, got {k}"
        )));
    }

    let mut by_class: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (row, &label) in labels.iter().enumerate() {
        by_class.entry(label).or_default().push(row);
    }

    let mut folds = vec![Vec::new(); k];
    for (label, rows) in &by_class {
        if rows.len() < k {
            return Err(PipelineError::ConfigMismatch(format!(
                "label {label} has only {} rows, cannot fill {k} folds",
                rows.len()
            )));
        }

        let base  = rows.len() / k;
        let extra = rows.len() % k;
        let mut start = 0;
        for (f, fold) in folds.iter_mut().enumerate() {
            let size = base + usize::from(f < extra);
            fold.extend_from_slice(&rows[start..start + size]);
            start += size;
        }
    }

    for fold in &mut folds {
        fold.sort_unstable();
    }

    tracing::debug!(
        "{} rows in {} classes dealt into {} folds",
        labels.len(),
        by_class.len(),
        k
    );
    Ok(folds)
}

/// Complement of a test fold: the rows the model trains on.
pub fn train_indices(n_rows: usize, test: &[usize]) -> Vec<usize> {
    let mut held_out = vec![false; n_rows];
    for &row in test {
        if let Some(slot) = held_out.get_mut(row) {
            *slot = true;
        }
    }
    (0..n_rows).filter(|&row| !held_out[row]).collect()
}
