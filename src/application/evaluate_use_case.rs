// ============================================================
// Layer 2 — EvaluateUseCase
// ============================================================
// Scores how well a random forest tells the classes apart:
//
//   Step 1: Load every class's chunk counts           (Layer 6)
//   Step 2: For each class combination:
//             balance + label                         (Layer 4)
//             stratified k-fold forest accuracy       (Layer 5)
//             append fold scores to scores.csv        (Layer 6)

use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::application::seeded_rng;
use crate::data::balancer::{balance_and_label, ClassCounts};
use crate::domain::line_class::LineClass;
use crate::infra::{layout::CorpusLayout, scores::ScoreLogger, store::ArtifactStore};
use crate::ml::{
    cross_validation::{combination_name, evaluate, CrossValidationReport, DEFAULT_FOLDS},
    forest::ForestParams,
};

/// The class groups scored, in order
pub const COMBINATIONS: [&[LineClass]; 4] = [
    &[LineClass::EnNative, LineClass::FrNative],
    &[LineClass::FrNative, LineClass::EnNonNative],
    &[LineClass::EnNative, LineClass::EnNonNative],
    &[LineClass::EnNative, LineClass::EnNonNative, LineClass::FrNative],
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateConfig {
    /// Directory holding the chunk count files
    pub input_dir:   PathBuf,
    pub output_dir:  PathBuf,
    pub chunk_size:  usize,
    /// Chunks kept per class; `None` keeps as many as the smallest
    /// class has
    pub sample_size: Option<usize>,
    pub k_folds:     usize,
    pub forest:      ForestParams,
    /// Draw each class's sample at random instead of taking the
    /// first chunks
    pub shuffle:     bool,
    pub seed:        Option<u64>,
    pub layout:      CorpusLayout,
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        Self {
            input_dir:   PathBuf::from("/tmp"),
            output_dir:  PathBuf::from("/tmp"),
            chunk_size:  1000,
            sample_size: Some(350),
            k_folds:     DEFAULT_FOLDS,
            forest:      ForestParams::default(),
            shuffle:     false,
            seed:        None,
            layout:      CorpusLayout::default(),
        }
    }
}

pub struct EvaluateUseCase {
    config: EvaluateConfig,
}

impl EvaluateUseCase {
    pub fn new(config: EvaluateConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<Vec<CrossValidationReport>> {
        let cfg = &self.config;

        // ── Step 1: Chunk counts ─────────────────────────────────────────────
        let input = ArtifactStore::new(&cfg.input_dir, cfg.layout.clone())?;
        let mut counts: BTreeMap<LineClass, Vec<Vec<u32>>> = BTreeMap::new();
        for class in LineClass::ALL {
            tracing::info!(
                "Loading {} chunks of size {} from '{}'",
                class,
                cfg.chunk_size,
                input.dir().display()
            );
            counts.insert(class, input.load_chunk_counts(class, cfg.chunk_size)?);
        }

        let output = ArtifactStore::new(&cfg.output_dir, cfg.layout.clone())?;
        let logger = ScoreLogger::new(output.layout().scores_path(output.dir()))?;
        let mut rng = seeded_rng(cfg.seed);

        // ── Step 2: Score each combination ───────────────────────────────────
        let mut reports = Vec::with_capacity(COMBINATIONS.len());
        for combination in COMBINATIONS {
            let name = combination_name(combination);
            tracing::info!("Scoring {}", name);

            let chunks_by_class: Vec<ClassCounts> = combination
                .iter()
                .map(|class| (*class, counts.get(class).cloned().unwrap_or_default()))
                .collect();

            let dataset = balance_and_label(
                &chunks_by_class,
                cfg.sample_size,
                cfg.chunk_size,
                cfg.shuffle.then_some(&mut rng),
            )
            .with_context(|| format!("Cannot build the {name} dataset"))?;

            let seed: u64 = rng.gen();
            let report = evaluate(&dataset, cfg.k_folds, &cfg.forest, seed)?;
            tracing::info!("{} fold scores: {:.4?}", name, report.fold_scores);
            tracing::info!("Average score = {:.6}", report.mean);

            logger.log(&report)?;
            reports.push(report);
        }

        tracing::info!("Scores appended to '{}'", logger.csv_path().display());
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Each class uses feature `i` far more than the others.
    fn write_counts(dir: &std::path::Path, per_class: usize) {
        let store = ArtifactStore::new(dir, CorpusLayout::default()).unwrap();
        for (i, class) in LineClass::ALL.into_iter().enumerate() {
            let counts: Vec<Vec<u32>> = (0..per_class)
                .map(|j| {
                    let mut row = vec![5 + (j % 3) as u32; 3];
                    row[i] = 60 + (j % 4) as u32;
                    row
                })
                .collect();
            store.save_chunk_counts(class, 100, &counts).unwrap();
        }
    }

    fn config(dir: &std::path::Path) -> EvaluateConfig {
        EvaluateConfig {
            input_dir:   dir.to_path_buf(),
            output_dir:  dir.to_path_buf(),
            chunk_size:  100,
            sample_size: Some(20),
            k_folds:     5,
            forest:      ForestParams { max_features: Some(3), ..ForestParams::default() },
            seed:        Some(8),
            ..EvaluateConfig::default()
        }
    }

    #[test]
    fn test_all_combinations_scored_and_logged() {
        let dir = tempfile::tempdir().unwrap();
        write_counts(dir.path(), 25);
        let reports = EvaluateUseCase::new(config(dir.path())).execute().unwrap();

        assert_eq!(reports.len(), 4);
        assert_eq!(reports[1].combination(), "FR_LINES+NON_NATIVE_LINES");
        assert_eq!(reports[3].classes.len(), 3);
        for report in &reports {
            assert_eq!(report.fold_scores.len(), 5);
            assert!((report.mean - 1.0).abs() < 1e-12);
        }

        let csv = std::fs::read_to_string(dir.path().join("scores.csv")).unwrap();
        // header + 4 combinations × 5 folds
        assert_eq!(csv.lines().count(), 21);
    }

    #[test]
    fn test_sample_size_larger_than_a_class() {
        let dir = tempfile::tempdir().unwrap();
        write_counts(dir.path(), 15);
        let err = EvaluateUseCase::new(config(dir.path())).execute().unwrap_err();
        assert!(format!("{err:#}").contains("insufficient samples"));
    }

    #[test]
    fn test_missing_counts_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(EvaluateUseCase::new(config(dir.path())).execute().is_err());
    }
}
