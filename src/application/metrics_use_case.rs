// ============================================================
// Layer 2 — MetricsUseCase
// ============================================================
// Descriptive statistics of each class over the same number of
// tokens:
//
//   Step 1: Load lines-out.json                       (Layer 6)
//   Step 2: Load lexicon overrides, if any            (Layer 5)
//   Step 3: Compute and normalise the four metrics    (Layer 5)
//   Step 4: Save corpus-metrics.json                  (Layer 6)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::application::seeded_rng;
use crate::domain::line_class::LineClass;
use crate::features::{
    lexicon::Lexicon,
    metrics::{compute_all, CorpusMetrics, MetricLexicons},
};
use crate::infra::{layout::CorpusLayout, store::ArtifactStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub lines_dir:        PathBuf,
    pub output_dir:       PathBuf,
    /// One entry per line; replaces the built-in list
    pub idioms:           Option<PathBuf>,
    pub cohesive_markers: Option<PathBuf>,
    pub pronouns:         Option<PathBuf>,
    pub seed:             Option<u64>,
    pub layout:           CorpusLayout,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            lines_dir:        PathBuf::from("/tmp"),
            output_dir:       PathBuf::from("/tmp"),
            idioms:           None,
            cohesive_markers: None,
            pronouns:         None,
            seed:             None,
            layout:           CorpusLayout::default(),
        }
    }
}

pub struct MetricsUseCase {
    config: MetricsConfig,
}

impl MetricsUseCase {
    pub fn new(config: MetricsConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<CorpusMetrics> {
        let cfg = &self.config;

        // ── Step 1: Lines → words ────────────────────────────────────────────
        let lines = ArtifactStore::new(&cfg.lines_dir, cfg.layout.clone())?.load_lines()?;
        let words: BTreeMap<LineClass, Vec<String>> = LineClass::ALL
            .iter()
            .map(|&class| (class, lines.words(class)))
            .collect();

        // ── Step 2: Lexicons ─────────────────────────────────────────────────
        let defaults = MetricLexicons::default();
        let lexicons = MetricLexicons {
            idioms:           override_or(defaults.idioms, cfg.idioms.as_deref())?,
            cohesive_markers: override_or(defaults.cohesive_markers, cfg.cohesive_markers.as_deref())?,
            pronouns:         override_or(defaults.pronouns, cfg.pronouns.as_deref())?,
        };

        // ── Step 3: Metrics ──────────────────────────────────────────────────
        let mut rng = seeded_rng(cfg.seed);
        let metrics = compute_all(&words, &lexicons, &mut rng)?;

        // ── Step 4: Save ─────────────────────────────────────────────────────
        ArtifactStore::new(&cfg.output_dir, cfg.layout.clone())?.save_metrics(&metrics)?;
        Ok(metrics)
    }
}

fn override_or(builtin: Lexicon, path: Option<&Path>) -> Result<Lexicon> {
    match path {
        Some(path) => Lexicon::load(builtin.name(), path)
            .with_context(|| format!("Cannot read {} list '{}'", builtin.name(), path.display())),
        None => Ok(builtin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::line_class::LinesByClass;
    use crate::features::metrics::Metric;

    fn lines_dir(fr: Vec<String>) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let mut lines = LinesByClass::default();
        lines.set(LineClass::EnNative, vec!["i think that by and large we are right".into()]);
        lines.set(LineClass::EnNonNative, vec!["we believe however that i am right".into()]);
        lines.set(LineClass::FrNative, fr);
        ArtifactStore::new(dir.path(), CorpusLayout::default())
            .unwrap()
            .save_lines(&lines)
            .unwrap();
        dir
    }

    fn config(dir: &Path) -> MetricsConfig {
        MetricsConfig {
            lines_dir:  dir.to_path_buf(),
            output_dir: dir.to_path_buf(),
            seed:       Some(4),
            ..MetricsConfig::default()
        }
    }

    #[test]
    fn test_metrics_normalised_and_saved() {
        let dir = lines_dir(vec!["they said also that it was fine".into()]);
        let metrics = MetricsUseCase::new(config(dir.path())).execute().unwrap();

        assert_eq!(metrics.token_count, 7);
        assert_eq!(metrics.metrics.len(), Metric::ALL.len());
        let richness = &metrics.metrics[0];
        let total: f64 = richness.normalized.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(dir.path().join("corpus-metrics.json").exists());
    }

    #[test]
    fn test_empty_class_has_no_token_budget() {
        let dir = lines_dir(Vec::new());
        assert!(MetricsUseCase::new(config(dir.path())).execute().is_err());
    }

    #[test]
    fn test_lexicon_override_from_file() {
        let dir = lines_dir(vec!["they said also that it was fine".into()]);
        let pronouns = dir.path().join("pronouns.txt");
        std::fs::write(&pronouns, "they\n").unwrap();

        let cfg = MetricsConfig { pronouns: Some(pronouns), ..config(dir.path()) };
        let metrics = MetricsUseCase::new(cfg).execute().unwrap();
        let report = metrics
            .metrics
            .iter()
            .find(|m| m.metric == Metric::PersonalPronouns)
            .unwrap();
        assert_eq!(report.raw[&LineClass::FrNative], 1);
        assert_eq!(report.raw[&LineClass::EnNative], 0);
    }
}
