// ============================================================
// Layer 2 — RunUseCase
// ============================================================
// Every stage in order, each reading what the previous one saved:
//
//   separate → chunk-counts → metrics → evaluate

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::application::{
    evaluate_use_case::{EvaluateConfig, EvaluateUseCase},
    features_use_case::{FeatureConfig, FeaturesUseCase},
    metrics_use_case::{MetricsConfig, MetricsUseCase},
    separate_use_case::{SeparateConfig, SeparateUseCase},
};
use crate::domain::line_class::LineClass;
use crate::features::metrics::CorpusMetrics;
use crate::ml::cross_validation::CrossValidationReport;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub separate: SeparateConfig,
    pub features: FeatureConfig,
    pub metrics:  MetricsConfig,
    pub evaluate: EvaluateConfig,
}

#[derive(Debug)]
pub struct RunSummary {
    pub lines:   BTreeMap<LineClass, usize>,
    pub chunks:  BTreeMap<LineClass, usize>,
    pub metrics: CorpusMetrics,
    pub reports: Vec<CrossValidationReport>,
}

pub struct RunUseCase {
    config: PipelineConfig,
}

impl RunUseCase {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<RunSummary> {
        let cfg = &self.config;

        tracing::info!("Stage 1/4: separating lines by speaker class");
        let lines = SeparateUseCase::new(cfg.separate.clone()).execute()?;

        tracing::info!("Stage 2/4: counting chunk features");
        let chunks = FeaturesUseCase::new(cfg.features.clone()).execute()?;

        tracing::info!("Stage 3/4: corpus metrics");
        let metrics = MetricsUseCase::new(cfg.metrics.clone()).execute()?;

        tracing::info!("Stage 4/4: cross-validated classification");
        let reports = EvaluateUseCase::new(cfg.evaluate.clone()).execute()?;

        Ok(RunSummary {
            lines: LineClass::ALL
                .iter()
                .map(|&class| (class, lines.get(class).len()))
                .collect(),
            chunks,
            metrics,
            reports,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;
    use std::path::Path;

    /// 90 lines: Alice speaks only English, Bob alternates English
    /// and French lines, so each class gets 30 eight-word lines.
    /// Every line ends in a unique token.
    fn write_corpus(dir: &Path) -> String {
        let pattern = dir.join("session").to_string_lossy().into_owned();
        let mut ids    = String::new();
        let mut corpus = String::new();
        for i in 1..=90u32 {
            let (name, lang, text) = match i % 3 {
                1 => ("Alice", "EN", "the house of the people is here"),
                2 => ("Bob",   "EN", "we are in fact of the opinion"),
                _ => ("Bob",   "FR", "it is more or less our time"),
            };
            writeln!(ids, r#"<LINE COUNT="{i}" NAME="{name}" LANGUAGE="{lang}"/>"#).unwrap();
            writeln!(corpus, "{text} token{i}").unwrap();
        }
        std::fs::write(format!("{pattern}.id"), ids).unwrap();
        std::fs::write(format!("{pattern}.en.tok"), corpus).unwrap();
        pattern
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let pattern = write_corpus(dir.path());

        let config = PipelineConfig {
            separate: SeparateConfig {
                file_pattern: pattern,
                output_dir:   out.clone(),
                ..SeparateConfig::default()
            },
            features: FeatureConfig {
                lines_dir:      out.clone(),
                output_dir:     out.clone(),
                chunk_size:     8,
                function_words: true,
                ..FeatureConfig::default()
            },
            metrics: MetricsConfig {
                lines_dir:  out.clone(),
                output_dir: out.clone(),
                seed:       Some(1),
                ..MetricsConfig::default()
            },
            evaluate: EvaluateConfig {
                input_dir:   out.clone(),
                output_dir:  out.clone(),
                chunk_size:  8,
                sample_size: Some(10),
                k_folds:     5,
                seed:        Some(1),
                ..EvaluateConfig::default()
            },
        };

        let summary = RunUseCase::new(config).execute().unwrap();
        for class in LineClass::ALL {
            assert_eq!(summary.lines[&class], 30);
            assert_eq!(summary.chunks[&class], 30);
        }
        assert_eq!(summary.reports.len(), 4);
        assert!(summary.reports.iter().all(|r| r.fold_scores.len() == 5));
        assert_eq!(summary.metrics.token_count, 240);

        for file in [
            "speakers-out.json",
            "lines-out.json",
            "EN_LINES-chunk-size-8-counts.json",
            "corpus-metrics.json",
            "scores.csv",
        ] {
            assert!(out.join(file).exists(), "{file} missing");
        }
    }
}
