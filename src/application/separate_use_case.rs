// ============================================================
// Layer 2 — SeparateUseCase
// ============================================================
// Turns the annotated corpus into three classes of text lines:
//
//   Step 1: Parse annotations, finalise speaker stats (Layer 4)
//           or reload them from speakers-out.json     (Layer 6)
//   Step 2: Classify speakers with the chosen policy  (Layer 4)
//   Step 3: Extract each class's lines from the
//           English corpus                            (Layer 4)
//   Step 4: Save lines-out.json                       (Layer 6)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::{
    annotation::AnnotationFile,
    corpus::{self, CorpusText},
    separator::{classify, PolicyKind},
    speakers::{en_percent_distribution, SpeakerRegistry},
};
use crate::domain::line_class::{LineClass, LinesByClass};
use crate::domain::traits::AnnotationSource;
use crate::infra::{layout::CorpusLayout, store::ArtifactStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeparateConfig {
    /// Common prefix of the .id and .en.tok files
    pub file_pattern:       String,
    pub output_dir:         PathBuf,
    pub threshold:          f64,
    pub policy:             PolicyKind,
    /// Reuse speakers-out.json instead of parsing annotations
    pub speakers_from_file: bool,
    pub layout:             CorpusLayout,
}

impl Default for SeparateConfig {
    fn default() -> Self {
        Self {
            file_pattern:       String::new(),
            output_dir:         PathBuf::from("/tmp"),
            threshold:          0.5,
            policy:             PolicyKind::default(),
            speakers_from_file: false,
            layout:             CorpusLayout::default(),
        }
    }
}

pub struct SeparateUseCase {
    config: SeparateConfig,
}

impl SeparateUseCase {
    pub fn new(config: SeparateConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<LinesByClass> {
        let cfg   = &self.config;
        let store = ArtifactStore::new(&cfg.output_dir, cfg.layout.clone())?;

        // ── Step 1: Speaker statistics ───────────────────────────────────────
        let speakers = if cfg.speakers_from_file {
            store.load_speakers()?
        } else {
            let path = cfg.layout.annotation_path(&cfg.file_pattern);
            tracing::info!("Reading speaker annotations from '{}'", path.display());
            let records = AnnotationFile::new(&path)
                .records()
                .with_context(|| format!("Cannot read annotations from '{}'", path.display()))?;
            let speakers = SpeakerRegistry::ingest(records).finalize_stats()?;
            store.save_speakers(&speakers)?;
            speakers
        };

        for (bucket, n) in en_percent_distribution(&speakers).iter().enumerate() {
            tracing::debug!("EN {:>3}%-{:>3}%: {} speakers", bucket * 10, bucket * 10 + 10, n);
        }

        // ── Step 2: Classify ─────────────────────────────────────────────────
        let policy     = cfg.policy.build(cfg.threshold)?;
        let assignment = classify(&speakers, policy.as_ref())?;

        // ── Step 3: Extract lines ────────────────────────────────────────────
        // Every class reads the English corpus
        let corpus_path = cfg.layout.english_path(&cfg.file_pattern);
        tracing::info!("Extracting class lines from '{}'", corpus_path.display());
        let corpus_lines = CorpusText::new(&corpus_path)
            .load()
            .with_context(|| format!("Cannot read corpus '{}'", corpus_path.display()))?;

        let mut lines = LinesByClass::default();
        for class in LineClass::ALL {
            let extracted = corpus::extract(assignment.get(class), &corpus_lines)
                .with_context(|| format!("Cannot extract {class} from '{}'", corpus_path.display()))?;
            lines.set(class, extracted);
        }

        // ── Step 4: Save ─────────────────────────────────────────────────────
        store.save_lines(&lines)?;
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fixtures::write_corpus;

    fn config(dir: &std::path::Path) -> SeparateConfig {
        SeparateConfig {
            file_pattern: write_corpus(dir),
            output_dir:   dir.join("out"),
            ..SeparateConfig::default()
        }
    }

    #[test]
    fn test_alice_native_bob_non_native() {
        let dir   = tempfile::tempdir().unwrap();
        let lines = SeparateUseCase::new(config(dir.path())).execute().unwrap();

        assert_eq!(lines.en_native, vec!["the house is red", "we agree with the motion"]);
        assert_eq!(lines.en_non_native, vec!["in fact it is so"]);
        assert_eq!(lines.fr_native, vec!["thank you madam president"]);

        assert!(dir.path().join("out/speakers-out.json").exists());
        assert!(dir.path().join("out/lines-out.json").exists());
    }

    #[test]
    fn test_speakers_reloaded_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());
        SeparateUseCase::new(cfg.clone()).execute().unwrap();

        // Without the annotation file only the saved stats can work
        std::fs::remove_file(format!("{}.id", cfg.file_pattern)).unwrap();
        let reloaded = SeparateUseCase::new(SeparateConfig { speakers_from_file: true, ..cfg })
            .execute()
            .unwrap();
        assert_eq!(reloaded.en_non_native, vec!["in fact it is so"]);
    }

    #[test]
    fn test_everyone_native_leaves_a_class_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = SeparateConfig { threshold: 1.0, ..config(dir.path()) };
        let err = SeparateUseCase::new(cfg).execute().unwrap_err();
        assert!(format!("{err:#}").contains("empty"));
    }

    #[test]
    fn test_out_of_range_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = SeparateConfig { threshold: 1.5, ..config(dir.path()) };
        assert!(SeparateUseCase::new(cfg).execute().is_err());
    }
}
