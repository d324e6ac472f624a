// ============================================================
// Layer 2 — FeaturesUseCase
// ============================================================
// Turns the lines of each class into chunk count vectors:
//
//   Step 1: Load lines-out.json                       (Layer 6)
//   Step 2: Build and save the trigram vocabulary
//           over the words of all classes, if enabled (Layer 5)
//   Step 3: Per class: chunk, count, save             (Layer 4/5/6)
//
// The vocabulary is built before the first chunk is counted and
// shared read-only by every class.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::application::seeded_rng;
use crate::data::chunker::Chunker;
use crate::domain::line_class::LineClass;
use crate::features::{
    extractor::FeatureExtractor,
    trigrams::{build_vocabulary, DEFAULT_TOP_N},
};
use crate::infra::{layout::CorpusLayout, store::ArtifactStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Directory holding lines-out.json
    pub lines_dir:      PathBuf,
    pub output_dir:     PathBuf,
    pub chunk_size:     usize,
    pub function_words: bool,
    pub trigrams:       bool,
    pub top_trigrams:   usize,
    /// Shuffle lines before chunking
    pub shuffle:        bool,
    pub seed:           Option<u64>,
    pub layout:         CorpusLayout,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            lines_dir:      PathBuf::from("/tmp"),
            output_dir:     PathBuf::from("/tmp"),
            chunk_size:     1000,
            function_words: false,
            trigrams:       false,
            top_trigrams:   DEFAULT_TOP_N,
            shuffle:        false,
            seed:           None,
            layout:         CorpusLayout::default(),
        }
    }
}

pub struct FeaturesUseCase {
    config: FeatureConfig,
}

impl FeaturesUseCase {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    /// Returns the number of chunks written per class.
    pub fn execute(&self) -> Result<BTreeMap<LineClass, usize>> {
        let cfg     = &self.config;
        let chunker = Chunker::new(cfg.chunk_size)?;
        let input   = ArtifactStore::new(&cfg.lines_dir, cfg.layout.clone())?;
        let output  = ArtifactStore::new(&cfg.output_dir, cfg.layout.clone())?;

        // ── Step 1: Lines ────────────────────────────────────────────────────
        let lines = input.load_lines()?;

        // ── Step 2: Trigram vocabulary ───────────────────────────────────────
        let vocabulary = if cfg.trigrams {
            tracing::info!("Generating trigram counts from words");
            let all_words: Vec<String> = LineClass::ALL
                .iter()
                .flat_map(|&class| lines.words(class))
                .collect();
            let vocabulary = build_vocabulary(&all_words, cfg.top_trigrams);
            output.save_vocabulary(&vocabulary)?;
            Some(vocabulary)
        } else {
            None
        };

        let extractor = FeatureExtractor::new(cfg.function_words, vocabulary.as_ref())?;
        tracing::info!("Chunk vectors have {} features", extractor.width());

        // ── Step 3: Chunk and count per class ────────────────────────────────
        let mut rng     = seeded_rng(cfg.seed);
        let mut written = BTreeMap::new();
        for class in LineClass::ALL {
            tracing::info!("Generating {} chunks of size={}", class, chunker.chunk_size());
            let chunks = chunker.chunk(lines.get(class), cfg.shuffle.then_some(&mut rng));

            tracing::info!("Analyzing {} chunks", chunks.len());
            let counts = extractor.extract_all(&chunks)?;
            output.save_chunk_counts(class, chunker.chunk_size(), &counts)?;
            written.insert(class, counts.len());
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::line_class::LinesByClass;
    use crate::features::function_words::FUNCTION_WORDS;

    fn lines_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let mut lines = LinesByClass::default();
        lines.set(LineClass::EnNative, vec!["the cat sat on the mat".into(); 4]);
        lines.set(LineClass::EnNonNative, vec!["we are of the opinion that".into(); 3]);
        lines.set(LineClass::FrNative, vec!["it is a question of time".into(); 2]);
        ArtifactStore::new(dir.path(), CorpusLayout::default())
            .unwrap()
            .save_lines(&lines)
            .unwrap();
        dir
    }

    fn config(dir: &std::path::Path) -> FeatureConfig {
        FeatureConfig {
            lines_dir:  dir.to_path_buf(),
            output_dir: dir.to_path_buf(),
            chunk_size: 10,
            ..FeatureConfig::default()
        }
    }

    #[test]
    fn test_function_word_chunks_per_class() {
        let dir = lines_dir();
        let cfg = FeatureConfig { function_words: true, ..config(dir.path()) };
        let written = FeaturesUseCase::new(cfg).execute().unwrap();

        // 24, 18 and 12 words in chunks of >= 10 words (lines of 6)
        assert_eq!(written[&LineClass::EnNative], 2);
        assert_eq!(written[&LineClass::EnNonNative], 1);
        assert_eq!(written[&LineClass::FrNative], 1);

        let store  = ArtifactStore::new(dir.path(), CorpusLayout::default()).unwrap();
        let counts = store.load_chunk_counts(LineClass::EnNative, 10).unwrap();
        assert!(counts.iter().all(|c| c.len() == FUNCTION_WORDS.len()));
        // Two six-word lines per chunk, "the" twice in each
        assert_eq!(counts[0][0], 4);
    }

    #[test]
    fn test_trigrams_share_one_vocabulary() {
        let dir = lines_dir();
        let cfg = FeatureConfig { trigrams: true, top_trigrams: 5, ..config(dir.path()) };
        FeaturesUseCase::new(cfg).execute().unwrap();

        let store = ArtifactStore::new(dir.path(), CorpusLayout::default()).unwrap();
        let json  = std::fs::read_to_string(dir.path().join("trigram-vocabulary.json")).unwrap();
        let vocab: crate::features::trigrams::TrigramVocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(vocab.len(), 5);
        for class in LineClass::ALL {
            for counts in store.load_chunk_counts(class, 10).unwrap() {
                assert_eq!(counts.len(), 5);
            }
        }
    }

    #[test]
    fn test_no_counter_selected() {
        let dir = lines_dir();
        assert!(FeaturesUseCase::new(config(dir.path())).execute().is_err());
    }
}
