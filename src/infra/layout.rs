// ============================================================
// Layer 6 — Corpus Layout
// ============================================================
// Where every input and artifact lives. A corpus is addressed by
// a path pattern: the common prefix of its two files
//
//   <pattern>.id       annotation records
//   <pattern>.en.tok   English (tokenised) corpus
//
// Artifacts are written into one output directory under fixed
// names, except the chunk counts which carry class and chunk size:
//
//   <KEY>-chunk-size-<N>-counts.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::line_class::LineClass;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusLayout {
    pub annotation_suffix: String,
    pub english_suffix:    String,
    pub speakers_file:     String,
    pub lines_file:        String,
    pub vocabulary_file:   String,
    pub metrics_file:      String,
    pub scores_file:       String,
}

impl Default for CorpusLayout {
    fn default() -> Self {
        Self {
            annotation_suffix: ".id".into(),
            english_suffix:    ".en.tok".into(),
            speakers_file:     "speakers-out.json".into(),
            lines_file:        "lines-out.json".into(),
            vocabulary_file:   "trigram-vocabulary.json".into(),
            metrics_file:      "corpus-metrics.json".into(),
            scores_file:       "scores.csv".into(),
        }
    }
}

impl CorpusLayout {
    pub fn annotation_path(&self, pattern: &str) -> PathBuf {
        with_suffix(pattern, &self.annotation_suffix)
    }

    /// The corpus every class is extracted from
    pub fn english_path(&self, pattern: &str) -> PathBuf {
        with_suffix(pattern, &self.english_suffix)
    }

    pub fn chunk_counts_file(class: LineClass, chunk_size: usize) -> String {
        format!("{}-chunk-size-{}-counts.json", class.key(), chunk_size)
    }

    pub fn speakers_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.speakers_file)
    }

    pub fn lines_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.lines_file)
    }

    pub fn vocabulary_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.vocabulary_file)
    }

    pub fn metrics_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.metrics_file)
    }

    pub fn scores_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.scores_file)
    }

    pub fn chunk_counts_path(&self, dir: &Path, class: LineClass, chunk_size: usize) -> PathBuf {
        dir.join(Self::chunk_counts_file(class, chunk_size))
    }
}

fn with_suffix(pattern: &str, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{pattern}{suffix}"))
}
