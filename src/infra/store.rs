// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Saves and restores every intermediate result as JSON so each
// pipeline stage can be re-run from the previous stage's files.
//
// What gets saved, in pipeline order:
//   1. speakers-out.json              — per-speaker statistics
//   2. lines-out.json                 — text lines of each class
//   3. trigram-vocabulary.json        — the frozen vocabulary
//   4. <KEY>-chunk-size-<N>-counts.json — count vectors per class
//   5. corpus-metrics.json            — descriptive metrics
//
// Speaker names are the keys of the statistics object, and the
// object is written with sorted keys (the speaker map is ordered),
// so the file is stable across runs.
//
// File naming lives in CorpusLayout; this type only does I/O.

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::domain::line_class::{LineClass, LinesByClass};
use crate::domain::speaker::Speaker;
use crate::features::metrics::CorpusMetrics;
use crate::features::trigrams::TrigramVocabulary;
use crate::infra::layout::CorpusLayout;

/// Reads and writes pipeline artifacts under one directory.
pub struct ArtifactStore {
    dir:    PathBuf,
    layout: CorpusLayout,
}

impl ArtifactStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>, layout: CorpusLayout) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;
        Ok(Self { dir, layout })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn layout(&self) -> &CorpusLayout {
        &self.layout
    }

    // ── Speakers ──────────────────────────────────────────────────────────────

    pub fn save_speakers(&self, speakers: &BTreeMap<String, Speaker>) -> Result<PathBuf> {
        let path = self.layout.speakers_path(&self.dir);
        write_json(&path, speakers)?;
        tracing::info!("Saved {} speakers to '{}'", speakers.len(), path.display());
        Ok(path)
    }

    /// Names are not stored inside each record; they come back from
    /// the object keys.
    pub fn load_speakers(&self) -> Result<BTreeMap<String, Speaker>> {
        let path = self.layout.speakers_path(&self.dir);
        let mut speakers: BTreeMap<String, Speaker> = read_json(&path)?;
        for (name, speaker) in speakers.iter_mut() {
            speaker.name = name.clone();
        }
        tracing::info!("Loaded {} speakers from '{}'", speakers.len(), path.display());
        Ok(speakers)
    }

    // ── Lines ─────────────────────────────────────────────────────────────────

    pub fn save_lines(&self, lines: &LinesByClass) -> Result<PathBuf> {
        let path = self.layout.lines_path(&self.dir);
        write_json(&path, lines)?;
        tracing::info!("Saved lines by class to '{}'", path.display());
        Ok(path)
    }

    pub fn load_lines(&self) -> Result<LinesByClass> {
        let path = self.layout.lines_path(&self.dir);
        let lines = read_json(&path).with_context(|| {
            "Run 'separate' first, or point --output at a directory holding the lines file"
        })?;
        tracing::info!("Loaded lines by class from '{}'", path.display());
        Ok(lines)
    }

    // ── Vocabulary ────────────────────────────────────────────────────────────

    pub fn save_vocabulary(&self, vocabulary: &TrigramVocabulary) -> Result<PathBuf> {
        let path = self.layout.vocabulary_path(&self.dir);
        write_json(&path, vocabulary)?;
        tracing::debug!("Saved {} trigrams to '{}'", vocabulary.len(), path.display());
        Ok(path)
    }

    // ── Chunk counts ──────────────────────────────────────────────────────────

    pub fn save_chunk_counts(
        &self,
        class:      LineClass,
        chunk_size: usize,
        counts:     &[Vec<u32>],
    ) -> Result<PathBuf> {
        let path = self.layout.chunk_counts_path(&self.dir, class, chunk_size);
        write_json(&path, &counts)?;
        tracing::info!("Saved {} chunk vectors of {} to '{}'", counts.len(), class, path.display());
        Ok(path)
    }

    pub fn load_chunk_counts(&self, class: LineClass, chunk_size: usize) -> Result<Vec<Vec<u32>>> {
        let path = self.layout.chunk_counts_path(&self.dir, class, chunk_size);
        read_json(&path).with_context(|| {
            format!("Run 'chunk-counts' with --chunk-size {chunk_size} first")
        })
    }

    // ── Corpus metrics ────────────────────────────────────────────────────────

    pub fn save_metrics(&self, metrics: &CorpusMetrics) -> Result<PathBuf> {
        let path = self.layout.metrics_path(&self.dir);
        write_json(&path, metrics)?;
        tracing::info!("Saved corpus metrics to '{}'", path.display());
        Ok(path)
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Cannot write '{}'", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Malformed JSON in '{}'", path.display()))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::trigrams::build_vocabulary;

    fn store() -> (tempfile::TempDir, ArtifactStore) {
        let dir   = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("out"), CorpusLayout::default()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_speakers_keep_names_and_key_order() {
        let (_dir, store) = store();
        let mut speakers = BTreeMap::new();
        for (name, en, fr) in [("Bob", vec![3], vec![4]), ("Alice", vec![1, 2], vec![])] {
            speakers.insert(name.to_string(), Speaker::from_lines(name, en, fr).unwrap());
        }
        let path = store.save_speakers(&speakers).unwrap();

        let text = fs::read_to_string(path).unwrap();
        assert!(text.find("\"Alice\"").unwrap() < text.find("\"Bob\"").unwrap());
        assert!(text.contains("\"EN_PERCENT\""));

        let loaded = store.load_speakers().unwrap();
        assert_eq!(loaded, speakers);
        assert_eq!(loaded["Bob"].name, "Bob");
    }

    #[test]
    fn test_lines_round_trip() {
        let (_dir, store) = store();
        let mut lines = LinesByClass::default();
        lines.set(LineClass::EnNative, vec!["hello there".into()]);
        lines.set(LineClass::FrNative, vec!["good day".into()]);
        store.save_lines(&lines).unwrap();
        assert_eq!(store.load_lines().unwrap(), lines);
    }

    #[test]
    fn test_chunk_counts_file_name() {
        let (_dir, store) = store();
        let path = store
            .save_chunk_counts(LineClass::EnNative, 1000, &[vec![1, 2], vec![0, 3]])
            .unwrap();
        assert!(path.ends_with("EN_LINES-chunk-size-1000-counts.json"));
        assert_eq!(
            store.load_chunk_counts(LineClass::EnNative, 1000).unwrap(),
            vec![vec![1, 2], vec![0, 3]]
        );
        assert!(store.load_chunk_counts(LineClass::EnNative, 500).is_err());
    }

    #[test]
    fn test_vocabulary_keeps_rank_order() {
        let (_dir, store) = store();
        let words: Vec<&str> = "a b c a b c d".split(' ').collect();
        let vocab = build_vocabulary(&words, 10);
        let path = store.save_vocabulary(&vocab).unwrap();
        let back: TrigramVocabulary = read_json(&path).unwrap();
        assert_eq!(back, vocab);
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let (_dir, store) = store();
        let err = store.load_lines().unwrap_err();
        assert!(format!("{err:#}").contains("lines-out.json"));
    }
}
