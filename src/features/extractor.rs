// ============================================================
// Layer 5 — Chunk Feature Extractor
// ============================================================
// Combines the enabled counters into one fixed-width count vector
// per chunk. Slot layout:
//
//   [ function word counts (list order) | trigram counts (vocabulary order) ]
//
// Either part may be disabled, not both. The width is fixed by the
// configuration, so vectors of every class can be stacked into one
// matrix later.

use crate::domain::error::{PipelineError, PipelineResult};
use crate::features::function_words::{function_word_counts, FUNCTION_WORDS};
use crate::features::trigrams::{pos_trigram_counts, TrigramVocabulary};

pub struct FeatureExtractor<'v> {
    function_words: Option<&'v [&'v str]>,
    trigrams:       Option<&'v TrigramVocabulary>,
}

impl<'v> FeatureExtractor<'v> {
    /// Extractor over the built-in function word list and/or a frozen
    /// trigram vocabulary.
    pub fn new(
        use_function_words: bool,
        trigrams:           Option<&'v TrigramVocabulary>,
    ) -> PipelineResult<Self> {
        let function_words = use_function_words.then_some(FUNCTION_WORDS);
        Self::with_function_words(function_words, trigrams)
    }

    pub fn with_function_words(
        function_words: Option<&'v [&'v str]>,
        trigrams:       Option<&'v TrigramVocabulary>,
    ) -> PipelineResult<Self> {
        if function_words.is_none() && trigrams.is_none() {
            return Err(PipelineError::ConfigMismatch(
                "no counter selected for chunks; enable function words and/or trigrams".into(),
            ));
        }
        Ok(Self { function_words, trigrams })
    }

    /// Length of every vector this extractor produces
    pub fn width(&self) -> usize {
        self.function_words.map_or(0, |list| list.len())
            + self.trigrams.map_or(0, |vocab| vocab.len())
    }

    /// Count vector of one chunk
    pub fn extract<S: AsRef<str>>(&self, chunk: &[S]) -> PipelineResult<Vec<u32>> {
        let mut counts = Vec::with_capacity(self.width());
        if let Some(list) = self.function_words {
            counts.extend(function_word_counts(chunk, list)?);
        }
        if let Some(vocab) = self.trigrams {
            counts.extend(pos_trigram_counts(chunk, vocab));
        }

        if counts.len() != self.width() {
            return Err(PipelineError::ConfigMismatch(format!(
                "feature vector has {} slots, expected {}",
                counts.len(),
                self.width()
            )));
        }
        Ok(counts)
    }

    /// Count vectors of many chunks, in order
    pub fn extract_all<S: AsRef<str>>(&self, chunks: &[Vec<S>]) -> PipelineResult<Vec<Vec<u32>>> {
        chunks.iter().map(|c| self.extract(c)).collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::trigrams::build_vocabulary;

    #[test]
    fn test_function_words_come_first() {
        let vocab = build_vocabulary(&["x", "y", "z"], 10);
        let ex    = FeatureExtractor::with_function_words(Some(&["the", "of"][..]), Some(&vocab)).unwrap();
        assert_eq!(ex.width(), 3);

        let v = ex.extract(&["x", "y", "z", "the"]).unwrap();
        assert_eq!(v, vec![1, 0, 1]);
    }

    #[test]
    fn test_width_is_constant_across_chunks() {
        let corpus = ["a", "b", "c", "the", "a", "b", "c", "of"];
        let vocab  = build_vocabulary(&corpus, 3);
        let ex     = FeatureExtractor::new(true, Some(&vocab)).unwrap();

        let chunks = vec![
            vec!["a", "b", "c"],
            vec!["nothing", "in", "common", "here", "at", "all"],
            vec![],
        ];
        for v in ex.extract_all(&chunks).unwrap() {
            assert_eq!(v.len(), FUNCTION_WORDS.len() + 3);
        }
    }

    #[test]
    fn test_requires_a_counter() {
        assert!(matches!(
            FeatureExtractor::new(false, None),
            Err(PipelineError::ConfigMismatch(_))
        ));
    }
}
