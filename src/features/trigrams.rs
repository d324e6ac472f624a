// ============================================================
// Layer 5 — Trigram Vocabulary and Counts
// ============================================================
// Every chunk also gets one count per entry of a corpus-wide
// trigram vocabulary: the top-N most frequent three-token windows
// over the words of ALL classes together.
//
// The vocabulary is built exactly once, before any chunk is
// counted, and never changes afterwards. Every chunk of every
// class is counted against the same slots.
//
// Ranking: descending frequency, ties broken by the position of
// the trigram's first occurrence, so the same word stream always
// yields the same ordered vocabulary.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Three consecutive tokens
pub type Trigram = [String; 3];

type TrigramRef<'a> = (&'a str, &'a str, &'a str);

/// Default vocabulary size
pub const DEFAULT_TOP_N: usize = 3000;

/// Frozen, ordered trigram vocabulary. Slot i of a trigram count
/// vector belongs to the i-th trigram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrigramVocabulary {
    trigrams: Vec<Trigram>,
}

impl From<Vec<Trigram>> for TrigramVocabulary {
    fn from(trigrams: Vec<Trigram>) -> Self {
        Self { trigrams }
    }
}

impl TrigramVocabulary {
    pub fn len(&self) -> usize {
        self.trigrams.len()
    }
}

fn windows<S: AsRef<str>>(words: &[S]) -> impl Iterator<Item = TrigramRef<'_>> {
    words
        .windows(3)
        .map(|w| (w[0].as_ref(), w[1].as_ref(), w[2].as_ref()))
}

/// Rank all trigrams of `all_words` and keep the `top_n` most frequent.
pub fn build_vocabulary<S: AsRef<str>>(all_words: &[S], top_n: usize) -> TrigramVocabulary {
    tracing::info!("Calculating {} most common trigrams in corpus", top_n);

    // trigram → (count, first position)
    let mut stats: HashMap<TrigramRef<'_>, (u32, usize)> = HashMap::new();
    for (pos, t) in windows(all_words).enumerate() {
        stats.entry(t).or_insert((0, pos)).0 += 1;
    }

    let mut ranked: Vec<(TrigramRef<'_>, u32, usize)> = stats
        .into_iter()
        .map(|(t, (count, first))| (t, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(top_n);

    let trigrams: Vec<Trigram> = ranked
        .into_iter()
        .map(|((a, b, c), _, _)| [a.to_string(), b.to_string(), c.to_string()])
        .collect();
    tracing::debug!("Trigram vocabulary holds {} entries", trigrams.len());
    TrigramVocabulary::from(trigrams)
}

/// Count every vocabulary trigram among the overlapping windows of
/// `words`, in vocabulary order.
pub fn pos_trigram_counts<S: AsRef<str>>(words: &[S], vocabulary: &TrigramVocabulary) -> Vec<u32> {
    let mut freq: HashMap<TrigramRef<'_>, u32> = HashMap::new();
    for t in windows(words) {
        *freq.entry(t).or_insert(0) += 1;
    }
    vocabulary
        .trigrams
        .iter()
        .map(|[a, b, c]| {
            freq.get(&(a.as_str(), b.as_str(), c.as_str()))
                .copied()
                .unwrap_or(0)
        })
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    fn t(a: &str, b: &str, c: &str) -> Trigram {
        [a.to_string(), b.to_string(), c.to_string()]
    }

    #[test]
    fn test_ranking_by_frequency_then_first_encounter() {
        // "a b c" twice, every other trigram once in order of appearance
        let w     = words("a b c a b c x y z");
        let vocab = build_vocabulary(&w, 10);
        assert_eq!(vocab.trigrams[0], t("a", "b", "c"));
        assert_eq!(vocab.trigrams[1], t("b", "c", "a"));
        assert_eq!(vocab.trigrams[2], t("c", "a", "b"));
        assert_eq!(vocab.len(), 6);
    }

    #[test]
    fn test_top_n_truncates() {
        let w = words("a b c d e f g");
        assert_eq!(build_vocabulary(&w, 2).len(), 2);
        assert_eq!(build_vocabulary(&w, 100).len(), 5);
        assert_eq!(build_vocabulary(&words("a b"), 10).len(), 0);
    }

    #[test]
    fn test_vocabulary_is_idempotent() {
        let w = words("the cat sat on the mat and the cat sat on the hat again");
        let a = build_vocabulary(&w, 5);
        let b = build_vocabulary(&w, 5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_counts_use_overlapping_windows() {
        let vocab  = TrigramVocabulary::from(vec![t("a", "a", "a"), t("q", "q", "q")]);
        let counts = pos_trigram_counts(&words("a a a a"), &vocab);
        assert_eq!(counts, vec![2, 0]);
    }

    #[test]
    fn test_serialises_as_plain_list() {
        let vocab = TrigramVocabulary::from(vec![t("x", "y", "z")]);
        let json  = serde_json::to_string(&vocab).unwrap();
        assert_eq!(json, r#"[["x","y","z"]]"#);
        let back: TrigramVocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vocab);
    }
}
