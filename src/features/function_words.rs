// ============================================================
// Layer 5 — Function Word Counts
// ============================================================
// Closed-class words (articles, prepositions, conjunctions,
// pronouns, auxiliaries, ...) carry style rather than topic.
// Each chunk is reduced to the count of every word of a fixed
// list, one slot per word, in list order.

use std::collections::HashMap;

use crate::domain::error::{PipelineError, PipelineResult};

/// English function words in canonical slot order. No duplicates:
/// each entry owns exactly one slot of the feature vector.
pub const FUNCTION_WORDS: &[&str] = &[
    "the", "of", "and", "to", "a", "in", "that", "is", "was", "it", "for", "on", "with",
    "as", "be", "at", "by", "this", "had", "not", "are", "but", "from", "or", "have",
    "an", "they", "which", "you", "were", "her", "all", "she", "there", "would",
    "their", "we", "him", "been", "has", "when", "who", "will", "no", "if", "out", "so",
    "what", "up", "its", "about", "into", "than", "them", "can", "only", "other",
    "some", "could", "these", "two", "may", "then", "do", "any", "my", "now", "such",
    "our", "over", "me", "even", "most", "after", "also", "did", "many", "before",
    "must", "through", "back", "where", "much", "your", "way", "well", "down", "should",
    "because", "each", "just", "those", "how", "too", "very", "both", "between",
    "being", "under", "never", "same", "another", "while", "last", "might", "us", "off",
    "since", "against", "again", "once", "upon", "every", "does", "though", "until",
    "always", "something", "less", "enough", "far", "yet", "nothing", "why", "toward",
    "within", "along", "others", "whole", "itself", "either", "already", "themselves",
    "whose", "shall", "whether", "above", "across", "none", "rather", "several",
    "among", "although", "ever", "least", "thus", "perhaps", "sometimes", "therefore",
    "whom", "herself", "myself", "yourself", "ourselves", "yourselves", "himself",
    "hers", "ours", "yours", "mine", "theirs", "i", "he", "it's", "i'm", "don't",
    "can't", "won't", "isn't", "aren't", "wasn't", "weren't", "hasn't", "haven't",
    "hadn't", "doesn't", "didn't", "couldn't", "shouldn't", "wouldn't", "here",
    "there's", "that's", "one", "three", "four", "five", "first", "second", "anyone",
    "anybody", "anything", "everyone", "everybody", "everything", "someone", "somebody",
    "nobody", "nowhere", "somewhere", "anywhere", "everywhere", "whatever", "whichever",
    "whoever", "however", "whenever", "wherever", "beyond", "below", "beneath",
    "beside", "besides", "despite", "during", "except", "inside", "near", "onto",
    "outside", "past", "round", "throughout", "till", "towards", "underneath", "unlike",
    "unto", "via", "without", "according", "nor", "unless", "whereas", "whereby",
    "wherein", "neither", "hence", "thereby", "thereof", "am", "shan't", "mustn't",
    "ought", "might've", "could've", "would've", "should've", "cannot",
];

/// Count every word of `function_words` in `words`.
///
/// The output has exactly one slot per list entry; a chunk without
/// any function word yields an all-zero vector of the same width.
pub fn function_word_counts<S: AsRef<str>>(
    words:          &[S],
    function_words: &[&str],
) -> PipelineResult<Vec<u32>> {
    let mut freq: HashMap<&str, u32> = HashMap::with_capacity(words.len());
    for w in words {
        *freq.entry(w.as_ref()).or_insert(0) += 1;
    }

    let counts: Vec<u32> = function_words
        .iter()
        .map(|fw| freq.get(fw).copied().unwrap_or(0))
        .collect();

    if counts.len() != function_words.len() {
        return Err(PipelineError::ConfigMismatch(format!(
            "{} function word counts, expected {}",
            counts.len(),
            function_words.len()
        )));
    }
    Ok(counts)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_list_has_no_duplicates() {
        let unique: HashSet<&&str> = FUNCTION_WORDS.iter().collect();
        assert_eq!(unique.len(), FUNCTION_WORDS.len());
        assert_eq!(&FUNCTION_WORDS[..3], &["the", "of", "and"]);
    }

    #[test]
    fn test_counts_follow_list_order() {
        let words  = ["the", "cat", "and", "the", "hat"];
        let counts = function_word_counts(&words, &["and", "the", "of"]).unwrap();
        assert_eq!(counts, vec![1, 2, 0]);
    }

    #[test]
    fn test_width_is_fixed_even_without_function_words() {
        let words  = ["parliament", "budget", "fisheries"];
        let counts = function_word_counts(&words, FUNCTION_WORDS).unwrap();
        assert_eq!(counts.len(), FUNCTION_WORDS.len());
        assert!(counts.iter().all(|&c| c == 0));

        let empty: [&str; 0] = [];
        assert_eq!(
            function_word_counts(&empty, FUNCTION_WORDS).unwrap().len(),
            FUNCTION_WORDS.len()
        );
    }

    #[test]
    fn test_matching_is_exact() {
        let words  = ["The", "the", "theory"];
        let counts = function_word_counts(&words, &["the"]).unwrap();
        assert_eq!(counts, vec![1]);
    }
}
