// ============================================================
// Layer 5 — Stylometric Features
// ============================================================
// What a chunk of text is turned into before classification,
// and the descriptive statistics of each class.
//
//   function_words.rs — counts of closed-class English words
//   trigrams.rs       — corpus-wide top-N trigram vocabulary and
//                       per-chunk counts over it
//   extractor.rs      — both counters combined into one
//                       fixed-width vector per chunk
//   lexicon.rs        — idiom / cohesive marker / pronoun lists
//   metrics.rs        — lexical richness, collocations, cohesive
//                       markers and pronouns per class

/// Built-in function word list and counter
pub mod function_words;

/// Trigram vocabulary and counter
pub mod trigrams;

/// Per-chunk feature vectors
pub mod extractor;

/// Word and phrase lists for the corpus metrics
pub mod lexicon;

/// Descriptive corpus metrics
pub mod metrics;
