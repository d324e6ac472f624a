// ============================================================
// Layer 5 — Corpus Metrics
// ============================================================
// Four descriptive, non-chunked metrics per class, all measured on
// the same token budget: the word count of the smallest class.
//
//   Lexical richness   hapax legomena in a shuffled sample
//   Collocations       idiom occurrences in the space-joined sample
//   Cohesive markers   discourse marker occurrences, same scan
//   Personal pronouns  pronoun tokens in a (freshly) shuffled sample
//
// Every metric works on its own copy of the words. The shuffles
// draw from the injected RNG only, so a seeded run is repeatable.
//
// For reporting, each metric's class values are divided by their
// sum across classes, giving comparable zero-one scaled values.
// These numbers are descriptive only; the classifier never sees them.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::line_class::LineClass;
use crate::features::lexicon::{Lexicon, COHESIVE_MARKERS, IDIOMS, PRONOUNS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    LexicalRichness,
    Collocations,
    CohesiveMarkers,
    PersonalPronouns,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::LexicalRichness,
        Metric::Collocations,
        Metric::CohesiveMarkers,
        Metric::PersonalPronouns,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::LexicalRichness  => "Lexical richness",
            Metric::Collocations     => "Collocations",
            Metric::CohesiveMarkers  => "Cohesive markers",
            Metric::PersonalPronouns => "Personal pronouns",
        }
    }
}

/// The three lists the metrics search for.
#[derive(Debug, Clone)]
pub struct MetricLexicons {
    pub idioms:           Lexicon,
    pub cohesive_markers: Lexicon,
    pub pronouns:         Lexicon,
}

impl Default for MetricLexicons {
    fn default() -> Self {
        Self {
            idioms:           Lexicon::builtin("idioms", IDIOMS),
            cohesive_markers: Lexicon::builtin("cohesive markers", COHESIVE_MARKERS),
            pronouns:         Lexicon::builtin("pronouns", PRONOUNS),
        }
    }
}

fn shuffled_sample<'a, R: Rng + ?Sized>(words: &'a [String], token_count: usize, rng: &mut R) -> Vec<&'a str> {
    let mut sample: Vec<&str> = words.iter().map(String::as_str).collect();
    sample.shuffle(rng);
    sample.truncate(token_count);
    sample
}

fn frequencies<'a>(tokens: &[&'a str]) -> HashMap<&'a str, u64> {
    let mut freq = HashMap::new();
    for &t in tokens {
        *freq.entry(t).or_insert(0) += 1;
    }
    freq
}

/// Number of words occurring exactly once in a random sample of
/// `token_count` words.
pub fn lexical_richness<R: Rng + ?Sized>(words: &[String], token_count: usize, rng: &mut R) -> u64 {
    let sample = shuffled_sample(words, token_count, rng);
    frequencies(&sample).values().filter(|&&c| c == 1).count() as u64
}

/// Non-overlapping occurrences of every lexicon entry in the first
/// `token_count` words joined by single spaces.
fn substring_occurrences(words: &[String], token_count: usize, lexicon: &Lexicon) -> u64 {
    let end  = token_count.min(words.len());
    let text = words[..end].join(" ");
    lexicon
        .decoded()
        .map(|entry| match entry {
            Some(e) if !e.is_empty() => text.matches(e).count() as u64,
            _ => 0,
        })
        .sum()
}

pub fn collocations(words: &[String], token_count: usize, idioms: &Lexicon) -> u64 {
    substring_occurrences(words, token_count, idioms)
}

pub fn cohesive_markers(words: &[String], token_count: usize, markers: &Lexicon) -> u64 {
    substring_occurrences(words, token_count, markers)
}

/// Exact-token count of every pronoun in a random sample of
/// `token_count` words.
pub fn personal_pronouns<R: Rng + ?Sized>(
    words:       &[String],
    token_count: usize,
    pronouns:    &Lexicon,
    rng:         &mut R,
) -> u64 {
    let sample = shuffled_sample(words, token_count, rng);
    let freq   = frequencies(&sample);
    pronouns
        .decoded()
        .flatten()
        .map(|p| freq.get(p).copied().unwrap_or(0))
        .sum()
}

/// The shared token budget: the word count of the smallest class.
pub fn min_token_count(words: &BTreeMap<LineClass, Vec<String>>) -> PipelineResult<usize> {
    let min = words.values().map(Vec::len).min().unwrap_or(0);
    if min == 0 {
        return Err(PipelineError::DivisionByZero(
            "a class has no tokens to measure".into(),
        ));
    }
    Ok(min)
}

/// Divide each class's value by the sum over all classes.
pub fn normalize(results: &BTreeMap<LineClass, u64>) -> PipelineResult<BTreeMap<LineClass, f64>> {
    let total: u64 = results.values().sum();
    if total == 0 {
        return Err(PipelineError::DivisionByZero(
            "metric is zero for every class".into(),
        ));
    }
    Ok(results
        .iter()
        .map(|(&class, &value)| (class, value as f64 / total as f64))
        .collect())
}

/// One metric measured over every class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricReport {
    pub metric:     Metric,
    pub raw:        BTreeMap<LineClass, u64>,
    pub per_token:  BTreeMap<LineClass, f64>,
    pub normalized: BTreeMap<LineClass, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusMetrics {
    pub token_count: usize,
    pub metrics:     Vec<MetricReport>,
}

/// Measure all four metrics for every class.
pub fn compute_all<R: Rng + ?Sized>(
    words:    &BTreeMap<LineClass, Vec<String>>,
    lexicons: &MetricLexicons,
    rng:      &mut R,
) -> PipelineResult<CorpusMetrics> {
    let token_count = min_token_count(words)?;
    tracing::info!("Token amount for metric calculations = {}", token_count);

    let mut metrics = Vec::with_capacity(Metric::ALL.len());
    for metric in Metric::ALL {
        tracing::info!("Generating the {} metric from words", metric.name());

        let mut raw = BTreeMap::new();
        for (&class, class_words) in words {
            let value = match metric {
                Metric::LexicalRichness  => lexical_richness(class_words, token_count, rng),
                Metric::Collocations     => collocations(class_words, token_count, &lexicons.idioms),
                Metric::CohesiveMarkers  => cohesive_markers(class_words, token_count, &lexicons.cohesive_markers),
                Metric::PersonalPronouns => personal_pronouns(class_words, token_count, &lexicons.pronouns, rng),
            };
            tracing::info!(
                "{} for class {} = {:.6}",
                metric.name(),
                class,
                value as f64 / token_count as f64
            );
            raw.insert(class, value);
        }

        let normalized = normalize(&raw).map_err(|e| match e {
            PipelineError::DivisionByZero(msg) => {
                PipelineError::DivisionByZero(format!("{}: {msg}", metric.name()))
            }
            other => other,
        })?;
        for (class, value) in &normalized {
            tracing::info!("Normalized (total sum) for class {} = {:.6}", class, value);
        }

        let per_token = raw
            .iter()
            .map(|(&class, &value)| (class, value as f64 / token_count as f64))
            .collect();
        metrics.push(MetricReport { metric, raw, per_token, normalized });
    }

    Ok(CorpusMetrics { token_count, metrics })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_lexical_richness_counts_hapaxes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let w       = words("a a b c c c d");
        // Budget covers everything: b and d occur once
        assert_eq!(lexical_richness(&w, w.len(), &mut rng), 2);
    }

    #[test]
    fn test_lexical_richness_is_seeded() {
        let w = words("one two three four five six seven eight nine ten one two three");
        let a = lexical_richness(&w, 6, &mut ChaCha8Rng::seed_from_u64(9));
        let b = lexical_richness(&w, 6, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_collocations_scan_joined_prefix() {
        let idioms = Lexicon::builtin("idioms", &["by the way", "more or less"]);
        let w      = words("by the way it is more or less done by the way");
        assert_eq!(collocations(&w, w.len(), &idioms), 3);
        // Budget of 3 tokens only sees the first "by the way"
        assert_eq!(collocations(&w, 3, &idioms), 1);
    }

    #[test]
    fn test_undecodable_marker_contributes_zero() {
        let markers = Lexicon::from_bytes("markers", b"however\n\xff\xfe\n");
        let w       = words("however it went however");
        assert_eq!(cohesive_markers(&w, w.len(), &markers), 2);
    }

    #[test]
    fn test_personal_pronouns_exact_tokens() {
        let pronouns = Lexicon::builtin("pronouns", &["i", "we"]);
        let w        = words("i think we said it is in wind");
        let mut rng  = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(personal_pronouns(&w, w.len(), &pronouns, &mut rng), 2);
    }

    #[test]
    fn test_min_token_count_and_zero_budget() {
        let mut by_class = BTreeMap::new();
        by_class.insert(LineClass::EnNative, words("a b c"));
        by_class.insert(LineClass::FrNative, words("a b"));
        assert_eq!(min_token_count(&by_class).unwrap(), 2);

        by_class.insert(LineClass::EnNonNative, Vec::new());
        assert!(matches!(min_token_count(&by_class), Err(PipelineError::DivisionByZero(_))));
    }

    #[test]
    fn test_normalize() {
        let mut raw = BTreeMap::new();
        raw.insert(LineClass::EnNative, 1);
        raw.insert(LineClass::EnNonNative, 3);
        let n = normalize(&raw).unwrap();
        assert!((n[&LineClass::EnNative] - 0.25).abs() < 1e-12);
        assert!((n[&LineClass::EnNonNative] - 0.75).abs() < 1e-12);

        raw.insert(LineClass::EnNative, 0);
        raw.insert(LineClass::EnNonNative, 0);
        assert!(normalize(&raw).is_err());
    }

    #[test]
    fn test_compute_all_reports_every_metric() {
        let mut by_class = BTreeMap::new();
        by_class.insert(LineClass::EnNative,    words("i think in fact by the way we are here i"));
        by_class.insert(LineClass::EnNonNative, words("we believe however that you and i agree more or less"));
        by_class.insert(LineClass::FrNative,    words("they said also that it was so by and large fine"));

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let report  = compute_all(&by_class, &MetricLexicons::default(), &mut rng).unwrap();
        assert_eq!(report.token_count, 11);
        assert_eq!(report.metrics.len(), 4);
        for m in &report.metrics {
            let sum: f64 = m.normalized.values().sum();
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }
}
