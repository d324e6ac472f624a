// ============================================================
// Layer 4 — Speaker Registry
// ============================================================
// Accumulates annotation records into per-speaker line lists,
// then finalises them into immutable Speaker values in one pass.
//
//   records ──► SpeakerRegistry::ingest ──► finalize_stats ──► BTreeMap<name, Speaker>
//
// The finalised map is keyed and ordered by speaker name, which is
// also the order the separator visits speakers in.

use std::collections::BTreeMap;

use crate::domain::error::PipelineResult;
use crate::domain::speaker::{AnnotationRecord, Language, Speaker};

#[derive(Debug, Default, Clone)]
struct PendingSpeaker {
    en_lines: Vec<u64>,
    fr_lines: Vec<u64>,
}

/// Speaker line lists under construction.
#[derive(Debug, Default)]
pub struct SpeakerRegistry {
    pending: BTreeMap<String, PendingSpeaker>,
}

impl SpeakerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from an ordered record stream
    pub fn ingest<I>(records: I) -> Self
    where
        I: IntoIterator<Item = AnnotationRecord>,
    {
        let mut registry = Self::new();
        for record in records {
            registry.add(record);
        }
        tracing::info!("Found {} speakers", registry.len());
        registry
    }

    /// Create-or-fetch the record's speaker and append its line index
    pub fn add(&mut self, record: AnnotationRecord) {
        let entry = self.pending.entry(record.speaker).or_default();
        match record.language {
            Language::En => entry.en_lines.push(record.line_index),
            Language::Fr => entry.fr_lines.push(record.line_index),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Compute every speaker's language ratios.
    /// Fails on the first speaker without lines.
    pub fn finalize_stats(self) -> PipelineResult<BTreeMap<String, Speaker>> {
        self.pending
            .into_iter()
            .map(|(name, lines)| {
                let speaker = Speaker::from_lines(name.clone(), lines.en_lines, lines.fr_lines)?;
                Ok((name, speaker))
            })
            .collect()
    }
}

/// Number of speakers per tenth of EN line percentage
/// (bucket 9 also holds speakers at exactly 100%).
pub fn en_percent_distribution(speakers: &BTreeMap<String, Speaker>) -> [usize; 10] {
    let mut buckets = [0usize; 10];
    for s in speakers.values() {
        let bucket = ((s.en_percent * 10.0).floor() as usize).min(9);
        buckets[bucket] += 1;
    }
    buckets
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<AnnotationRecord> {
        vec![
            AnnotationRecord::new(1, "Alice", Language::En),
            AnnotationRecord::new(2, "Alice", Language::Fr),
            AnnotationRecord::new(3, "Bob",   Language::En),
            AnnotationRecord::new(4, "Alice", Language::En),
        ]
    }

    #[test]
    fn test_ingest_keeps_stream_order() {
        let speakers = SpeakerRegistry::ingest(records()).finalize_stats().unwrap();
        assert_eq!(speakers.len(), 2);

        let alice = &speakers["Alice"];
        assert_eq!(alice.name, "Alice");
        assert_eq!(alice.en_lines, vec![1, 4]);
        assert_eq!(alice.fr_lines, vec![2]);
        assert!((alice.fr_percent - 1.0 / 3.0).abs() < 1e-12);

        let bob = &speakers["Bob"];
        assert_eq!(bob.en_percent, 1.0);
        assert_eq!(bob.fr_percent, 0.0);
    }

    #[test]
    fn test_empty_registry_finalizes_to_nothing() {
        let registry = SpeakerRegistry::new();
        assert_eq!(registry.len(), 0);
        assert!(registry.finalize_stats().unwrap().is_empty());
    }

    #[test]
    fn test_distribution_buckets() {
        let speakers = SpeakerRegistry::ingest(records()).finalize_stats().unwrap();
        let buckets  = en_percent_distribution(&speakers);
        // Alice 0.66 → bucket 6, Bob 1.0 → bucket 9
        assert_eq!(buckets[6], 1);
        assert_eq!(buckets[9], 1);
        assert_eq!(buckets.iter().sum::<usize>(), 2);
    }
}
