// ============================================================
// Layer 4 — Sample Balancer
// ============================================================
// Prepares per-class chunk counts for classification:
//
//   1. optionally shuffle each class's chunks
//   2. keep the same number of chunks from every class
//      (the requested sample size, or the smallest class)
//   3. turn counts into frequencies: count / chunk_size
//   4. label class i of the combination with i
//
// A class with fewer chunks than requested is a configuration
// error and stops the run.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::dataset::{LabeledDataset, Sample};
use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::line_class::LineClass;

/// Raw chunk count vectors of one class
pub type ClassCounts = (LineClass, Vec<Vec<u32>>);

/// Equal-size, frequency-normalised, labelled samples of two or
/// more classes.
pub fn balance_and_label<R: Rng + ?Sized>(
    chunks_by_class: &[ClassCounts],
    sample_size:     Option<usize>,
    chunk_size:      usize,
    rng:             Option<&mut R>,
) -> PipelineResult<LabeledDataset> {
    if chunks_by_class.len() < 2 {
        return Err(PipelineError::ConfigMismatch(format!(
            "classification needs at least 2 classes, got {}",
            chunks_by_class.len()
        )));
    }
    if chunk_size == 0 {
        return Err(PipelineError::ConfigMismatch("chunk_size must be positive".into()));
    }

    let available = chunks_by_class.iter().map(|(_, c)| c.len()).min().unwrap_or(0);
    let sample_size = match sample_size {
        Some(requested) => {
            for (class, chunks) in chunks_by_class {
                if chunks.len() < requested {
                    return Err(PipelineError::ConfigMismatch(format!(
                        "{class} has insufficient samples! It has only = {}, requested {requested}",
                        chunks.len()
                    )));
                }
            }
            requested
        }
        None => available,
    };
    if sample_size == 0 {
        return Err(PipelineError::ConfigMismatch("sample size of 0 chunks per class".into()));
    }

    let mut rng     = rng;
    let mut classes = Vec::with_capacity(chunks_by_class.len());
    let mut samples = Vec::with_capacity(sample_size * chunks_by_class.len());

    for (label, (class, chunks)) in chunks_by_class.iter().enumerate() {
        let mut picked: Vec<&Vec<u32>> = chunks.iter().collect();
        if let Some(rng) = rng.as_deref_mut() {
            picked.shuffle(rng);
        }
        picked.truncate(sample_size);

        tracing::debug!("{}: {} of {} chunks, label {}", class, picked.len(), chunks.len(), label);
        samples.extend(picked.into_iter().map(|counts| Sample {
            features: counts.iter().map(|&c| f64::from(c) / chunk_size as f64).collect(),
            label,
        }));
        classes.push(*class);
    }

    LabeledDataset::new(classes, samples)
}
