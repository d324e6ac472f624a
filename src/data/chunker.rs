// ============================================================
// Layer 4 — Word Chunker
// ============================================================
// Splits a class's lines into fixed-size word chunks, the unit of
// feature extraction and classification.
//
// Algorithm:
//   - optionally shuffle the lines (whole lines, never words)
//   - append each line's whitespace-split words to a buffer
//   - as soon as the buffer holds >= chunk_size words, emit it
//     and start a new one
//   - the final partial buffer is discarded
//
// A chunk is flushed only at a line boundary, so it may exceed
// chunk_size by less than one line's length, and consecutive
// chunks never overlap.
//
// Example with chunk_size=5:
//   Lines:   "a b c" | "d e f g" | "h i"
//   Chunk 1: a b c d e f g        (7 words, flushed after line 2)
//   Tail:    h i                  (2 words, dropped)
//
// Reference: Rust Book §8 (Slices)

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::error::{PipelineError, PipelineResult};

/// An ordered run of at least `chunk_size` words.
pub type Chunk = Vec<String>;

pub struct Chunker {
    /// Minimum number of words per chunk
    chunk_size: usize,
}

impl Chunker {
    /// Create a new Chunker. A zero chunk size would emit an empty
    /// chunk per line and is rejected.
    pub fn new(chunk_size: usize) -> PipelineResult<Self> {
        if chunk_size == 0 {
            return Err(PipelineError::ConfigMismatch("chunk_size must be positive".into()));
        }
        Ok(Self { chunk_size })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Chunk `lines` in file order, or in a random line order when an
    /// RNG is supplied.
    pub fn chunk<S, R>(&self, lines: &[S], rng: Option<&mut R>) -> Vec<Chunk>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let mut order: Vec<&str> = lines.iter().map(|line| line.as_ref()).collect();
        if let Some(rng) = rng {
            order.shuffle(rng);
        }

        let mut chunks  = Vec::new();
        let mut current = Vec::with_capacity(self.chunk_size);

        for line in order {
            current.extend(line.split_whitespace().map(str::to_string));
            if current.len() >= self.chunk_size {
                chunks.push(std::mem::replace(
                    &mut current,
                    Vec::with_capacity(self.chunk_size),
                ));
            }
        }

        tracing::debug!(
            "Chunked {} lines into {} chunks of >= {} words ({} trailing words dropped)",
            lines.len(),
            chunks.len(),
            self.chunk_size,
            current.len()
        );
        chunks
    }
}
