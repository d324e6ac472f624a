// ============================================================
// Layer 3 — Pipeline Errors
// ============================================================
// Every failure the core can raise. All of them are fatal for a
// batch run except a marker that fails to decode during the
// collocation / cohesion scans, which is recovered in place and
// never surfaces here.

use thiserror::Error;

/// Errors raised by the corpus-to-feature-vector pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Duplicate or empty index lists, malformed annotation records
    #[error("validation failed: {0}")]
    Validation(String),

    /// Vector width mismatch, insufficient chunks, bad parameters
    #[error("configuration mismatch: {0}")]
    ConfigMismatch(String),

    /// A ratio whose denominator is zero (speaker without lines,
    /// class without tokens, metric summing to zero)
    #[error("division by zero: {0}")]
    DivisionByZero(String),

    /// A 1-based line index outside the corpus
    #[error("line index {index} out of bounds for a corpus of {len} lines")]
    IndexOutOfBounds { index: u64, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
