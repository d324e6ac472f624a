// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the raw corpus files and the classifier's
// input matrix.
//
// The pipeline flows in this order:
//
//   <pattern>.id
//       │
//       ▼
//   annotation        → one record per annotated corpus line
//       │
//       ▼
//   speakers          → per-speaker EN/FR line lists and ratios
//       │
//       ▼
//   separator         → line indices of the three classes
//       │
//       ▼
//   corpus            → the literal lines from <pattern>.en.tok
//       │
//       ▼
//   chunker           → fixed-size word chunks per class
//       │
//       ▼  (feature counts, Layer 5)
//   balancer          → equal samples per class, frequencies, labels
//       │
//       ▼
//   dataset           → the labelled matrix
//       │
//       ▼
//   splitter          → stratified cross-validation folds
//
// Each module is responsible for exactly one step.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Parses speaker annotation records
pub mod annotation;

/// Accumulates and finalises speaker statistics
pub mod speakers;

/// Separation policies and speaker classification
pub mod separator;

/// Index validation and line extraction from the corpus text
pub mod corpus;

/// Splits class lines into fixed-size word chunks
pub mod chunker;

/// Labelled feature rows for the classifier
pub mod dataset;

/// Equal-size sampling and count normalisation
pub mod balancer;

/// Stratified k-fold splits
pub mod splitter;
