// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits that define what the
// pipeline talks about: speakers, the three line classes,
// the separation policy seam and the error taxonomy.
//
// Rules for this layer:
//   - NO file I/O
//   - NO feature extraction or model code
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

/// Error taxonomy shared by every layer
pub mod error;

/// A transcript speaker and the line indices they produced
pub mod speaker;

/// The three line classes and a validated assignment of indices to them
pub mod line_class;

/// Core abstractions (traits) that other layers implement
pub mod traits;
