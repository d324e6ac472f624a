// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File system concerns shared by the use cases:
//
//   layout.rs — where inputs and artifacts live
//               Maps a corpus path pattern to its .id and
//               .en.tok files and names every artifact.
//
//   store.rs  — artifact persistence
//               Writes and reads speakers, lines, vocabulary,
//               chunk counts and metrics as JSON so any stage
//               can resume from the previous one's output.
//
//   scores.rs — cross-validation results
//               Appends per-fold accuracy rows to a CSV file.
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Rust Book §12 (I/O and File Handling)

/// Input and artifact paths
pub mod layout;

/// JSON artifact store
pub mod store;

/// Per-fold accuracy CSV logger
pub mod scores;
