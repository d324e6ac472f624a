// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// One use case per pipeline stage, plus one that chains them:
//
//   separate      .id + .en.tok      → speakers, lines by class
//   chunk-counts  lines by class     → count vectors per class
//   metrics       lines by class     → corpus metrics
//   evaluate      count vectors      → cross-validated accuracy
//   run           all of the above, in order
//
// Rules for this layer:
//   - No feature math or classifier code here
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Stages talk to each other through the artifact store, so any
// stage can be re-run alone on the previous stage's files.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Speaker statistics and line separation
pub mod separate_use_case;

/// Chunking and per-chunk feature counts
pub mod features_use_case;

/// Descriptive corpus metrics
pub mod metrics_use_case;

/// Balanced cross-validated classification
pub mod evaluate_use_case;

/// Every stage end to end
pub mod run_use_case;

/// The random stream of a run: reproducible with a seed, fresh
/// from the OS otherwise.
pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
