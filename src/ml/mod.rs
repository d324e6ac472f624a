// ============================================================
// Layer 5 — ML Layer
// ============================================================
// Classification of chunk frequency vectors.
//
// What's in this layer:
//
//   forest.rs           — CART decision trees and the random
//                         forest that votes over them
//                         • Gini impurity splits
//                         • bootstrap samples per tree
//                         • √features considered per split
//
//   cross_validation.rs — stratified k-fold accuracy of a
//                         forest on a labelled dataset
//
// Every random draw comes from a ChaCha8 stream seeded by the
// caller, so a seed reproduces a run exactly.
//
// Reference: Breiman (2001) Random Forests

/// Decision trees and the random forest ensemble
pub mod forest;

/// Stratified k-fold evaluation
pub mod cross_validation;
