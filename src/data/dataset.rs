// ============================================================
// Layer 4 — Labelled Dataset
// ============================================================
// The classifier's input: one row of per-chunk frequencies and one
// integer label per sample. Labels index into `classes`, which
// keeps the canonical class order of the combination under test.

use serde::{Deserialize, Serialize};

use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::line_class::LineClass;

/// One chunk as the classifier sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub features: Vec<f64>,
    pub label:    usize,
}

#[derive(Debug)]
pub struct LabeledDataset {
    classes: Vec<LineClass>,
    samples: Vec<Sample>,
    width:   usize,
}

impl LabeledDataset {
    /// Every row must have the same width and every label must name
    /// one of `classes`.
    pub fn new(classes: Vec<LineClass>, samples: Vec<Sample>) -> PipelineResult<Self> {
        let width = samples.first().map_or(0, |s| s.features.len());
        if let Some(bad) = samples.iter().find(|s| s.features.len() != width) {
            return Err(PipelineError::ConfigMismatch(format!(
                "feature vectors of width {} and {} cannot share a matrix",
                width,
                bad.features.len()
            )));
        }
        if let Some(bad) = samples.iter().find(|s| s.label >= classes.len()) {
            return Err(PipelineError::ConfigMismatch(format!(
                "label {} outside the {} classes",
                bad.label,
                classes.len()
            )));
        }
        Ok(Self { classes, samples, width })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Number of features per row
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn classes(&self) -> &[LineClass] {
        &self.classes
    }

    pub fn labels(&self) -> Vec<usize> {
        self.samples.iter().map(|s| s.label).collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn sample(features: Vec<f64>, label: usize) -> Sample {
        Sample { features, label }
    }

    #[test]
    fn test_mixed_widths_are_rejected() {
        let classes = vec![LineClass::EnNative, LineClass::FrNative];
        let err = LabeledDataset::new(
            classes,
            vec![sample(vec![0.1, 0.2], 0), sample(vec![0.3], 1)],
        );
        assert!(matches!(err, Err(PipelineError::ConfigMismatch(_))));
    }

    #[test]
    fn test_labels_must_name_a_class() {
        let err = LabeledDataset::new(vec![LineClass::EnNative], vec![sample(vec![1.0], 1)]);
        assert!(err.is_err());
    }

    #[test]
    fn test_accessors() {
        let ds = LabeledDataset::new(
            vec![LineClass::EnNative, LineClass::EnNonNative],
            vec![sample(vec![1.0, 2.0], 1), sample(vec![3.0, 4.0], 0)],
        )
        .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.width(), 2);
        assert_eq!(ds.labels(), vec![1, 0]);
        assert_eq!(ds.samples()[1].features, vec![3.0, 4.0]);
    }
}
