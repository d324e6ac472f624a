// ============================================================
// Layer 4 — Native Speaker Separator
// ============================================================
// Turns finalised speakers into the three line classes.
//
// Two policies exist and are chosen by configuration, never mixed:
//
//   native-threshold (default)
//     fr_percent <  threshold → EN lines to EN_LINES, FR lines dropped
//     fr_percent >= threshold → EN lines to NON_NATIVE_LINES,
//                               FR lines to FR_LINES
//
//   translated
//     en_percent == 1.0       → EN lines to EN_LINES
//     fr_percent >= threshold → EN lines to NON_NATIVE_LINES
//     otherwise               → EN lines dropped
//     FR lines of every speaker go to FR_LINES
//
// Whatever the policy, the resulting assignment must be non-empty,
// duplicate-free per class, and disjoint across classes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::data::corpus::validate;
use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::line_class::{ClassAssignment, LineClass};
use crate::domain::speaker::{Language, Speaker};
use crate::domain::traits::{SeparationPolicy, SpeakerClass};

// ─── Policies ─────────────────────────────────────────────────────────────────
/// A speaker is native when strictly less than `threshold` of their
/// lines are French.
#[derive(Debug, Clone, Copy)]
pub struct NativeThreshold {
    pub threshold: f64,
}

impl SeparationPolicy for NativeThreshold {
    fn classify(&self, speaker: &Speaker) -> SpeakerClass {
        if speaker.fr_percent < self.threshold {
            SpeakerClass::Native
        } else {
            SpeakerClass::NonNative
        }
    }
}

impl fmt::Display for NativeThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Threshold={} as max % of FR lines", self.threshold * 100.0)
    }
}

/// Only fully-English speakers are native; every French line is kept
/// as translated material.
#[derive(Debug, Clone, Copy)]
pub struct Translated {
    pub threshold: f64,
}

impl SeparationPolicy for Translated {
    fn classify(&self, speaker: &Speaker) -> SpeakerClass {
        if speaker.en_percent >= 1.0 {
            SpeakerClass::Native
        } else if speaker.fr_percent >= self.threshold {
            SpeakerClass::NonNative
        } else {
            SpeakerClass::Excluded
        }
    }

    fn french_destination(&self, _class: SpeakerClass) -> Option<LineClass> {
        Some(LineClass::FrNative)
    }
}

impl fmt::Display for Translated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Native=100% EN lines, non-native>={}% FR lines, all FR lines translated",
            self.threshold * 100.0
        )
    }
}

/// Configuration-level choice of policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    #[default]
    NativeThreshold,
    Translated,
}

impl PolicyKind {
    /// Instantiate the policy after checking the threshold is a ratio
    pub fn build(self, threshold: f64) -> PipelineResult<Box<dyn SeparationPolicy>> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(PipelineError::ConfigMismatch(format!(
                "threshold {threshold} is not within [0, 1]"
            )));
        }
        Ok(match self {
            PolicyKind::NativeThreshold => Box::new(NativeThreshold { threshold }),
            PolicyKind::Translated      => Box::new(Translated { threshold }),
        })
    }
}

// ─── classify ─────────────────────────────────────────────────────────────────
/// Distribute every speaker's lines over the three classes and
/// validate the result.
pub fn classify(
    speakers: &BTreeMap<String, Speaker>,
    policy:   &dyn SeparationPolicy,
) -> PipelineResult<ClassAssignment> {
    let mut assignment = ClassAssignment::default();

    for speaker in speakers.values() {
        let class = policy.classify(speaker);
        tracing::debug!("{} → {:?} (FR {:.3})", speaker.name, class, speaker.fr_percent);

        if let Some(target) = policy.english_destination(class) {
            assignment.extend(target, speaker.lines(Language::En));
        }
        if let Some(target) = policy.french_destination(class) {
            assignment.extend(target, speaker.lines(Language::Fr));
        }
    }

    tracing::info!(
        "By check - {} we got: {} English native lines, {} English non-native lines, and {} French lines",
        policy,
        assignment.en_native.len(),
        assignment.en_non_native.len(),
        assignment.fr_native.len(),
    );

    tracing::info!("Checking for line class list problems...");
    for class in LineClass::ALL {
        validate(assignment.get(class))
            .map_err(|e| PipelineError::Validation(format!("class {class}: {e}")))?;
    }
    if let Some((idx, first, second)) = assignment.find_overlap() {
        return Err(PipelineError::Validation(format!(
            "line {idx} assigned to both {first} and {second}"
        )));
    }
    tracing::info!("All Good!");

    Ok(assignment)
}
