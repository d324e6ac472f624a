// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Two seams:
//
//   AnnotationSource  — anything that yields annotation records
//                       (the .id file reader)
//   SeparationPolicy  — the rule that decides which class a
//                       speaker's lines belong to
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::fmt;

use crate::domain::error::PipelineResult;
use crate::domain::line_class::LineClass;
use crate::domain::speaker::{AnnotationRecord, Speaker};

// ─── AnnotationSource ─────────────────────────────────────────────────────────
/// Any component that can produce the ordered annotation records
/// of a transcript.
pub trait AnnotationSource {
    fn records(&self) -> PipelineResult<Vec<AnnotationRecord>>;
}

// ─── SeparationPolicy ─────────────────────────────────────────────────────────
/// The label a separation policy gives to a whole speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakerClass {
    /// English lines count as native English
    Native,
    /// English lines count as non-native English
    NonNative,
    /// English lines take no part in the study
    Excluded,
}

/// Decides how a speaker's lines are distributed over the line classes.
///
/// Implementations:
///   - NativeThreshold → strict French-ratio threshold
///   - Translated      → fully-English natives, every French line kept
pub trait SeparationPolicy: fmt::Display {
    /// Label one finalised speaker
    fn classify(&self, speaker: &Speaker) -> SpeakerClass;

    /// Class receiving the speaker's English lines
    fn english_destination(&self, class: SpeakerClass) -> Option<LineClass> {
        match class {
            SpeakerClass::Native    => Some(LineClass::EnNative),
            SpeakerClass::NonNative => Some(LineClass::EnNonNative),
            SpeakerClass::Excluded  => None,
        }
    }

    /// Class receiving the speaker's French lines
    fn french_destination(&self, class: SpeakerClass) -> Option<LineClass> {
        match class {
            SpeakerClass::NonNative => Some(LineClass::FrNative),
            _ => None,
        }
    }
}
