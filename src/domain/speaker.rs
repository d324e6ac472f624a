// ============================================================
// Layer 3 — Speaker Domain Type
// ============================================================
// A speaker as seen by the transcript annotations: the 1-based
// corpus line indices they produced in each language, plus the
// share of their lines spoken in each language.
//
// A Speaker is only ever created complete: the percentages are
// computed once from the final line lists (see SpeakerRegistry in
// the data layer, which accumulates the lists first).
//
// Serialised field names match the speaker statistics file:
//   { "EN_LINES": [..], "EN_PERCENT": 0.5, "FR_LINES": [..], "FR_PERCENT": 0.5 }
// Fields are declared in that (sorted) order so the file diffs cleanly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::{PipelineError, PipelineResult};

/// Language tag carried by every annotation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "EN")]
    En,
    #[serde(rename = "FR")]
    Fr,
}

impl Language {
    /// The two-letter tag used in the annotation files
    pub fn tag(&self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Fr => "FR",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EN" => Ok(Language::En),
            "FR" => Ok(Language::Fr),
            other => Err(PipelineError::Validation(format!(
                "unknown language tag '{other}' (expected EN or FR)"
            ))),
        }
    }
}

/// One annotation record: corpus line `line_index` (1-based) was
/// spoken by `speaker` in `language`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    pub line_index: u64,
    pub speaker:    String,
    pub language:   Language,
}

impl AnnotationRecord {
    pub fn new(line_index: u64, speaker: impl Into<String>, language: Language) -> Self {
        Self { line_index, speaker: speaker.into(), language }
    }
}

/// A finalised speaker with per-language line indices and usage ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    /// Speaker identifier. It is the key of the statistics file, so not
    /// repeated inside each record
    #[serde(skip)]
    pub name: String,

    /// 1-based corpus line indices spoken in English, in file order
    #[serde(rename = "EN_LINES")]
    pub en_lines: Vec<u64>,

    /// Fraction of this speaker's lines spoken in English
    #[serde(rename = "EN_PERCENT")]
    pub en_percent: f64,

    /// 1-based corpus line indices spoken in French, in file order
    #[serde(rename = "FR_LINES")]
    pub fr_lines: Vec<u64>,

    /// Fraction of this speaker's lines spoken in French
    #[serde(rename = "FR_PERCENT")]
    pub fr_percent: f64,
}

impl Speaker {
    /// Build a speaker from complete line lists, computing the
    /// language ratios.
    ///
    /// A speaker with no lines at all cannot have ratios; that is a
    /// malformed input and is reported, never defaulted to zero.
    pub fn from_lines(
        name:     impl Into<String>,
        en_lines: Vec<u64>,
        fr_lines: Vec<u64>,
    ) -> PipelineResult<Self> {
        let name  = name.into();
        let total = en_lines.len() + fr_lines.len();
        if total == 0 {
            return Err(PipelineError::DivisionByZero(format!(
                "speaker '{name}' has no annotated lines"
            )));
        }

        let total = total as f64;
        Ok(Self {
            en_percent: en_lines.len() as f64 / total,
            fr_percent: fr_lines.len() as f64 / total,
            name,
            en_lines,
            fr_lines,
        })
    }

    /// The line indices this speaker produced in `lang`
    pub fn lines(&self, lang: Language) -> &[u64] {
        match lang {
            Language::En => &self.en_lines,
            Language::Fr => &self.fr_lines,
        }
    }
}
