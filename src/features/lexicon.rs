// ============================================================
// Layer 5 — Metric Lexicons
// ============================================================
// Word and phrase lists behind the descriptive corpus metrics.
// Built-in English lists are provided; any of them can be replaced
// by a file holding one entry per line.
//
// File entries are kept as raw bytes. An entry that is not valid
// UTF-8 cannot be searched for in the text and simply contributes
// nothing to its metric; the scan goes on with the next entry.

use std::fs;
use std::path::Path;

use crate::domain::error::PipelineResult;

/// Common English idioms and fixed collocations
pub const IDIOMS: &[&str] = &[
    "a matter of fact", "all in all", "as a matter of course", "as a rule", "as far as",
    "at the end of the day", "at the same time", "back and forth", "be that as it may",
    "beat around the bush", "bear in mind", "bottom line", "by and large", "by the way",
    "call it a day", "come to terms with", "cut corners", "down the road", "draw the line",
    "each and every", "first and foremost", "for the time being", "from time to time",
    "get rid of", "give and take", "go without saying", "hand in hand", "in a nutshell",
    "in due course", "in the long run", "in the same boat", "in the wake of", "keep in mind",
    "last but not least", "make ends meet", "more or less", "next to nothing",
    "null and void", "off the record", "on the ball", "on the fence", "on the table",
    "once and for all", "out of the blue", "over and over", "part and parcel",
    "pick up the tab", "play it by ear", "rule of thumb", "safe and sound", "so to speak",
    "sooner or later", "take for granted", "the ball is in", "the tip of the iceberg",
    "time and again", "to a certain extent", "up in the air", "when all is said and done",
    "wrap up",
];

/// Discourse and cohesion markers
pub const COHESIVE_MARKERS: &[&str] = &[
    "accordingly", "additionally", "after all", "afterwards", "also", "although",
    "as a result", "as well as", "at first", "besides", "but", "consequently",
    "conversely", "equally", "even so", "eventually", "finally", "first of all",
    "for example", "for instance", "furthermore", "hence", "however", "in addition",
    "in conclusion", "in contrast", "in fact", "in other words", "in particular",
    "indeed", "instead", "likewise", "meanwhile", "moreover", "namely", "nevertheless",
    "nonetheless", "on the contrary", "on the other hand", "otherwise", "similarly",
    "since", "so that", "subsequently", "that is to say", "then", "therefore", "thus",
    "to sum up", "whereas", "yet",
];

/// Personal pronouns, subject / object / possessive / reflexive
pub const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "yourselves",
    "he", "him", "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself",
    "we", "us", "our", "ours", "ourselves", "they", "them", "their", "theirs",
    "themselves",
];

/// A named list of search entries.
#[derive(Debug, Clone)]
pub struct Lexicon {
    name:    String,
    entries: Vec<Vec<u8>>,
}

impl Lexicon {
    pub fn builtin(name: impl Into<String>, entries: &[&str]) -> Self {
        Self {
            name:    name.into(),
            entries: entries.iter().map(|e| e.as_bytes().to_vec()).collect(),
        }
    }

    /// One entry per line; blank lines ignored, `\r\n` tolerated
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Self {
        let entries = bytes
            .split(|&b| b == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
            .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
            .map(<[u8]>::to_vec)
            .collect();
        Self { name: name.into(), entries }
    }

    pub fn load(name: impl Into<String>, path: &Path) -> PipelineResult<Self> {
        let name  = name.into();
        let bytes = fs::read(path)?;
        let lex   = Self::from_bytes(name, &bytes);
        tracing::info!("Loaded {} {} entries from {}", lex.len(), lex.name, path.display());
        Ok(lex)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Every entry as text; entries that fail to decode are logged
    /// and yield `None`.
    pub fn decoded(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.entries.iter().map(move |raw| match std::str::from_utf8(raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("Skipping undecodable {} entry: {}", self.name, e);
                None
            }
        })
    }
}
