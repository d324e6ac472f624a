// ============================================================
// Layer 4 — Annotation Reader
// ============================================================
// Reads the speaker identification file (<pattern>.id). Each
// non-blank line is one lightly marked-up record:
//
//   <LINE COUNT="12" NAME="Mr. Smith" LANGUAGE="FR"/>
//
// Only three attributes matter:
//   COUNT     1-based index of the line in the corpus text files
//   NAME      speaker identifier
//   LANGUAGE  EN or FR
//
// Attribute values may contain the five predefined XML entities
// and numeric character references, which are decoded. A record missing any of the three attributes
// is malformed and aborts the run.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::speaker::{AnnotationRecord, Language};
use crate::domain::traits::AnnotationSource;

fn attribute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"([A-Za-z_][\w.-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex")
    })
}

fn entity_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"&(?:#[xX]([0-9A-Fa-f]+)|#([0-9]+)|(lt|gt|quot|apos|amp));").expect("valid regex")
    })
}

/// Decode named entities and numeric character references in one
/// pass, so "&amp;#233;" becomes "&#233;" and not "é". A reference
/// that names no valid character is kept verbatim.
fn decode_entities(value: &str) -> Cow<'_, str> {
    if !value.contains('&') {
        return Cow::Borrowed(value);
    }
    entity_pattern().replace_all(value, |caps: &Captures<'_>| {
        let numeric = match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => Some(u32::from_str_radix(hex.as_str(), 16)),
            (_, Some(dec)) => Some(dec.as_str().parse::<u32>()),
            _ => None,
        };
        match numeric {
            Some(code) => code
                .ok()
                .and_then(char::from_u32)
                .map_or_else(|| caps[0].to_string(), String::from),
            None => match &caps[3] {
                "lt" => "<",
                "gt" => ">",
                "quot" => "\"",
                "apos" => "'",
                _ => "&",
            }
            .to_string(),
        }
    })
}

/// Parse a single annotation record.
///
/// `line_no` is the 1-based position of the record in its file and
/// only serves error messages.
pub fn parse_record(line: &str, line_no: usize) -> PipelineResult<AnnotationRecord> {
    let trimmed = line.trim();
    if !trimmed.starts_with('<') || !trimmed.ends_with('>') {
        return Err(PipelineError::Validation(format!(
            "annotation line {line_no} is not a marked-up record: '{trimmed}'"
        )));
    }

    let mut attrs: HashMap<&str, Cow<'_, str>> = HashMap::new();
    for cap in attribute_pattern().captures_iter(trimmed) {
        let (Some(key), Some(value)) = (cap.get(1), cap.get(2).or_else(|| cap.get(3))) else {
            continue;
        };
        attrs.insert(key.as_str(), decode_entities(value.as_str()));
    }

    let required = |name: &str| {
        attrs.get(name).ok_or_else(|| {
            PipelineError::Validation(format!(
                "annotation line {line_no} is missing the {name} attribute"
            ))
        })
    };

    let count = required("COUNT")?;
    let line_index: u64 = count.trim().parse().map_err(|_| {
        PipelineError::Validation(format!(
            "annotation line {line_no}: COUNT '{count}' is not a line number"
        ))
    })?;
    if line_index == 0 {
        return Err(PipelineError::Validation(format!(
            "annotation line {line_no}: COUNT is 1-based, got 0"
        )));
    }

    let speaker  = required("NAME")?.to_string();
    let language = required("LANGUAGE")?.parse::<Language>().map_err(|e| {
        PipelineError::Validation(format!("annotation line {line_no}: {e}"))
    })?;

    Ok(AnnotationRecord { line_index, speaker, language })
}

/// Parse every non-blank line of an annotation text.
pub fn parse_records(text: &str) -> PipelineResult<Vec<AnnotationRecord>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_record(line, i + 1))
        .collect()
}

/// The annotation file of one transcript.
pub struct AnnotationFile {
    path: PathBuf,
}

impl AnnotationFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AnnotationSource for AnnotationFile {
    fn records(&self) -> PipelineResult<Vec<AnnotationRecord>> {
        tracing::info!("Running speaker extraction from {}", self.path.display());
        let text    = fs::read_to_string(&self.path)?;
        let records = parse_records(&text)?;
        tracing::debug!("Parsed {} annotation records", records.len());
        Ok(records)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parses_record() {
        let r = parse_record(r#"<LINE COUNT="12" NAME="Mr. Smith" LANGUAGE="FR"/>"#, 1).unwrap();
        assert_eq!(r, AnnotationRecord::new(12, "Mr. Smith", Language::Fr));
    }

    #[test]
    fn test_attribute_order_and_quotes_are_free() {
        let r = parse_record(r#"<LINE LANGUAGE='EN' NAME="O&apos;Brien &amp; co" COUNT="3" />"#, 1).unwrap();
        assert_eq!(r.speaker, "O'Brien & co");
        assert_eq!(r.line_index, 3);
        assert_eq!(r.language, Language::En);
    }

    #[test]
    fn test_numeric_character_references() {
        let r = parse_record(r#"<LINE COUNT="5" NAME="Andr&#233; Caf&#xE9;" LANGUAGE="FR"/>"#, 1).unwrap();
        assert_eq!(r.speaker, "André Café");

        assert_eq!(decode_entities("&#X41;&#66;"), "AB");
        assert_eq!(decode_entities("&amp;#233;"), "&#233;");
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        // Surrogates and out-of-range code points are not characters
        assert_eq!(decode_entities("a&#xD800;b"), "a&#xD800;b");
        assert_eq!(decode_entities("&#99999999999;"), "&#99999999999;");
        assert_eq!(decode_entities("R&D &unknown;"), "R&D &unknown;");
    }

    #[test]
    fn test_missing_attribute_is_rejected() {
        let err = parse_record(r#"<LINE COUNT="1" LANGUAGE="EN"/>"#, 7).unwrap_err();
        match err {
            PipelineError::Validation(msg) => {
                assert!(msg.contains("line 7"));
                assert!(msg.contains("NAME"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bad_count_and_language_are_rejected() {
        assert!(parse_record(r#"<LINE COUNT="x" NAME="A" LANGUAGE="EN"/>"#, 1).is_err());
        assert!(parse_record(r#"<LINE COUNT="0" NAME="A" LANGUAGE="EN"/>"#, 1).is_err());
        assert!(parse_record(r#"<LINE COUNT="1" NAME="A" LANGUAGE="DE"/>"#, 1).is_err());
        assert!(parse_record("COUNT=1 NAME=A LANGUAGE=EN", 1).is_err());
    }

    #[test]
    fn test_file_source_skips_blank_lines() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, r#"<LINE COUNT="1" NAME="Alice" LANGUAGE="EN"/>"#).unwrap();
        writeln!(f).unwrap();
        writeln!(f, r#"<LINE COUNT="2" NAME="Alice" LANGUAGE="FR"/>"#).unwrap();

        let records = AnnotationFile::new(f.path()).records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].language, Language::Fr);
    }
}
