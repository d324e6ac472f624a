// ============================================================
// Layer 4 — Corpus Lines
// ============================================================
// Loads the tokenised corpus text (one utterance per line) and
// maps 1-based line indices to the literal lines.
//
// Annotation COUNT values are 1-based, Rust slices are 0-based:
// index i lives at corpus_lines[i - 1].

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use crate::domain::error::{PipelineError, PipelineResult};

/// Check an index list before extraction: it must be non-empty
/// and free of duplicates.
pub fn validate(indices: &[u64]) -> PipelineResult<()> {
    if indices.is_empty() {
        return Err(PipelineError::Validation("class list is empty".into()));
    }
    let full     = indices.len();
    let distinct = indices.iter().collect::<HashSet<_>>().len();
    if full != distinct {
        return Err(PipelineError::Validation(format!(
            "duplicate line indices: full={full} set={distinct}"
        )));
    }
    Ok(())
}

/// Fetch the lines at the given 1-based indices, in the given order.
pub fn extract(indices: &[u64], corpus_lines: &[String]) -> PipelineResult<Vec<String>> {
    indices
        .iter()
        .map(|&index| {
            let out_of_bounds = || PipelineError::IndexOutOfBounds {
                index,
                len: corpus_lines.len(),
            };
            let zero_based = usize::try_from(index)
                .ok()
                .and_then(|i| i.checked_sub(1))
                .ok_or_else(out_of_bounds)?;
            corpus_lines.get(zero_based).cloned().ok_or_else(out_of_bounds)
        })
        .collect()
}

/// The corpus text file of one transcript.
pub struct CorpusText {
    path: PathBuf,
}

impl CorpusText {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read every line of the corpus. Bytes that are not valid UTF-8
    /// are replaced rather than failing the whole load.
    pub fn load(&self) -> PipelineResult<Vec<String>> {
        tracing::info!("Loading lines from {}", self.path.display());
        let bytes = fs::read(&self.path)?;
        let text  = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    "{} is not valid UTF-8 (first error at byte {}), decoding lossily",
                    self.path.display(),
                    e.utf8_error().valid_up_to()
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        tracing::info!("Done loading {} lines from {}", lines.len(), self.path.display());
        Ok(lines)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn corpus() -> Vec<String> {
        vec!["first line".into(), "second line".into(), "third line".into()]
    }

    #[test]
    fn test_extract_is_one_based_and_ordered() {
        let lines = extract(&[3, 1], &corpus()).unwrap();
        assert_eq!(lines, vec!["third line", "first line"]);
    }

    #[test]
    fn test_extract_out_of_bounds() {
        let err = extract(&[4], &corpus()).unwrap_err();
        assert!(matches!(err, PipelineError::IndexOutOfBounds { index: 4, len: 3 }));
        let err = extract(&[0], &corpus()).unwrap_err();
        assert!(matches!(err, PipelineError::IndexOutOfBounds { index: 0, .. }));
    }

    #[test]
    fn test_validate() {
        assert!(validate(&[1, 2, 3]).is_ok());
        assert!(matches!(validate(&[]), Err(PipelineError::Validation(_))));
        match validate(&[1, 2, 2]) {
            Err(PipelineError::Validation(msg)) => assert!(msg.contains("full=3 set=2")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_load_tolerates_invalid_utf8() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"good line\nbad \xff byte\r\nlast").unwrap();
        let lines = CorpusText::new(f.path()).load().unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "good line");
        assert!(lines[1].starts_with("bad "));
        assert!(!lines[1].ends_with('\r'));
    }
}
