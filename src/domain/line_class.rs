// ============================================================
// Layer 3 — Line Classes
// ============================================================
// Every corpus line that takes part in the study lands in exactly
// one of three classes:
//
//   EN_LINES          English spoken by native English speakers
//   NON_NATIVE_LINES  English spoken by non-native speakers
//   FR_LINES          French utterances (as their English rendering)
//
// The declaration order below is the canonical class order: it is
// the order classes are processed, written, and labelled 0..k-1.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One of the three line classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LineClass {
    #[serde(rename = "EN_LINES")]
    EnNative,
    #[serde(rename = "NON_NATIVE_LINES")]
    EnNonNative,
    #[serde(rename = "FR_LINES")]
    FrNative,
}

impl LineClass {
    /// All classes in canonical order
    pub const ALL: [LineClass; 3] = [
        LineClass::EnNative,
        LineClass::EnNonNative,
        LineClass::FrNative,
    ];

    /// Key used in the lines file and in chunk-count file names
    pub fn key(&self) -> &'static str {
        match self {
            LineClass::EnNative    => "EN_LINES",
            LineClass::EnNonNative => "NON_NATIVE_LINES",
            LineClass::FrNative    => "FR_LINES",
        }
    }
}

impl fmt::Display for LineClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ─── ClassAssignment ──────────────────────────────────────────────────────────
/// Global 1-based line indices partitioned into the three classes.
/// Index order inside each class follows speaker order, then each
/// speaker's file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassAssignment {
    pub en_native:     Vec<u64>,
    pub en_non_native: Vec<u64>,
    pub fr_native:     Vec<u64>,
}

impl ClassAssignment {
    pub fn get(&self, class: LineClass) -> &[u64] {
        match class {
            LineClass::EnNative    => &self.en_native,
            LineClass::EnNonNative => &self.en_non_native,
            LineClass::FrNative    => &self.fr_native,
        }
    }

    /// Append a speaker's indices to a class
    pub fn extend(&mut self, class: LineClass, indices: &[u64]) {
        let target = match class {
            LineClass::EnNative    => &mut self.en_native,
            LineClass::EnNonNative => &mut self.en_non_native,
            LineClass::FrNative    => &mut self.fr_native,
        };
        target.extend_from_slice(indices);
    }

    /// Returns the first index found in two different classes, if any.
    pub fn find_overlap(&self) -> Option<(u64, LineClass, LineClass)> {
        let mut owner: HashMap<u64, LineClass> = HashMap::new();
        for class in LineClass::ALL {
            for &idx in self.get(class) {
                if let Some(&first) = owner.get(&idx) {
                    if first != class {
                        return Some((idx, first, class));
                    }
                } else {
                    owner.insert(idx, class);
                }
            }
        }
        None
    }
}

// ─── LinesByClass ─────────────────────────────────────────────────────────────
/// The literal text lines of each class, as stored in the lines file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinesByClass {
    #[serde(rename = "EN_LINES")]
    pub en_native: Vec<String>,

    #[serde(rename = "NON_NATIVE_LINES")]
    pub en_non_native: Vec<String>,

    #[serde(rename = "FR_LINES")]
    pub fr_native: Vec<String>,
}

impl LinesByClass {
    pub fn get(&self, class: LineClass) -> &[String] {
        match class {
            LineClass::EnNative    => &self.en_native,
            LineClass::EnNonNative => &self.en_non_native,
            LineClass::FrNative    => &self.fr_native,
        }
    }

    pub fn set(&mut self, class: LineClass, lines: Vec<String>) {
        match class {
            LineClass::EnNative    => self.en_native = lines,
            LineClass::EnNonNative => self.en_non_native = lines,
            LineClass::FrNative    => self.fr_native = lines,
        }
    }

    /// The whitespace-separated word stream of a class, lines in order
    pub fn words(&self, class: LineClass) -> Vec<String> {
        self.get(class)
            .iter()
            .flat_map(|line| line.split_whitespace().map(str::to_string))
            .collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_and_keys() {
        let keys: Vec<&str> = LineClass::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(keys, vec!["EN_LINES", "NON_NATIVE_LINES", "FR_LINES"]);
    }

    #[test]
    fn test_overlap_detection() {
        let mut a = ClassAssignment::default();
        a.extend(LineClass::EnNative, &[1, 2]);
        a.extend(LineClass::FrNative, &[3]);
        assert!(a.find_overlap().is_none());

        a.extend(LineClass::EnNonNative, &[2]);
        let (idx, first, second) = a.find_overlap().unwrap();
        assert_eq!(idx, 2);
        assert_eq!(first, LineClass::EnNative);
        assert_eq!(second, LineClass::EnNonNative);
    }

    #[test]
    fn test_lines_file_shape() {
        let mut lines = LinesByClass::default();
        lines.set(LineClass::EnNonNative, vec!["hello  there".into(), "you".into()]);
        let json: serde_json::Value = serde_json::to_value(&lines).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(obj.contains_key("NON_NATIVE_LINES"));
        assert_eq!(lines.words(LineClass::EnNonNative), vec!["hello", "there", "you"]);
    }
}
