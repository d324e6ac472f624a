// ============================================================
// Layer 6 — Score Logger
// ============================================================
// Records cross-validation accuracy to a CSV file, one row per
// fold, so several runs (chunk sizes, policies) can be compared
// afterwards.
//
// Example CSV output:
//   combination,fold,accuracy
//   EN_LINES+FR_LINES,1,0.942857
//   EN_LINES+FR_LINES,2,0.957143
//   ...
//
// The file is appended to across runs; the header is written only
// when the file is new.

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::ml::cross_validation::CrossValidationReport;

pub const HEADER: &str = "combination,fold,accuracy";

pub struct ScoreLogger {
    csv_path: PathBuf,
}

impl ScoreLogger {
    pub fn new(csv_path: impl Into<PathBuf>) -> Result<Self> {
        let csv_path = csv_path.into();
        if let Some(dir) = csv_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!("Created scores CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one row per fold of `report`.
    pub fn log(&self, report: &CrossValidationReport) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        let combination = report.combination();
        for (fold, accuracy) in report.fold_scores.iter().enumerate() {
            writeln!(f, "{},{},{:.6}", combination, fold + 1, accuracy)?;
        }

        tracing::debug!(
            "Logged {} fold scores of {} to '{}'",
            report.fold_scores.len(),
            combination,
            self.csv_path.display()
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
