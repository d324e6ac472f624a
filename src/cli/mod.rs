// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses command line arguments with `clap` and hands each
// subcommand to its Layer 2 use case:
//
//   1. `separate`     — speaker stats and lines by class
//   2. `chunk-counts` — per-chunk feature counts
//   3. `metrics`      — descriptive corpus metrics
//   4. `evaluate`     — cross-validated classification
//   5. `run`          — all four in order
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::Commands;

use crate::application::{
    evaluate_use_case::EvaluateUseCase,
    features_use_case::FeaturesUseCase,
    metrics_use_case::MetricsUseCase,
    run_use_case::RunUseCase,
    separate_use_case::SeparateUseCase,
};
use crate::domain::line_class::LineClass;
use crate::ml::cross_validation::CrossValidationReport;

#[derive(Parser, Debug)]
#[command(
    name = "nli",
    version = "0.1.0",
    about = "Native language identification on a bilingual, speaker-annotated corpus."
)]
pub struct Cli {
    /// Log per-item detail
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Separate(args) => {
                let lines = SeparateUseCase::new(args.into()).execute()?;
                for class in LineClass::ALL {
                    println!("{:<18} {:>8} lines", class.key(), lines.get(class).len());
                }
            }
            Commands::ChunkCounts(args) => {
                let written = FeaturesUseCase::new(args.into()).execute()?;
                for (class, n) in &written {
                    println!("{:<18} {:>8} chunks", class.key(), n);
                }
            }
            Commands::Metrics(args) => {
                let metrics = MetricsUseCase::new(args.into()).execute()?;
                println!("Token budget per class: {}", metrics.token_count);
                for report in &metrics.metrics {
                    for (class, value) in &report.normalized {
                        println!("{:<18} {:<18} {:.6}", report.metric.name(), class.key(), value);
                    }
                }
            }
            Commands::Evaluate(args) => {
                let reports = EvaluateUseCase::new(args.into()).execute()?;
                print_scores(&reports);
            }
            Commands::Run(args) => {
                let summary = RunUseCase::new(args.into()).execute()?;
                print_scores(&summary.reports);
            }
        }
        Ok(())
    }
}

fn print_scores(reports: &[CrossValidationReport]) {
    for report in reports {
        println!("{:<45} mean accuracy {:.4}", report.combination(), report.mean);
    }
}
