// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the five subcommands and all their flags. Flag groups
// shared between a stage and `run` are flattened structs, so
// both spell them the same way.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, enums)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::{
    evaluate_use_case::EvaluateConfig,
    features_use_case::FeatureConfig,
    metrics_use_case::MetricsConfig,
    run_use_case::PipelineConfig,
    separate_use_case::SeparateConfig,
};
use crate::data::separator::PolicyKind;
use crate::features::trigrams::DEFAULT_TOP_N;
use crate::infra::layout::CorpusLayout;
use crate::ml::{cross_validation::DEFAULT_FOLDS, forest::{ForestParams, DEFAULT_TREES}};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split the corpus lines into native, non-native and French classes
    Separate(SeparateArgs),

    /// Chunk each class and write per-chunk feature counts
    ChunkCounts(ChunkCountsArgs),

    /// Compute lexical richness, collocations, cohesive markers and pronouns
    Metrics(MetricsArgs),

    /// Cross-validate a random forest on the chunk counts
    Evaluate(EvaluateArgs),

    /// Run every stage in order
    Run(RunArgs),
}

/// How speakers are assigned to classes
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyArg {
    /// FR share below the threshold → native; French lines of
    /// non-natives form the French class
    NativeThreshold,
    /// Only all-English speakers are native; every French line
    /// forms the French class
    Translated,
}

impl From<PolicyArg> for PolicyKind {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::NativeThreshold => PolicyKind::NativeThreshold,
            PolicyArg::Translated      => PolicyKind::Translated,
        }
    }
}

// ─── Shared flag groups ──────────────────────────────────────────────────────

#[derive(Args, Debug, Clone)]
pub struct SeparationOpts {
    /// Base path of the <pattern>.id and <pattern>.en.tok files
    #[arg(short = 'p', long)]
    pub file_pattern: String,

    /// Reuse speakers-out.json from the output location
    #[arg(long)]
    pub speaker_stats_from_file: bool,

    /// FR line share that separates native from non-native speakers
    #[arg(short, long, default_value_t = 0.5)]
    pub threshold: f64,

    #[arg(long, value_enum, default_value_t = PolicyArg::NativeThreshold)]
    pub policy: PolicyArg,

    #[arg(long, default_value = ".id")]
    pub annotation_suffix: String,

    #[arg(long, default_value = ".en.tok")]
    pub english_suffix: String,
}

impl SeparationOpts {
    fn layout(&self) -> CorpusLayout {
        CorpusLayout {
            annotation_suffix: self.annotation_suffix.clone(),
            english_suffix:    self.english_suffix.clone(),
            ..CorpusLayout::default()
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CountOpts {
    /// Count function words per chunk
    #[arg(long)]
    pub function_word_counts: bool,

    /// Count the most common trigrams per chunk
    #[arg(long, alias = "pos-counts")]
    pub trigram_counts: bool,

    /// Size of the trigram vocabulary
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top_trigrams: usize,

    /// Shuffle lines before chunking
    #[arg(long)]
    pub shuffle_lines: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ScoreOpts {
    /// Chunks per class; the smallest class must have at least this many
    #[arg(short, long, default_value_t = 350, conflicts_with = "smallest_class")]
    pub sample_size: usize,

    /// Use as many chunks per class as the smallest class has
    #[arg(long)]
    pub smallest_class: bool,

    /// Pick each class's chunks at random instead of the first ones
    #[arg(long)]
    pub shuffle_samples: bool,

    #[arg(long, default_value_t = DEFAULT_FOLDS)]
    pub folds: usize,

    /// Trees per forest
    #[arg(long, default_value_t = DEFAULT_TREES)]
    pub trees: usize,

    /// Depth limit per tree (unbounded when absent)
    #[arg(long)]
    pub max_depth: Option<usize>,
}

impl ScoreOpts {
    fn sample_size(&self) -> Option<usize> {
        (!self.smallest_class).then_some(self.sample_size)
    }

    fn forest(&self) -> ForestParams {
        ForestParams {
            n_trees:   self.trees,
            max_depth: self.max_depth,
            ..ForestParams::default()
        }
    }
}

// ─── separate ────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct SeparateArgs {
    #[command(flatten)]
    pub separation: SeparationOpts,

    /// Where speakers-out.json and lines-out.json are written
    #[arg(long, default_value = "/tmp/")]
    pub output_location: PathBuf,
}

impl From<SeparateArgs> for SeparateConfig {
    fn from(a: SeparateArgs) -> Self {
        let layout = a.separation.layout();
        SeparateConfig {
            file_pattern:       a.separation.file_pattern,
            output_dir:         a.output_location,
            threshold:          a.separation.threshold,
            policy:             a.separation.policy.into(),
            speakers_from_file: a.separation.speaker_stats_from_file,
            layout,
        }
    }
}

// ─── chunk-counts ────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct ChunkCountsArgs {
    /// Directory holding lines-out.json
    #[arg(short = 'j', long, default_value = "/tmp/")]
    pub lines_json_location: PathBuf,

    #[arg(long, default_value = "/tmp/")]
    pub output_location: PathBuf,

    #[arg(short, long, default_value_t = 1000)]
    pub chunk_size: usize,

    #[command(flatten)]
    pub counts: CountOpts,

    /// Seed for line shuffling
    #[arg(long)]
    pub seed: Option<u64>,
}

impl From<ChunkCountsArgs> for FeatureConfig {
    fn from(a: ChunkCountsArgs) -> Self {
        FeatureConfig {
            lines_dir:      a.lines_json_location,
            output_dir:     a.output_location,
            chunk_size:     a.chunk_size,
            function_words: a.counts.function_word_counts,
            trigrams:       a.counts.trigram_counts,
            top_trigrams:   a.counts.top_trigrams,
            shuffle:        a.counts.shuffle_lines,
            seed:           a.seed,
            layout:         CorpusLayout::default(),
        }
    }
}

// ─── metrics ─────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct MetricsArgs {
    #[arg(short = 'j', long, default_value = "/tmp/")]
    pub lines_json_location: PathBuf,

    #[arg(long, default_value = "/tmp/")]
    pub output_location: PathBuf,

    /// Idiom list replacing the built-in one (one per line)
    #[arg(long)]
    pub idioms: Option<PathBuf>,

    /// Cohesive marker list replacing the built-in one
    #[arg(long)]
    pub cohesive_markers: Option<PathBuf>,

    /// Pronoun list replacing the built-in one
    #[arg(long)]
    pub pronouns: Option<PathBuf>,

    /// Seed for the token samples
    #[arg(long)]
    pub seed: Option<u64>,
}

impl From<MetricsArgs> for MetricsConfig {
    fn from(a: MetricsArgs) -> Self {
        MetricsConfig {
            lines_dir:        a.lines_json_location,
            output_dir:       a.output_location,
            idioms:           a.idioms,
            cohesive_markers: a.cohesive_markers,
            pronouns:         a.pronouns,
            seed:             a.seed,
            layout:           CorpusLayout::default(),
        }
    }
}

// ─── evaluate ────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Directory holding the chunk count files
    #[arg(long, default_value = "/tmp/")]
    pub input_location: PathBuf,

    /// Where scores.csv is appended (defaults to the input location)
    #[arg(long)]
    pub output_location: Option<PathBuf>,

    #[arg(short, long, default_value_t = 1000)]
    pub chunk_size: usize,

    #[command(flatten)]
    pub score: ScoreOpts,

    /// Seed for sampling and forests
    #[arg(long)]
    pub seed: Option<u64>,
}

impl From<EvaluateArgs> for EvaluateConfig {
    fn from(a: EvaluateArgs) -> Self {
        EvaluateConfig {
            output_dir:  a.output_location.unwrap_or_else(|| a.input_location.clone()),
            input_dir:   a.input_location,
            chunk_size:  a.chunk_size,
            sample_size: a.score.sample_size(),
            k_folds:     a.score.folds,
            forest:      a.score.forest(),
            shuffle:     a.score.shuffle_samples,
            seed:        a.seed,
            layout:      CorpusLayout::default(),
        }
    }
}

// ─── run ─────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub separation: SeparationOpts,

    /// Directory for every artifact of the run
    #[arg(long, default_value = "/tmp/")]
    pub output_location: PathBuf,

    #[arg(short, long, default_value_t = 1000)]
    pub chunk_size: usize,

    #[command(flatten)]
    pub counts: CountOpts,

    #[command(flatten)]
    pub score: ScoreOpts,

    /// Seed for every random draw of the run
    #[arg(long)]
    pub seed: Option<u64>,
}

impl From<RunArgs> for PipelineConfig {
    fn from(a: RunArgs) -> Self {
        let layout = a.separation.layout();
        let out    = a.output_location;
        PipelineConfig {
            separate: SeparateConfig {
                file_pattern:       a.separation.file_pattern,
                output_dir:         out.clone(),
                threshold:          a.separation.threshold,
                policy:             a.separation.policy.into(),
                speakers_from_file: a.separation.speaker_stats_from_file,
                layout:             layout.clone(),
            },
            features: FeatureConfig {
                lines_dir:      out.clone(),
                output_dir:     out.clone(),
                chunk_size:     a.chunk_size,
                function_words: a.counts.function_word_counts,
                trigrams:       a.counts.trigram_counts,
                top_trigrams:   a.counts.top_trigrams,
                shuffle:        a.counts.shuffle_lines,
                seed:           a.seed,
                layout:         layout.clone(),
            },
            metrics: MetricsConfig {
                lines_dir:  out.clone(),
                output_dir: out.clone(),
                seed:       a.seed,
                layout:     layout.clone(),
                ..MetricsConfig::default()
            },
            evaluate: EvaluateConfig {
                input_dir:   out.clone(),
                output_dir:  out,
                chunk_size:  a.chunk_size,
                sample_size: a.score.sample_size(),
                k_folds:     a.score.folds,
                forest:      a.score.forest(),
                shuffle:     a.score.shuffle_samples,
                seed:        a.seed,
                layout,
            },
        }
    }
}
