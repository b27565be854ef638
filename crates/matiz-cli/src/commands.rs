//! CLI command definitions using clap

use crate::config::ColorChoice;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Matizador: CLI for Matiz - color-dominance benchmark harness
#[derive(Parser, Debug)]
#[command(name = "matizador")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a benchmark dataset of images with known dominant colors
    Generate(GenerateArgs),

    /// Evaluate a solution directory against a ground-truth file
    ///
    /// Never crashes on a bad solution: missing or malformed files produce
    /// a zero-score result with the error recorded. Exit code reflects the
    /// success verdict (accuracy >= threshold, default 1.0).
    Evaluate(EvaluateArgs),

    /// Score a prediction file with a per-image breakdown
    ///
    /// Exit code 0 when accuracy >= 0.8, 1 otherwise.
    Score(ScoreArgs),

    /// Render saved evaluation results as a combined text report
    Report(ReportArgs),
}

/// Arguments for the generate command
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Output directory for the dataset
    #[arg(short, long, default_value = "dataset")]
    pub out: PathBuf,

    /// Number of images to generate
    #[arg(short = 'n', long, default_value = "15")]
    pub images: u32,

    /// Image side length in pixels (images are square)
    #[arg(long, default_value = "512")]
    pub size: u32,

    /// Minimum number of distinct region colors per image
    #[arg(long, default_value = "3")]
    pub min_regions: usize,

    /// Maximum number of distinct region colors per image
    #[arg(long, default_value = "8")]
    pub max_regions: usize,

    /// RNG seed; the same seed reproduces the dataset exactly
    #[arg(long, default_value = "0")]
    pub seed: u64,
}

/// Arguments for the evaluate command
#[derive(Parser, Debug)]
pub struct EvaluateArgs {
    /// Directory containing the solution file
    pub solution_dir: PathBuf,

    /// Path of the ground-truth file
    #[arg(short, long, default_value = "dataset/ground_truth_colors.json")]
    pub ground_truth: PathBuf,

    /// Solution file name inside the solution directory
    #[arg(long, default_value = "solution.json")]
    pub solution_file: String,

    /// Minimum accuracy for success
    #[arg(short, long, default_value = "1.0")]
    pub threshold: f64,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: EvalOutputFormat,
}

/// Arguments for the score command
#[derive(Parser, Debug)]
pub struct ScoreArgs {
    /// Prediction file (JSON with a top-level "predictions" object)
    pub predictions: PathBuf,

    /// Ground-truth file (JSON object, filename -> color)
    pub ground_truth: PathBuf,
}

/// Arguments for the report command
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Saved evaluation result files (JSON, as written by evaluate --format json)
    #[arg(required = true)]
    pub results: Vec<PathBuf>,
}

/// Evaluation output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EvalOutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Color argument wrapper for clap
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Detect terminal support
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
