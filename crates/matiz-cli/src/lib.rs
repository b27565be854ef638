//! Matizador CLI Library
//!
//! Command-line interface for the Matiz color-dominance benchmark harness.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
/// Command handlers
pub mod handlers;
mod output;

pub use commands::{
    Cli, ColorArg, Commands, EvalOutputFormat, EvaluateArgs, GenerateArgs, ReportArgs, ScoreArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::ProgressReporter;
