//! Matizador CLI: color-dominance benchmark harness
//!
//! ## Usage
//!
//! ```bash
//! matizador generate --out dataset --seed 42   # Synthesize a dataset
//! matizador evaluate solutions/agent           # Formal evaluation (threshold 1.0)
//! matizador score solution.json gt.json        # Quick check (pass at 0.8)
//! matizador report results/*.json              # Combined text report
//! ```

use clap::Parser;
use matizador::{handlers, Cli, CliConfig, CliResult, Commands, Verbosity};
use std::process::ExitCode;

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);

    match cli.command {
        Commands::Generate(args) => handlers::generate::execute_generate(&config, &args),
        Commands::Evaluate(args) => handlers::evaluate::execute_evaluate(&config, &args),
        Commands::Score(args) => handlers::score::execute_score(&config, &args),
        Commands::Report(args) => handlers::report::execute_report(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(cli.color.into())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
