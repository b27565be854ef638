//! Combined report rendering from saved evaluation results

use crate::commands::ReportArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use matiz::{render_report_text, EvaluationOutcome};

/// Render one or more saved evaluation result files as a text report
pub fn execute_report(_config: &CliConfig, args: &ReportArgs) -> CliResult<()> {
    let mut outcomes = Vec::with_capacity(args.results.len());
    for path in &args.results {
        let data = std::fs::read_to_string(path).map_err(|e| {
            CliError::report_generation(format!("failed to read {}: {e}", path.display()))
        })?;
        let outcome: EvaluationOutcome = serde_json::from_str(&data).map_err(|e| {
            CliError::report_generation(format!("failed to parse {}: {e}", path.display()))
        })?;
        outcomes.push(outcome);
    }

    print!("{}", render_report_text(&outcomes));
    Ok(())
}
