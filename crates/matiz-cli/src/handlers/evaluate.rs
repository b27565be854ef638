//! Evaluation handler: the never-crashing benchmark entry point

use crate::commands::{EvalOutputFormat, EvaluateArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use matiz::{render_report_json, render_report_text, Evaluator, EvaluatorConfig};

/// Evaluate a solution directory and print the result
///
/// The evaluation itself cannot fail; the returned error only reflects the
/// success verdict so the process exit code does.
pub fn execute_evaluate(config: &CliConfig, args: &EvaluateArgs) -> CliResult<()> {
    let evaluator = Evaluator::new(
        EvaluatorConfig::new(&args.ground_truth)
            .with_solution_file(&args.solution_file)
            .with_threshold(args.threshold),
    );
    let outcome = evaluator.evaluate(&args.solution_dir);

    match args.format {
        EvalOutputFormat::Text => {
            if !config.verbosity.is_quiet() {
                print!("{}", render_report_text(std::slice::from_ref(&outcome)));
            }
        }
        EvalOutputFormat::Json => {
            let json = render_report_json(&outcome)
                .map_err(|e| CliError::report_generation(e.to_string()))?;
            println!("{json}");
        }
    }

    if outcome.success {
        Ok(())
    } else {
        Err(CliError::evaluation(outcome.error_message.unwrap_or_else(
            || "accuracy below threshold".to_string(),
        )))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::Verbosity;
    use tempfile::TempDir;

    fn args_for(dir: &TempDir, threshold: f64) -> EvaluateArgs {
        EvaluateArgs {
            solution_dir: dir.path().to_path_buf(),
            ground_truth: dir.path().join("gt.json"),
            solution_file: "solution.json".to_string(),
            threshold,
            format: EvalOutputFormat::Text,
        }
    }

    #[test]
    fn test_execute_evaluate_success() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("gt.json"), r#"{"a.png": "red"}"#).unwrap();
        std::fs::write(
            dir.path().join("solution.json"),
            r#"{"predictions": {"a.png": "red"}}"#,
        )
        .unwrap();

        let config = CliConfig::new().with_verbosity(Verbosity::Quiet);
        assert!(execute_evaluate(&config, &args_for(&dir, 1.0)).is_ok());
    }

    #[test]
    fn test_execute_evaluate_failure_is_an_error_not_a_crash() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("gt.json"), r#"{"a.png": "red"}"#).unwrap();
        // No solution file at all

        let config = CliConfig::new().with_verbosity(Verbosity::Quiet);
        let result = execute_evaluate(&config, &args_for(&dir, 1.0));
        assert!(matches!(result, Err(CliError::Evaluation { .. })));
    }
}
