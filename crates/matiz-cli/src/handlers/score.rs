//! Quick scoring handler with a per-image breakdown
//!
//! Unlike `evaluate`, this command loads both files directly and fails fast
//! on a missing or malformed file.

use crate::commands::ScoreArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use console::style;
use matiz::{score, score_details, GroundTruthSet, PredictionSet, VerdictStatus};

/// Exit-code threshold for the score command. Deliberately lower than the
/// evaluator's default 1.0 success threshold (inherited from the original
/// standalone scoring script).
pub const PASS_THRESHOLD: f64 = 0.8;

/// Score a prediction file against ground truth with per-image output
pub fn execute_score(config: &CliConfig, args: &ScoreArgs) -> CliResult<()> {
    let predictions = PredictionSet::load(&args.predictions)?;
    let ground_truth = GroundTruthSet::load(&args.ground_truth)?;

    let outcome = score(&predictions, &ground_truth, PASS_THRESHOLD);
    let use_color = config.color.should_color();

    if !config.verbosity.is_quiet() {
        println!("Evaluation results");
        println!("{}", "=".repeat(50));
        println!("Total images: {}", outcome.report.total);
        println!("Predictions provided: {}", predictions.len());
        println!();

        for verdict in score_details(&predictions, &ground_truth) {
            let line = match verdict.status {
                VerdictStatus::Correct => format!(
                    "{} {}: {} (correct)",
                    mark(use_color, true),
                    verdict.filename,
                    verdict.expected
                ),
                VerdictStatus::Wrong => format!(
                    "{} {}: {} (should be {})",
                    mark(use_color, false),
                    verdict.filename,
                    verdict.predicted.unwrap_or_default(),
                    verdict.expected
                ),
                VerdictStatus::Missing => format!(
                    "{} {}: MISSING (should be {})",
                    mark(use_color, false),
                    verdict.filename,
                    verdict.expected
                ),
            };
            println!("{line}");
        }

        println!();
        println!("Summary");
        println!("{}", "=".repeat(50));
        println!(
            "Correct: {}/{}",
            outcome.report.correct, outcome.report.total
        );
        println!("Wrong: {}", outcome.report.wrong());
        println!("Missing: {}", outcome.report.missing);
        println!(
            "Accuracy: {:.3} ({:.1}%)",
            outcome.report.accuracy,
            outcome.report.accuracy * 100.0
        );
    }

    if outcome.success {
        Ok(())
    } else {
        Err(CliError::evaluation(format!(
            "accuracy {:.3} below pass threshold {PASS_THRESHOLD}",
            outcome.report.accuracy
        )))
    }
}

fn mark(use_color: bool, ok: bool) -> String {
    match (use_color, ok) {
        (true, true) => style("✓").green().to_string(),
        (true, false) => style("✗").red().to_string(),
        (false, true) => "+".to_string(),
        (false, false) => "-".to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::Verbosity;
    use tempfile::TempDir;

    fn write_files(dir: &TempDir, solution: &str, gt: &str) -> ScoreArgs {
        let predictions = dir.path().join("solution.json");
        let ground_truth = dir.path().join("gt.json");
        std::fs::write(&predictions, solution).unwrap();
        std::fs::write(&ground_truth, gt).unwrap();
        ScoreArgs {
            predictions,
            ground_truth,
        }
    }

    fn quiet() -> CliConfig {
        CliConfig::new().with_verbosity(Verbosity::Quiet)
    }

    #[test]
    fn test_execute_score_passes_at_exactly_four_fifths() {
        let dir = TempDir::new().unwrap();
        let args = write_files(
            &dir,
            r#"{"predictions": {"a.png": "red", "b.png": "red", "c.png": "red", "d.png": "red", "e.png": "blue"}}"#,
            r#"{"a.png": "red", "b.png": "red", "c.png": "red", "d.png": "red", "e.png": "green"}"#,
        );
        assert!(execute_score(&quiet(), &args).is_ok());
    }

    #[test]
    fn test_execute_score_fails_below_pass_threshold() {
        let dir = TempDir::new().unwrap();
        let args = write_files(
            &dir,
            r#"{"predictions": {"a.png": "red"}}"#,
            r#"{"a.png": "red", "b.png": "blue"}"#,
        );
        let result = execute_score(&quiet(), &args);
        assert!(matches!(result, Err(CliError::Evaluation { .. })));
    }

    #[test]
    fn test_execute_score_missing_file_fails_fast() {
        let dir = TempDir::new().unwrap();
        let args = ScoreArgs {
            predictions: dir.path().join("absent.json"),
            ground_truth: dir.path().join("also_absent.json"),
        };
        let result = execute_score(&quiet(), &args);
        assert!(matches!(
            result,
            Err(CliError::Matiz(matiz::MatizError::MissingFile { .. }))
        ));
    }

    #[test]
    fn test_mark_plain_text() {
        assert_eq!(mark(false, true), "+");
        assert_eq!(mark(false, false), "-");
    }
}
