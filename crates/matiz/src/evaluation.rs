//! Evaluation boundary: file-level entry point that never propagates errors.
//!
//! Missing files, malformed JSON, and shape errors all become a zero-score
//! outcome with the message recorded, so a benchmark run can never be
//! crashed by a bad solution.

use crate::result::MatizResult;
use crate::scorer::{score, GroundTruthSet, PredictionSet, ScoreReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

/// Default name of the solution file inside a solution directory
pub const DEFAULT_SOLUTION_FILE: &str = "solution.json";

/// Default accuracy threshold for a successful evaluation: every single
/// image must be labeled correctly
pub const DEFAULT_ACCURACY_THRESHOLD: f64 = 1.0;

/// Configuration for the evaluator
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatorConfig {
    /// Solution file name looked up inside the solution directory
    pub solution_file: String,
    /// Path of the ground-truth file
    pub ground_truth_file: PathBuf,
    /// Minimum accuracy for `success`
    pub threshold: f64,
}

impl EvaluatorConfig {
    /// Create a configuration for the given ground-truth file, with the
    /// default solution file name and threshold
    #[must_use]
    pub fn new(ground_truth_file: impl Into<PathBuf>) -> Self {
        Self {
            solution_file: DEFAULT_SOLUTION_FILE.to_string(),
            ground_truth_file: ground_truth_file.into(),
            threshold: DEFAULT_ACCURACY_THRESHOLD,
        }
    }

    /// Set the solution file name
    #[must_use]
    pub fn with_solution_file(mut self, name: impl Into<String>) -> Self {
        self.solution_file = name.into();
        self
    }

    /// Set the accuracy threshold
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Result of one evaluation run
///
/// Always well-formed: a failed run carries a zero report, `success =
/// false`, and the failure message in `error_message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    /// Derived metrics (zero-valued on failure)
    pub report: ScoreReport,
    /// Whether accuracy reached the configured threshold
    pub success: bool,
    /// Failure description, or the below-threshold explanation
    pub error_message: Option<String>,
    /// When the evaluation started
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration in seconds
    pub execution_time_secs: f64,
}

impl EvaluationOutcome {
    fn failed(message: String, started_at: DateTime<Utc>, timer: Instant) -> Self {
        Self {
            report: ScoreReport::zero(),
            success: false,
            error_message: Some(message),
            started_at,
            execution_time_secs: timer.elapsed().as_secs_f64(),
        }
    }
}

/// Scores a solution directory against a ground-truth file
#[derive(Debug, Clone)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    /// Create an evaluator with the given configuration
    #[must_use]
    pub const fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    #[must_use]
    pub const fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate a solution directory against the configured ground-truth file
    ///
    /// Never returns an error: every failure is converted into a zero-score
    /// outcome with the message attached.
    #[must_use]
    pub fn evaluate(&self, solution_dir: &Path) -> EvaluationOutcome {
        let started_at = Utc::now();
        let timer = Instant::now();

        let ground_truth = match GroundTruthSet::load(&self.config.ground_truth_file) {
            Ok(gt) => gt,
            Err(err) => {
                return EvaluationOutcome::failed(
                    format!("Evaluation error: {err}"),
                    started_at,
                    timer,
                )
            }
        };

        self.run(solution_dir, &ground_truth, started_at, timer)
    }

    /// Evaluate against an already-loaded ground-truth set
    ///
    /// Used when the caller holds the ground truth directly (e.g. straight
    /// from the generator) instead of a file path.
    #[must_use]
    pub fn evaluate_with_ground_truth(
        &self,
        solution_dir: &Path,
        ground_truth: &GroundTruthSet,
    ) -> EvaluationOutcome {
        let started_at = Utc::now();
        let timer = Instant::now();
        self.run(solution_dir, ground_truth, started_at, timer)
    }

    fn run(
        &self,
        solution_dir: &Path,
        ground_truth: &GroundTruthSet,
        started_at: DateTime<Utc>,
        timer: Instant,
    ) -> EvaluationOutcome {
        let solution_path = solution_dir.join(&self.config.solution_file);
        debug!(solution = %solution_path.display(), "loading solution file");

        let predictions = match PredictionSet::load(&solution_path) {
            Ok(preds) => preds,
            Err(err) => {
                return EvaluationOutcome::failed(
                    format!("Evaluation error: {err}"),
                    started_at,
                    timer,
                )
            }
        };

        let outcome = score(&predictions, ground_truth, self.config.threshold);
        debug!(
            accuracy = outcome.report.accuracy,
            success = outcome.success,
            "evaluation scored"
        );

        let error_message = if outcome.success {
            None
        } else {
            Some(format!(
                "Accuracy {:.3} below threshold {}",
                outcome.report.accuracy, self.config.threshold
            ))
        };

        EvaluationOutcome {
            report: outcome.report,
            success: outcome.success,
            error_message,
            started_at,
            execution_time_secs: timer.elapsed().as_secs_f64(),
        }
    }
}

/// Render evaluation outcomes as a sectioned text report
#[must_use]
pub fn render_report_text(outcomes: &[EvaluationOutcome]) -> String {
    if outcomes.is_empty() {
        return "No evaluation results to report.\n".to_string();
    }

    let mut output = String::new();
    output.push_str("Color Dominance Detection - Evaluation Report\n");
    output.push_str("════════════════════════════════════════════════════════════\n");

    for (i, outcome) in outcomes.iter().enumerate() {
        output.push_str(&format!("\nEvaluation {}:\n", i + 1));
        output.push_str(&format!("  Started: {}\n", outcome.started_at.to_rfc3339()));
        output.push_str(&format!(
            "  Success: {}\n",
            if outcome.success { "yes" } else { "no" }
        ));
        output.push_str(&format!(
            "  Execution time: {:.2}s\n",
            outcome.execution_time_secs
        ));
        if let Some(ref message) = outcome.error_message {
            output.push_str(&format!("  Error: {message}\n"));
        }
        output.push_str("  Metrics:\n");
        output.push_str(&format!(
            "    accuracy: {:.3} ({:.1}%)\n",
            outcome.report.accuracy,
            outcome.report.accuracy * 100.0
        ));
        output.push_str(&format!("    total images: {}\n", outcome.report.total));
        output.push_str(&format!("    correct: {}\n", outcome.report.correct));
        output.push_str(&format!("    wrong: {}\n", outcome.report.wrong()));
        output.push_str(&format!("    missing: {}\n", outcome.report.missing));
    }

    output
}

/// Render an evaluation outcome as pretty JSON
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_report_json(outcome: &EvaluationOutcome) -> MatizResult<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_ground_truth(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("ground_truth_colors.json");
        std::fs::write(&path, r#"{"a.png": "red", "b.png": "blue"}"#).unwrap();
        path
    }

    fn write_solution(dir: &TempDir, body: &str) {
        std::fs::write(dir.path().join("solution.json"), body).unwrap();
    }

    #[test]
    fn test_successful_evaluation() {
        let dir = TempDir::new().unwrap();
        let gt_path = write_ground_truth(&dir);
        write_solution(
            &dir,
            r#"{"predictions": {"a.png": "RED", "b.png": " blue "}}"#,
        );

        let evaluator = Evaluator::new(EvaluatorConfig::new(gt_path));
        let outcome = evaluator.evaluate(dir.path());

        assert!(outcome.success);
        assert!(outcome.error_message.is_none());
        assert_eq!(outcome.report.correct, 2);
        assert!((outcome.report.accuracy - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_below_threshold_records_message() {
        let dir = TempDir::new().unwrap();
        let gt_path = write_ground_truth(&dir);
        write_solution(&dir, r#"{"predictions": {"a.png": "red"}}"#);

        let evaluator = Evaluator::new(EvaluatorConfig::new(gt_path));
        let outcome = evaluator.evaluate(dir.path());

        assert!(!outcome.success);
        assert!((outcome.report.accuracy - 0.5).abs() < f64::EPSILON);
        let message = outcome.error_message.unwrap();
        assert!(message.contains("0.500"));
        assert!(message.contains("threshold"));
    }

    #[test]
    fn test_lower_threshold_passes() {
        let dir = TempDir::new().unwrap();
        let gt_path = write_ground_truth(&dir);
        write_solution(&dir, r#"{"predictions": {"a.png": "red"}}"#);

        let evaluator = Evaluator::new(EvaluatorConfig::new(gt_path).with_threshold(0.5));
        let outcome = evaluator.evaluate(dir.path());
        assert!(outcome.success);
    }

    #[test]
    fn test_missing_solution_file_never_errors() {
        let dir = TempDir::new().unwrap();
        let gt_path = write_ground_truth(&dir);

        let evaluator = Evaluator::new(EvaluatorConfig::new(gt_path));
        let outcome = evaluator.evaluate(dir.path());

        assert!(!outcome.success);
        assert_eq!(outcome.report, ScoreReport::zero());
        assert!(outcome.error_message.unwrap().contains("not found"));
    }

    #[test]
    fn test_missing_ground_truth_never_errors() {
        let dir = TempDir::new().unwrap();
        write_solution(&dir, r#"{"predictions": {}}"#);

        let evaluator =
            Evaluator::new(EvaluatorConfig::new(dir.path().join("no_such_gt.json")));
        let outcome = evaluator.evaluate(dir.path());

        assert!(!outcome.success);
        assert_eq!(outcome.report, ScoreReport::zero());
        assert!(outcome.error_message.is_some());
    }

    #[test]
    fn test_malformed_solution_never_errors() {
        let dir = TempDir::new().unwrap();
        let gt_path = write_ground_truth(&dir);
        write_solution(&dir, "{not json");

        let evaluator = Evaluator::new(EvaluatorConfig::new(gt_path));
        let outcome = evaluator.evaluate(dir.path());

        assert!(!outcome.success);
        assert_eq!(outcome.report, ScoreReport::zero());
        assert!(outcome.error_message.unwrap().contains("Evaluation error"));
    }

    #[test]
    fn test_wrong_shape_never_errors() {
        let dir = TempDir::new().unwrap();
        let gt_path = write_ground_truth(&dir);
        write_solution(&dir, r#"{"results": {"a.png": "red"}}"#);

        let evaluator = Evaluator::new(EvaluatorConfig::new(gt_path));
        let outcome = evaluator.evaluate(dir.path());

        assert!(!outcome.success);
        assert!(outcome
            .error_message
            .unwrap()
            .contains("predictions"));
    }

    #[test]
    fn test_evaluate_with_ground_truth_in_memory() {
        let dir = TempDir::new().unwrap();
        write_solution(&dir, r#"{"predictions": {"x.png": "green"}}"#);

        let mut gt = GroundTruthSet::new();
        gt.insert("x.png", "green");

        let evaluator =
            Evaluator::new(EvaluatorConfig::new(dir.path().join("unused.json")));
        let outcome = evaluator.evaluate_with_ground_truth(dir.path(), &gt);
        assert!(outcome.success);
    }

    #[test]
    fn test_custom_solution_file_name() {
        let dir = TempDir::new().unwrap();
        let gt_path = write_ground_truth(&dir);
        std::fs::write(
            dir.path().join("answers.json"),
            r#"{"predictions": {"a.png": "red", "b.png": "blue"}}"#,
        )
        .unwrap();

        let evaluator =
            Evaluator::new(EvaluatorConfig::new(gt_path).with_solution_file("answers.json"));
        let outcome = evaluator.evaluate(dir.path());
        assert!(outcome.success);
    }

    #[test]
    fn test_render_report_text_empty() {
        let output = render_report_text(&[]);
        assert!(output.contains("No evaluation results"));
    }

    #[test]
    fn test_render_report_text_contents() {
        let outcome = EvaluationOutcome {
            report: ScoreReport {
                accuracy: 0.933,
                total: 15,
                correct: 14,
                missing: 1,
            },
            success: false,
            error_message: Some("Accuracy 0.933 below threshold 1".to_string()),
            started_at: Utc::now(),
            execution_time_secs: 0.01,
        };

        let output = render_report_text(&[outcome]);
        assert!(output.contains("Evaluation 1:"));
        assert!(output.contains("accuracy: 0.933 (93.3%)"));
        assert!(output.contains("total images: 15"));
        assert!(output.contains("missing: 1"));
        assert!(output.contains("Error:"));
    }

    #[test]
    fn test_outcome_json_round_trip() {
        let outcome = EvaluationOutcome {
            report: ScoreReport {
                accuracy: 1.0,
                total: 2,
                correct: 2,
                missing: 0,
            },
            success: true,
            error_message: None,
            started_at: Utc::now(),
            execution_time_secs: 0.5,
        };

        let json = render_report_json(&outcome).unwrap();
        let parsed: EvaluationOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, outcome);
    }
}
