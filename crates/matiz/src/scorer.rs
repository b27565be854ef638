//! Prediction scoring: compare a prediction set against ground truth and
//! derive accuracy, correct/missing counts, and a pass/fail verdict.

use crate::result::{MatizError, MatizResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Lower-case and trim a color name for comparison
fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// The authoritative filename -> color mapping computed by the generator
///
/// Values are normalized (lower-cased, trimmed) on insertion. Serialized as
/// a plain JSON object, one entry per generated image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroundTruthSet {
    entries: BTreeMap<String, String>,
}

impl GroundTruthSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the true color for a filename
    pub fn insert(&mut self, filename: impl Into<String>, color: &str) {
        self.entries.insert(filename.into(), normalize(color));
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The true color for a filename, if recorded
    #[must_use]
    pub fn get(&self, filename: &str) -> Option<&str> {
        self.entries.get(filename).map(String::as_str)
    }

    /// Iterate entries in filename order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(filename, color)| (filename.as_str(), color.as_str()))
    }

    /// Load a ground-truth file (JSON object, filename -> color name)
    ///
    /// # Errors
    ///
    /// `MissingFile` if the path does not exist, `MalformedInput` if the
    /// JSON is not an object of strings, `Json`/`Io` for lower-level
    /// failures.
    pub fn load(path: impl AsRef<Path>) -> MatizResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MatizError::missing_file(path.display().to_string()));
        }
        let data = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&data)?;
        let Value::Object(map) = value else {
            return Err(MatizError::malformed_input(
                "ground-truth file must be a JSON object",
            ));
        };

        let mut set = Self::new();
        for (filename, color) in map {
            let Value::String(color) = color else {
                return Err(MatizError::malformed_input(format!(
                    "ground-truth entry for {filename} is not a string"
                )));
            };
            set.insert(filename, &color);
        }
        Ok(set)
    }

    /// Write the set as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> MatizResult<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Agent predictions, keyed by filename
///
/// Built from externally supplied JSON and therefore lenient about content:
/// values are normalized, non-string values are silently dropped (the
/// original loader's behavior, kept for strict compatibility), and keys
/// absent from the ground truth are ignored by the scorer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionSet {
    entries: BTreeMap<String, String>,
}

impl PredictionSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a prediction for a filename
    pub fn insert(&mut self, filename: impl Into<String>, color: &str) {
        self.entries.insert(filename.into(), normalize(color));
    }

    /// Number of predictions
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The predicted color for a filename, if present
    #[must_use]
    pub fn get(&self, filename: &str) -> Option<&str> {
        self.entries.get(filename).map(String::as_str)
    }

    /// Build a prediction set from a parsed solution document
    ///
    /// The document must be a JSON object with a `"predictions"` object;
    /// any other top-level keys are ignored. Non-string prediction values
    /// are dropped without error.
    ///
    /// # Errors
    ///
    /// `MalformedInput` if the document is not an object or the
    /// `"predictions"` key is missing or not an object.
    pub fn from_value(value: &Value) -> MatizResult<Self> {
        let Value::Object(map) = value else {
            return Err(MatizError::malformed_input(
                "solution file must be a JSON object",
            ));
        };
        let Some(Value::Object(predictions)) = map.get("predictions") else {
            return Err(MatizError::malformed_input(
                "solution file must contain a top-level \"predictions\" object",
            ));
        };

        let mut set = Self::new();
        for (filename, prediction) in predictions {
            if let Value::String(color) = prediction {
                set.insert(filename.clone(), color);
            }
        }
        Ok(set)
    }

    /// Load a solution file from disk
    ///
    /// # Errors
    ///
    /// `MissingFile` if the path does not exist, plus everything
    /// [`Self::from_value`] can return.
    pub fn load(path: impl AsRef<Path>) -> MatizResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MatizError::missing_file(path.display().to_string()));
        }
        let data = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&data)?;
        Self::from_value(&value)
    }
}

/// Derived metrics for one evaluation, immutable after creation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Fraction of ground-truth entries predicted correctly, in [0, 1]
    pub accuracy: f64,
    /// Number of ground-truth entries
    pub total: usize,
    /// Entries whose prediction matched exactly (after normalization)
    pub correct: usize,
    /// Entries with no prediction at all
    pub missing: usize,
}

impl ScoreReport {
    /// A zero-valued report, used for empty ground truth and for failed
    /// evaluations
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            accuracy: 0.0,
            total: 0,
            correct: 0,
            missing: 0,
        }
    }

    /// Entries predicted but predicted wrongly (neither correct nor missing)
    #[must_use]
    pub const fn wrong(&self) -> usize {
        self.total - self.correct - self.missing
    }
}

/// A score report together with the threshold verdict
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    /// Derived metrics
    pub report: ScoreReport,
    /// Whether `accuracy >= threshold`
    pub success: bool,
}

/// How a single image's prediction compared to ground truth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerdictStatus {
    /// Prediction matched the true color
    Correct,
    /// Prediction present but different from the true color
    Wrong,
    /// No prediction supplied for this filename
    Missing,
}

/// Per-image comparison detail, for breakdown reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageVerdict {
    /// Image filename
    pub filename: String,
    /// True color from the ground truth
    pub expected: String,
    /// Predicted color, if any
    pub predicted: Option<String>,
    /// Comparison result
    pub status: VerdictStatus,
}

/// Score predictions against ground truth
///
/// Pure and deterministic: for each ground-truth filename the prediction is
/// either correct, wrong, or missing; extra prediction keys never affect the
/// result. An empty ground truth yields a zero report with `success = false`
/// regardless of threshold.
#[must_use]
pub fn score(
    predictions: &PredictionSet,
    ground_truth: &GroundTruthSet,
    threshold: f64,
) -> ScoreOutcome {
    let total = ground_truth.len();
    if total == 0 {
        return ScoreOutcome {
            report: ScoreReport::zero(),
            success: false,
        };
    }

    let mut correct = 0;
    let mut missing = 0;
    for (filename, true_color) in ground_truth.iter() {
        match predictions.get(filename) {
            None => missing += 1,
            Some(predicted) if predicted == true_color => correct += 1,
            Some(_) => {}
        }
    }

    let accuracy = correct as f64 / total as f64;
    ScoreOutcome {
        report: ScoreReport {
            accuracy,
            total,
            correct,
            missing,
        },
        success: accuracy >= threshold,
    }
}

/// Per-image breakdown of a comparison, in filename order
#[must_use]
pub fn score_details(
    predictions: &PredictionSet,
    ground_truth: &GroundTruthSet,
) -> Vec<ImageVerdict> {
    ground_truth
        .iter()
        .map(|(filename, expected)| {
            let predicted = predictions.get(filename).map(ToString::to_string);
            let status = match predicted.as_deref() {
                None => VerdictStatus::Missing,
                Some(color) if color == expected => VerdictStatus::Correct,
                Some(_) => VerdictStatus::Wrong,
            };
            ImageVerdict {
                filename: filename.to_string(),
                expected: expected.to_string(),
                predicted,
                status,
            }
        })
        .collect()
}
