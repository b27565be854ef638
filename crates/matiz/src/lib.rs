//! Matiz: color-dominance benchmark harness.
//!
//! Synthesizes datasets of images with colored geometric regions, computes
//! each image's area-dominant color as ground truth, and scores externally
//! produced JSON predictions against that ground truth.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     MATIZ Architecture                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌───────────┐   ┌──────────┐   ┌─────────┐  │
//! │  │ Dataset   │──►│ Dominant  │──►│ Ground   │──►│ Scorer / │ │
//! │  │ Generator │   │ Color     │   │ Truth    │   │ Evaluator│ │
//! │  │ (shapes)  │   │ Extractor │   │ (JSON)   │   │ (JSON)   │ │
//! │  └───────────┘   └───────────┘   └──────────┘   └─────────┘  │
//! │                                      ▲                       │
//! │                        external agent predictions            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both core operations are pure, single-threaded functions over
//! caller-supplied inputs: the extractor is a single O(pixels × palette)
//! pass, the scorer a single pass over the ground-truth set.

#![warn(missing_docs)]

/// Evaluation boundary: never-crashing file-level scoring with rendered
/// reports
pub mod evaluation;

/// Dominant-color extraction over rendered images
pub mod extractor;

/// Deterministic dataset synthesis
pub mod generator;

/// The closed set of recognized color names
pub mod palette;

mod result;

/// Prediction scoring against ground truth
pub mod scorer;

pub use evaluation::{
    render_report_json, render_report_text, EvaluationOutcome, Evaluator, EvaluatorConfig,
    DEFAULT_ACCURACY_THRESHOLD, DEFAULT_SOLUTION_FILE,
};
pub use extractor::{ColorAreaTally, DominantColorExtractor, ExtractorConfig};
pub use generator::{
    DatasetGenerator, GeneratedDataset, GeneratorConfig, GROUND_TRUTH_FILE, TARGETS_FILE,
};
pub use palette::{Palette, Rgb};
pub use result::{MatizError, MatizResult};
pub use scorer::{
    score, score_details, GroundTruthSet, ImageVerdict, PredictionSet, ScoreOutcome, ScoreReport,
    VerdictStatus,
};
