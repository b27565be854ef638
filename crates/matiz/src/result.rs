//! Result and error types for Matiz.

use thiserror::Error;

/// Result type for Matiz operations
pub type MatizResult<T> = Result<T, MatizError>;

/// Errors that can occur in Matiz
#[derive(Debug, Error)]
pub enum MatizError {
    /// Invalid harness configuration (malformed palette, non-square image)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// Image contains no non-background pixels, dominant color undefined
    #[error("Empty image: {message}")]
    EmptyImage {
        /// Error message
        message: String,
    },

    /// Solution or ground-truth file absent
    #[error("File not found: {path}")]
    MissingFile {
        /// Path that was looked up
        path: String,
    },

    /// Input parsed as JSON but has the wrong shape
    #[error("Malformed input: {message}")]
    MalformedInput {
        /// Error message
        message: String,
    },

    /// PNG encoding failed while writing a dataset image
    #[error("Image encoding failed: {message}")]
    ImageEncoding {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MatizError {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an empty-image error
    #[must_use]
    pub fn empty_image(message: impl Into<String>) -> Self {
        Self::EmptyImage {
            message: message.into(),
        }
    }

    /// Create a missing-file error
    #[must_use]
    pub fn missing_file(path: impl Into<String>) -> Self {
        Self::MissingFile { path: path.into() }
    }

    /// Create a malformed-input error
    #[must_use]
    pub fn malformed_input(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }
}
