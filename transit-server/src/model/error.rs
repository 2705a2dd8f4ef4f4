//! Model store error types.

use std::path::PathBuf;

/// Errors from loading or running a scoring model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// No model artifact at the configured path.
    #[error("model not found at {0}")]
    NotFound(PathBuf),

    /// The artifact or its metadata could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The artifact or its metadata is not valid JSON for its schema.
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The artifact parsed but is structurally unusable.
    #[error("invalid model: {0}")]
    Invalid(String),

    /// Prediction failed for a feature vector.
    #[error("inference failed: {0}")]
    Inference(String),
}
