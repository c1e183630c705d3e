//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No model path was supplied.
    #[error("invalid input: model path is required")]
    MissingModelPath,

    /// Thread count must be positive when provided.
    #[error("invalid thread count {value}: must be greater than zero")]
    InvalidThreads { value: usize },

    /// Threshold must be a finite number.
    #[error("invalid threshold {value}: must be finite")]
    InvalidThreshold { value: f32 },

    /// Inference timeout must be non-zero when provided.
    #[error("invalid inference timeout: must be greater than zero")]
    InvalidTimeout,

    /// An environment variable held a value that could not be parsed.
    #[error("failed to parse {name}='{value}': {reason}")]
    EnvParse {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// Pooling strategy name was not recognized.
    #[error("unknown pooling strategy '{value}' (expected 'default' or 'mean')")]
    UnknownPooling { value: String },
}
