use thiserror::Error;

use crate::inference::InferenceError;
use crate::lifecycle::LifecycleError;
use crate::parsing::ParseError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("inference error: {0}")]
    Inference(#[from] InferenceError),

    #[error("output parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("scorer rebind failed: {0}")]
    Lifecycle(#[from] LifecycleError),

    #[error("scorer unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("scoring cancelled")]
    Cancelled,
}

impl ScoringError {
    /// Returns `true` if the failure came from the caller's cancellation token.
    pub fn is_cancelled(&self) -> bool {
        match self {
            Self::Cancelled => true,
            Self::Inference(e) => e.is_cancelled(),
            _ => false,
        }
    }
}
