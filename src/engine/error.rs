use thiserror::Error;

use crate::config::ConfigError;
use crate::lifecycle::LifecycleError;
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Lifecycle(#[from] LifecycleError),

    #[error("scorer rejected configuration: {0}")]
    Reconfigure(#[source] ScoringError),

    #[error("inference error: failed to embed query: {source}")]
    QueryEmbedding {
        #[source]
        source: ScoringError,
    },

    #[error("ranking cancelled")]
    Cancelled,
}

pub type EngineResult<T> = Result<T, EngineError>;
