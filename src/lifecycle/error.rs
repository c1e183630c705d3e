use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("initialization error: model file not found: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("initialization error: model path is not a file: {path}")]
    ModelNotAFile { path: PathBuf },

    #[error("initialization error: llama-embedding binary not found (searched {} locations and PATH)", .searched.len())]
    BinaryNotFound { searched: Vec<PathBuf> },

    #[error("initialization error: self-check of {binary} failed: {reason}")]
    SelfCheckFailed { binary: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;
