use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("failed to spawn {binary}: {source}")]
    SpawnFailed {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("inference process failed ({status}): {stderr}")]
    NonZeroExit { status: ExitStatus, stderr: String },

    #[error("inference process timed out after {after:?}")]
    TimedOut { after: Duration },

    #[error("inference cancelled")]
    Cancelled,

    #[error("failed waiting for inference process: {0}")]
    Io(#[from] std::io::Error),
}

impl InferenceError {
    /// Returns `true` if the caller cancelled the invocation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
