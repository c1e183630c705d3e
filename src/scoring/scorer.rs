use std::future::Future;

use tokio_util::sync::CancellationToken;

use super::error::ScoringError;
use crate::config::Config;

/// Source of relevance scores and embeddings used by the ranking engine.
pub trait Scorer: Send + Sync {
    /// Primary path: relevance of `document` to `query` on the rank scale.
    fn score(
        &self,
        query: &str,
        document: &str,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<f32, ScoringError>> + Send;

    /// Fallback path: a dense vector for `text`.
    fn embed(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Vec<f32>, ScoringError>> + Send;

    /// Rebinds the scorer to a new model and options.
    ///
    /// Implementations must leave the previous binding in place on error.
    fn reconfigure(&self, config: &Config) -> Result<(), ScoringError>;
}
