use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::error::ScoringError;
use super::scorer::Scorer;
use crate::config::Config;
use crate::inference::LlamaInvoker;
use crate::lifecycle::{self, LifecycleResult, ResolvedPaths};
use crate::parsing::{parse_embedding, parse_rank_score};

/// [`Scorer`] backed by the `llama-embedding` process.
pub struct LlamaScorer {
    invoker: RwLock<LlamaInvoker>,
}

impl std::fmt::Debug for LlamaScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlamaScorer")
            .field("invoker", &*self.invoker.read())
            .finish()
    }
}

impl LlamaScorer {
    /// Resolves paths, runs the self-check if enabled, and binds the scorer.
    pub async fn load(config: &Config, cancel: &CancellationToken) -> LifecycleResult<Self> {
        let paths = lifecycle::prepare(config, cancel).await?;
        Ok(Self::from_paths(paths, config))
    }

    /// Binds to already-resolved paths. No validation is performed.
    pub fn from_paths(paths: ResolvedPaths, config: &Config) -> Self {
        Self {
            invoker: RwLock::new(Self::invoker_for(paths, config)),
        }
    }

    /// Current model and binary.
    pub fn paths(&self) -> ResolvedPaths {
        let invoker = self.invoker.read();
        ResolvedPaths {
            model: invoker.model().to_path_buf(),
            binary: invoker.binary().to_path_buf(),
        }
    }

    fn invoker_for(paths: ResolvedPaths, config: &Config) -> LlamaInvoker {
        LlamaInvoker::new(paths.binary, paths.model, config.options.clone())
            .with_timeout(config.inference_timeout)
    }

    // Snapshot so no guard lives across an await.
    fn invoker(&self) -> LlamaInvoker {
        self.invoker.read().clone()
    }
}

impl Scorer for LlamaScorer {
    async fn score(
        &self,
        query: &str,
        document: &str,
        cancel: &CancellationToken,
    ) -> Result<f32, ScoringError> {
        let output = self.invoker().rank(query, document, cancel).await?;
        let score = parse_rank_score(&output.stdout, &output.stderr)?;

        debug!(
            query_len = query.len(),
            document_len = document.len(),
            score,
            "Rank score parsed"
        );

        Ok(score)
    }

    async fn embed(&self, text: &str, cancel: &CancellationToken) -> Result<Vec<f32>, ScoringError> {
        let output = self.invoker().embed(text, cancel).await?;
        let embedding = parse_embedding(&output.stdout)?;

        debug!(
            text_len = text.len(),
            dim = embedding.len(),
            "Embedding parsed"
        );

        Ok(embedding)
    }

    fn reconfigure(&self, config: &Config) -> Result<(), ScoringError> {
        let paths = lifecycle::resolve(config)?;

        info!(
            model = %paths.model.display(),
            binary = %paths.binary.display(),
            "Rebinding inference scorer"
        );

        *self.invoker.write() = Self::invoker_for(paths, config);
        Ok(())
    }
}
