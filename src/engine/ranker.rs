use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::error::{EngineError, EngineResult};
use super::types::{Document, RankResult};
use crate::cache::{ScoreCache, ScoreKey};
use crate::config::Config;
use crate::constants::SENTINEL_SCORE;
use crate::scoring::{LlamaScorer, Scorer, ScoringError};
use crate::similarity::fallback_score;

/// Ranks documents against a query with a [`Scorer`], memoizing per-pair scores.
///
/// All operations take `&self`; share an engine across tasks behind an `Arc`.
pub struct RankingEngine<S: Scorer> {
    scorer: S,
    config: RwLock<Config>,
    cache: ScoreCache,
}

impl<S: Scorer + std::fmt::Debug> std::fmt::Debug for RankingEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankingEngine")
            .field("scorer", &self.scorer)
            .field("config", &*self.config.read())
            .field("cached_scores", &self.cache.len())
            .finish()
    }
}

impl RankingEngine<LlamaScorer> {
    /// Validates `config`, resolves the model and binary, and runs the startup
    /// self-check when enabled.
    pub async fn load(config: Config, cancel: &CancellationToken) -> EngineResult<Self> {
        config.validate()?;
        let config = config.normalized();
        let scorer = LlamaScorer::load(&config, cancel).await?;
        Ok(Self::from_parts(scorer, config))
    }
}

impl<S: Scorer> RankingEngine<S> {
    /// Builds an engine around an existing scorer.
    pub fn with_scorer(scorer: S, config: Config) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(scorer, config.normalized()))
    }

    fn from_parts(scorer: S, config: Config) -> Self {
        Self {
            scorer,
            config: RwLock::new(config),
            cache: ScoreCache::new(),
        }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn cache(&self) -> &ScoreCache {
        &self.cache
    }

    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    pub fn threshold(&self) -> f32 {
        self.config.read().threshold
    }

    pub fn max_docs(&self) -> usize {
        self.config.read().effective_max_docs()
    }

    /// The configured model path, as given by the caller.
    pub fn model_name(&self) -> String {
        self.config.read().model_path.display().to_string()
    }

    /// Scores every document, in input order.
    ///
    /// Cached pairs are not rescored. A failed rank call falls back to embedding
    /// similarity; if the document embedding also fails the pair gets
    /// [`SENTINEL_SCORE`], which is not cached. The query embedding is computed at
    /// most once per call, and its failure fails the call.
    ///
    /// Scores computed while [`configure`](Self::configure) or
    /// [`close`](Self::close) clears the cache are returned but not cached.
    pub async fn compute_scores(
        &self,
        query: &str,
        documents: &[Document],
        cancel: &CancellationToken,
    ) -> EngineResult<Vec<f32>> {
        let mut scores = Vec::with_capacity(documents.len());
        let mut query_embedding: Option<Vec<f32>> = None;
        let mut cache_hits = 0usize;
        let generation = self.cache.generation();

        for (index, document) in documents.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(EngineError::Cancelled);
            }

            let key = ScoreKey::new(query, &document.content);
            if let Some(score) = self.cache.get(&key) {
                cache_hits += 1;
                scores.push(score);
                continue;
            }

            let score = match self.scorer.score(query, &document.content, cancel).await {
                Ok(score) => Some(score),
                Err(e) if e.is_cancelled() => return Err(EngineError::Cancelled),
                Err(e) => {
                    warn!(
                        index,
                        document_id = %document.id,
                        error = %e,
                        "Rank scoring failed, falling back to embedding similarity"
                    );
                    self.similarity_score(query, document, &mut query_embedding, cancel)
                        .await?
                }
            };

            match score {
                Some(score) => {
                    if !self.cache.insert_if_generation(key, score, generation) {
                        debug!(index, "Cache cleared during scoring, result not cached");
                    }
                    scores.push(score);
                }
                None => scores.push(SENTINEL_SCORE),
            }
        }

        debug!(
            query_len = query.len(),
            num_documents = documents.len(),
            cache_hits,
            "Computed scores"
        );

        Ok(scores)
    }

    async fn similarity_score(
        &self,
        query: &str,
        document: &Document,
        query_embedding: &mut Option<Vec<f32>>,
        cancel: &CancellationToken,
    ) -> EngineResult<Option<f32>> {
        if query_embedding.is_none() {
            let embedding = self
                .scorer
                .embed(query, cancel)
                .await
                .map_err(|source| {
                    if source.is_cancelled() {
                        EngineError::Cancelled
                    } else {
                        EngineError::QueryEmbedding { source }
                    }
                })?;
            *query_embedding = Some(embedding);
        }
        let query_vec = query_embedding.as_deref().unwrap_or_default();

        match self.scorer.embed(&document.content, cancel).await {
            Ok(document_vec) => Ok(Some(fallback_score(query_vec, &document_vec))),
            Err(e) if e.is_cancelled() => Err(EngineError::Cancelled),
            Err(e) => {
                warn!(
                    document_id = %document.id,
                    error = %e,
                    sentinel = SENTINEL_SCORE,
                    "Document embedding failed, using sentinel score"
                );
                Ok(None)
            }
        }
    }

    /// Returns scored copies of `documents`, best first, with scores below the
    /// threshold removed and at most `max_docs` entries.
    pub async fn rerank(
        &self,
        query: &str,
        documents: &[Document],
        cancel: &CancellationToken,
    ) -> EngineResult<Vec<Document>> {
        let max_docs = self.max_docs();
        let ranked = self.ranked(query, documents, cancel).await?;

        Ok(ranked
            .into_iter()
            .take(max_docs)
            .map(|result| result.document)
            .collect())
    }

    /// Like [`rerank`](Self::rerank) but keeps each document's input position.
    ///
    /// `top_n > 0` limits the result to `min(top_n, max_docs)`; `top_n == 0`
    /// returns every document at or above the threshold.
    pub async fn rank(
        &self,
        query: &str,
        documents: &[Document],
        top_n: usize,
        cancel: &CancellationToken,
    ) -> EngineResult<Vec<RankResult>> {
        let max_docs = self.max_docs();
        let mut ranked = self.ranked(query, documents, cancel).await?;

        if top_n > 0 {
            ranked.truncate(top_n.min(max_docs));
        }

        Ok(ranked)
    }

    async fn ranked(
        &self,
        query: &str,
        documents: &[Document],
        cancel: &CancellationToken,
    ) -> EngineResult<Vec<RankResult>> {
        if documents.is_empty() {
            debug!("No documents provided for ranking");
            return Ok(Vec::new());
        }

        let scores = self.compute_scores(query, documents, cancel).await?;
        let threshold = self.threshold();

        let mut ranked: Vec<RankResult> = documents
            .iter()
            .zip(scores)
            .enumerate()
            .map(|(index, (document, score))| {
                let mut document = document.clone();
                document.score = score;
                RankResult {
                    document,
                    score,
                    index,
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.index.cmp(&b.index))
        });
        ranked.retain(|result| result.score >= threshold);

        debug!(
            num_documents = documents.len(),
            kept = ranked.len(),
            threshold,
            top_score = ranked.first().map(|r| r.score),
            "Ranked documents"
        );

        Ok(ranked)
    }

    /// Replaces the active configuration and rebinds the scorer.
    ///
    /// On error the previous configuration stays in effect. Changing the model,
    /// the binary or the embedding pooling clears the score cache.
    pub fn configure(&self, config: Config) -> EngineResult<()> {
        config.validate()?;
        let config = config.normalized();

        self.scorer.reconfigure(&config).map_err(|e| match e {
            ScoringError::Lifecycle(e) => EngineError::Lifecycle(e),
            other => EngineError::Reconfigure(other),
        })?;

        let binding_changed = {
            let mut current = self.config.write();
            let changed = scorer_binding_changed(&current, &config);
            *current = config;
            changed
        };

        if binding_changed {
            self.cache.clear();
        }

        info!(
            model = %self.model_name(),
            threshold = self.threshold(),
            max_docs = self.max_docs(),
            cache_cleared = binding_changed,
            "Engine reconfigured"
        );

        Ok(())
    }

    /// Releases cached scores. The engine remains usable.
    pub fn close(&self) {
        let released = self.cache.len();
        self.cache.clear();
        info!(released, "Engine closed");
    }
}

// Threads, threshold, max_docs and the timeout do not affect score values.
fn scorer_binding_changed(current: &Config, next: &Config) -> bool {
    current.model_path != next.model_path
        || current.binary_path != next.binary_path
        || current.options.pooling != next.options.pooling
}
