//! Deterministic in-process scorer for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;

use super::error::ScoringError;
use super::scorer::Scorer;
use crate::config::Config;

/// [`Scorer`] that answers from fixed tables.
///
/// Rank scores are looked up by document content, embeddings by text. A missing
/// entry fails with [`ScoringError::Unavailable`], which sends the engine down
/// its fallback path.
#[derive(Debug, Default)]
pub struct MockScorer {
    scores: RwLock<HashMap<String, f32>>,
    embeddings: RwLock<HashMap<String, Vec<f32>>>,
    score_calls: AtomicUsize,
    embed_calls: AtomicUsize,
    reconfigurations: AtomicUsize,
    reject_reconfigure: bool,
}

impl MockScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(self, document: impl Into<String>, score: f32) -> Self {
        self.set_score(document, score);
        self
    }

    pub fn with_embedding(self, text: impl Into<String>, embedding: Vec<f32>) -> Self {
        self.set_embedding(text, embedding);
        self
    }

    /// Makes every `reconfigure` call fail.
    pub fn rejecting_reconfigure(mut self) -> Self {
        self.reject_reconfigure = true;
        self
    }

    pub fn set_score(&self, document: impl Into<String>, score: f32) {
        self.scores.write().insert(document.into(), score);
    }

    pub fn remove_score(&self, document: &str) {
        self.scores.write().remove(document);
    }

    pub fn set_embedding(&self, text: impl Into<String>, embedding: Vec<f32>) {
        self.embeddings.write().insert(text.into(), embedding);
    }

    pub fn score_calls(&self) -> usize {
        self.score_calls.load(Ordering::Relaxed)
    }

    pub fn embed_calls(&self) -> usize {
        self.embed_calls.load(Ordering::Relaxed)
    }

    pub fn reconfigurations(&self) -> usize {
        self.reconfigurations.load(Ordering::Relaxed)
    }
}

impl Scorer for MockScorer {
    async fn score(
        &self,
        _query: &str,
        document: &str,
        cancel: &CancellationToken,
    ) -> Result<f32, ScoringError> {
        if cancel.is_cancelled() {
            return Err(ScoringError::Cancelled);
        }
        self.score_calls.fetch_add(1, Ordering::Relaxed);

        self.scores
            .read()
            .get(document)
            .copied()
            .ok_or_else(|| ScoringError::Unavailable {
                reason: format!("no rank score for {document:?}"),
            })
    }

    async fn embed(&self, text: &str, cancel: &CancellationToken) -> Result<Vec<f32>, ScoringError> {
        if cancel.is_cancelled() {
            return Err(ScoringError::Cancelled);
        }
        self.embed_calls.fetch_add(1, Ordering::Relaxed);

        self.embeddings
            .read()
            .get(text)
            .cloned()
            .ok_or_else(|| ScoringError::Unavailable {
                reason: format!("no embedding for {text:?}"),
            })
    }

    fn reconfigure(&self, _config: &Config) -> Result<(), ScoringError> {
        if self.reject_reconfigure {
            return Err(ScoringError::Unavailable {
                reason: "reconfiguration rejected".to_string(),
            });
        }
        self.reconfigurations.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
