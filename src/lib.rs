//! Document reranking driven by llama.cpp's `llama-embedding`.
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`RankingEngine`] - Scores, sorts, filters and truncates documents
//! - [`Document`], [`RankResult`] - Ranking inputs and outputs
//! - [`Config`], [`ScorerOptions`], [`EmbeddingPooling`] - Engine configuration
//!
//! ## Scoring
//! - [`Scorer`] - Per-pair scoring capability
//! - [`LlamaScorer`] - Subprocess-backed scorer
//! - [`LlamaInvoker`] - Argument building and process execution
//! - [`parse_rank_score`], [`parse_embedding`] - Output parsers
//! - [`cosine_similarity`], [`fallback_score`] - Embedding fallback
//!
//! ## Infrastructure
//! - [`ScoreCache`], [`ScoreKey`] - Per-engine score memoization
//! - [`lifecycle`] - Binary and model resolution, startup self-check
//!
//! ## Test/Mock Support
//! [`MockScorer`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod constants;
pub mod engine;
pub mod hashing;
pub mod inference;
pub mod lifecycle;
pub mod parsing;
pub mod scoring;
pub mod similarity;

#[cfg(all(test, unix))]
mod test_support;

pub use cache::{ScoreCache, ScoreKey};
pub use config::{Config, ConfigError, EmbeddingPooling, ScorerOptions};
pub use constants::{DEFAULT_MAX_DOCS, DEFAULT_THRESHOLD, FALLBACK_SCORE_SCALE, SENTINEL_SCORE};
pub use engine::{Document, EngineError, EngineResult, RankResult, RankingEngine};
pub use hashing::hash_pair;
pub use inference::{InferenceError, InferenceOutput, LlamaInvoker};
pub use lifecycle::{LifecycleError, LifecycleResult, ResolvedPaths};
pub use parsing::{ParseError, parse_embedding, parse_rank_score};
#[cfg(any(test, feature = "mock"))]
pub use scoring::MockScorer;
pub use scoring::{LlamaScorer, Scorer, ScoringError};
pub use similarity::{cosine_similarity, fallback_score};
pub use tokio_util::sync::CancellationToken;
