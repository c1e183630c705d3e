//! Ranking engine: scores a document set against a query, then sorts,
//! threshold-filters and truncates.
//!
//! # Scoring tiers
//!
//! 1. Score cache hit.
//! 2. Rank pooling via [`Scorer::score`](crate::scoring::Scorer::score).
//! 3. Cosine similarity of embeddings, scaled onto the rank range.
//! 4. [`SENTINEL_SCORE`](crate::constants::SENTINEL_SCORE) when the document
//!    cannot be embedded either.
//!
//! Only tiers 2 and 3 populate the cache, so a sentinel pair is retried on the
//! next call.

pub mod error;
pub mod ranker;
pub mod types;


pub use error::{EngineError, EngineResult};
pub use ranker::RankingEngine;
pub use types::{Document, RankResult};
