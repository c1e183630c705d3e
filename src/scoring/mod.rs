//! Per-pair scoring behind the [`Scorer`] trait.
//!
//! [`LlamaScorer`] drives the external `llama-embedding` process: rank pooling for
//! the primary score, JSON embeddings for the fallback. [`MockScorer`] answers from
//! in-memory tables and is available with the `mock` feature.

pub mod error;
pub mod llama;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod scorer;

#[cfg(test)]
mod tests;

pub use error::ScoringError;
pub use llama::LlamaScorer;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockScorer;
pub use scorer::Scorer;
