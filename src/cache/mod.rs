//! Score memoization.

pub mod score;

#[cfg(test)]
mod score_tests;

pub use score::{ScoreCache, ScoreKey};
