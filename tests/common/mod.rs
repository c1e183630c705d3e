//! Shared fixtures for integration tests.
#![allow(dead_code)]

use rerank::{Config, Document, MockScorer, RankingEngine};

pub const QUERY: &str = "machine learning";

pub const ML_DOCUMENTS: [&str; 3] = ["AI research", "cooking recipes", "deep learning"];

/// Scores from the reference scenario: 8.0, -2.0, 9.0.
pub fn ml_scorer() -> MockScorer {
    MockScorer::new()
        .with_score("AI research", 8.0)
        .with_score("cooking recipes", -2.0)
        .with_score("deep learning", 9.0)
}

pub fn ml_documents() -> Vec<Document> {
    Document::from_contents(ML_DOCUMENTS)
}

pub fn mock_engine(scorer: MockScorer, config: Config) -> RankingEngine<MockScorer> {
    RankingEngine::with_scorer(scorer, config).expect("valid config")
}

pub fn test_config() -> Config {
    Config::new("/models/test-reranker.gguf")
}
