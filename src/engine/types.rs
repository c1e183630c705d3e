use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A candidate to be ranked against a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    /// Written by the engine on the returned copies.
    #[serde(default)]
    pub score: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

impl Document {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            score: 0.0,
            metadata: None,
        }
    }

    /// Wraps raw strings as documents with ids `doc_1`, `doc_2`, ...
    pub fn from_contents<I, S>(contents: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        contents
            .into_iter()
            .enumerate()
            .map(|(i, content)| Self::new(format!("doc_{}", i + 1), content))
            .collect()
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        self
    }
}

/// One entry of a [`rank`](super::RankingEngine::rank) result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankResult {
    pub document: Document,
    pub score: f32,
    /// Position of the document in the caller's input.
    pub index: usize,
}
