//! Parsers for `llama-embedding` output.
//!
//! Rank mode prints its score on stderr, on a line such as
//! `rerank score 0: -6.851`. Embedding mode with `--embd-output-format json`
//! prints an OpenAI-style list on stdout:
//!
//! ```json
//! {"object": "list", "data": [{"object": "embedding", "index": 0, "embedding": [0.1, 0.2]}]}
//! ```

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ParseError;

use serde::Deserialize;

use crate::constants::RANK_SCORE_MARKER;

/// JSON document emitted by `llama-embedding --embd-output-format json`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingResponse {
    #[serde(default)]
    pub object: Option<String>,
    pub data: Vec<EmbeddingDatum>,
}

/// One embedding entry.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingDatum {
    #[serde(default)]
    pub object: Option<String>,
    pub index: usize,
    pub embedding: Vec<f32>,
}

/// Extracts a relevance score from rank-mode output.
///
/// Scans `stderr` for the first `rerank score <index> <value>` line with a finite
/// value, then falls back to reading the whole of `stdout` as one number.
pub fn parse_rank_score(stdout: &str, stderr: &str) -> Result<f32, ParseError> {
    if let Some(score) = stderr.lines().find_map(score_from_line) {
        return Ok(score);
    }

    let trimmed = stdout.trim();
    if !trimmed.is_empty()
        && let Ok(score) = trimmed.parse::<f32>()
        && score.is_finite()
    {
        return Ok(score);
    }

    Err(ParseError::MissingRankScore)
}

fn score_from_line(line: &str) -> Option<f32> {
    let line = line.trim();
    if !line.contains(RANK_SCORE_MARKER) {
        return None;
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    parts
        .iter()
        .enumerate()
        .filter(|(_, part)| **part == "score")
        .filter_map(|(i, _)| parts.get(i + 2))
        .filter_map(|token| token.parse::<f32>().ok())
        .find(|score| score.is_finite())
}

/// Extracts the first embedding vector from embedding-mode stdout.
///
/// Empty result lists and all-zero vectors are rejected: a zero vector means the
/// model produced no representation.
pub fn parse_embedding(stdout: &str) -> Result<Vec<f32>, ParseError> {
    let json = match stdout.find('{') {
        Some(start) => &stdout[start..],
        None => stdout,
    };

    let response: EmbeddingResponse = serde_json::from_str(json.trim_end())?;

    let datum = response
        .data
        .into_iter()
        .next()
        .ok_or(ParseError::EmptyEmbedding)?;

    if datum.embedding.iter().all(|v| *v == 0.0) {
        return Err(ParseError::ZeroEmbedding {
            dim: datum.embedding.len(),
        });
    }

    Ok(datum.embedding)
}
