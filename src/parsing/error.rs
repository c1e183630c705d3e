use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("could not parse rank score from output")]
    MissingRankScore,

    #[error("failed to parse embedding response: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("no embedding data returned")]
    EmptyEmbedding,

    #[error("embedding vector is all zeros (dim {dim})")]
    ZeroEmbedding { dim: usize },
}
