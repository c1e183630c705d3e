//! Cross-cutting, shared constants.
//!
//! Scores produced by the rank path are un-normalized logits, so every constant
//! that interacts with them (sentinel, fallback scale) lives on that same scale.

use std::time::Duration;

/// Maximum number of documents returned by `rerank` when `max_docs` is unset.
pub const DEFAULT_MAX_DOCS: usize = 100;

/// Inclusive lower bound applied when no threshold is configured.
pub const DEFAULT_THRESHOLD: f32 = 0.0;

/// Score assigned to a document when both the rank path and the embedding
/// fallback fail. Never cached.
pub const SENTINEL_SCORE: f32 = -5.0;

/// Multiplier mapping cosine similarity (`[-1, 1]`) onto the rank-score scale.
pub const FALLBACK_SCORE_SCALE: f32 = 10.0;

/// Name of the llama.cpp embedding binary.
pub const DEFAULT_BINARY_NAME: &str = "llama-embedding";

/// End-of-sequence marker placed between query and document in rank mode.
pub const RANK_SEP_END: &str = "</s>";

/// Start-of-sequence marker placed before the document in rank mode.
pub const RANK_SEP_START: &str = "<s>";

/// Phrase marking a rank score line on the diagnostic stream
/// (e.g. `rerank score 0: -6.851`).
pub const RANK_SCORE_MARKER: &str = "rerank score";

/// Deadline for the startup `--version` probe.
pub const SELF_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Bytes of stderr kept in inference error messages.
pub const STDERR_TAIL_BYTES: usize = 512;
