//! Embedding-similarity fallback scoring.
//!
//! Cosine similarity lives in `[-1, 1]`; [`similarity_to_score`] stretches it by
//! [`FALLBACK_SCORE_SCALE`] so fallback scores sit in roughly the same range as
//! un-normalized rank scores. This is a heuristic mapping, not a calibration.

use crate::constants::FALLBACK_SCORE_SCALE;

/// Cosine similarity of two vectors.
///
/// Returns `0.0` when the lengths differ, either vector is empty, or either has
/// zero magnitude.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot_product = 0.0f64;
    let mut norm_a_sq = 0.0f64;
    let mut norm_b_sq = 0.0f64;

    for (&av, &bv) in a.iter().zip(b.iter()) {
        let av = f64::from(av);
        let bv = f64::from(bv);
        dot_product += av * bv;
        norm_a_sq += av * av;
        norm_b_sq += bv * bv;
    }

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot_product / (norm_a * norm_b)) as f32
    }
}

/// Maps a cosine similarity onto the rank-score scale.
#[inline]
pub fn similarity_to_score(similarity: f32) -> f32 {
    similarity * FALLBACK_SCORE_SCALE
}

/// Fallback relevance score for a query/document embedding pair.
#[inline]
pub fn fallback_score(query: &[f32], document: &[f32]) -> f32 {
    similarity_to_score(cosine_similarity(query, document))
}
