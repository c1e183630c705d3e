use blake3::Hasher;

/// Fingerprints a (query, document) pair.
///
/// The query is prefixed with its byte length, so no choice of text on either side
/// can make two distinct pairs encode to the same input. `("ab", "c")` and
/// `("a", "bc")` hash differently even though their concatenations match.
#[inline]
pub fn hash_pair(query: &str, document: &str) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.update(&(query.len() as u64).to_le_bytes());
    hasher.update(query.as_bytes());
    hasher.update(document.as_bytes());
    *hasher.finalize().as_bytes()
}
