//! Per-engine memoization of relevance scores.
//!
//! Keys are BLAKE3 fingerprints of the (query, document) pair (see
//! [`crate::hashing::hash_pair`]). Reads share the lock; writes are exclusive.
//! There is no eviction: construct a fresh engine or call [`ScoreCache::clear`]
//! to bound memory.
//!
//! Every `clear` advances a generation counter. A writer that captured the
//! generation before a slow computation stores its result with
//! [`ScoreCache::insert_if_generation`], which drops it if a clear happened in
//! between.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::hashing::hash_pair;

/// Fingerprint of a (query, document) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreKey([u8; 32]);

impl ScoreKey {
    /// Derives the key for `query` and `document`.
    #[inline]
    pub fn new(query: &str, document: &str) -> Self {
        Self(hash_pair(query, document))
    }

    /// Returns the raw 32-byte digest.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// In-memory score cache guarded by a reader/writer lock.
#[derive(Default)]
pub struct ScoreCache {
    entries: RwLock<HashMap<ScoreKey, f32>>,
    // Only advanced while holding the `entries` write lock.
    generation: AtomicU64,
}

impl ScoreCache {
    /// Creates an empty cache.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a cached score.
    #[inline]
    pub fn get(&self, key: &ScoreKey) -> Option<f32> {
        self.entries.read().get(key).copied()
    }

    /// Looks up a cached score for a (query, document) pair.
    #[inline]
    pub fn lookup(&self, query: &str, document: &str) -> Option<f32> {
        self.get(&ScoreKey::new(query, document))
    }

    /// Stores a score, replacing any previous value.
    #[inline]
    pub fn insert(&self, key: ScoreKey, score: f32) {
        self.entries.write().insert(key, score);
    }

    /// Stores a score only if the cache has not been cleared since `generation`
    /// was read. Returns `true` if the score was stored.
    pub fn insert_if_generation(&self, key: ScoreKey, score: f32, generation: u64) -> bool {
        let mut entries = self.entries.write();
        if self.generation.load(Ordering::Acquire) != generation {
            return false;
        }
        entries.insert(key, score);
        true
    }

    /// Current clear generation.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Returns `true` if the key is cached.
    #[inline]
    pub fn contains(&self, key: &ScoreKey) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Returns the number of cached scores.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if nothing is cached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drops every cached score.
    #[inline]
    pub fn clear(&self) {
        let mut entries = self.entries.write();
        entries.clear();
        self.generation.fetch_add(1, Ordering::Release);
    }
}

impl std::fmt::Debug for ScoreCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreCache")
            .field("entries", &self.len())
            .field("generation", &self.generation())
            .finish()
    }
}
