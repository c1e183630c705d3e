use super::score::{ScoreCache, ScoreKey};
use std::sync::Arc;
use std::thread;

#[test]
fn test_new_cache_is_empty() {
    let cache = ScoreCache::new();

    assert!(cache.is_empty());
    assert_eq!(cache.len(), 0);
}

#[test]
fn test_insert_and_get() {
    let cache = ScoreCache::new();
    let key = ScoreKey::new("machine learning", "deep learning");

    cache.insert(key, 9.0);

    assert_eq!(cache.get(&key), Some(9.0));
    assert_eq!(cache.lookup("machine learning", "deep learning"), Some(9.0));
    assert!(cache.contains(&key));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_miss_returns_none() {
    let cache = ScoreCache::new();

    assert_eq!(cache.lookup("query", "document"), None);
}

#[test]
fn test_insert_overwrites() {
    let cache = ScoreCache::new();
    let key = ScoreKey::new("q", "d");

    cache.insert(key, 1.0);
    cache.insert(key, 2.0);

    assert_eq!(cache.get(&key), Some(2.0));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_key_order_matters() {
    let cache = ScoreCache::new();
    cache.insert(ScoreKey::new("a", "b"), 1.0);

    assert_eq!(cache.lookup("b", "a"), None);
}

#[test]
fn test_clear() {
    let cache = ScoreCache::new();
    cache.insert(ScoreKey::new("q", "d1"), 1.0);
    cache.insert(ScoreKey::new("q", "d2"), 2.0);
    assert_eq!(cache.len(), 2);

    cache.clear();

    assert!(cache.is_empty());
    assert_eq!(cache.lookup("q", "d1"), None);
}

#[test]
fn test_key_as_bytes_matches_hash() {
    let key = ScoreKey::new("q", "d");

    assert_eq!(key.as_bytes(), &crate::hashing::hash_pair("q", "d"));
}

#[test]
fn test_concurrent_readers_and_writers() {
    let cache = Arc::new(ScoreCache::new());

    let writers: Vec<_> = (0..4)
        .map(|w| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..100 {
                    let doc = format!("doc-{w}-{i}");
                    cache.insert(ScoreKey::new("query", &doc), i as f32);
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..100 {
                    let doc = format!("doc-0-{i}");
                    if let Some(score) = cache.lookup("query", &doc) {
                        assert_eq!(score, i as f32);
                    }
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    assert_eq!(cache.len(), 400);
}

#[test]
fn test_debug_reports_entry_count() {
    let cache = ScoreCache::new();
    cache.insert(ScoreKey::new("q", "d"), 1.0);

    let debug = format!("{cache:?}");
    assert!(debug.contains("ScoreCache"));
    assert!(debug.contains('1'));
}

#[test]
fn test_clear_advances_generation() {
    let cache = ScoreCache::new();
    let before = cache.generation();

    cache.clear();
    cache.clear();

    assert_eq!(cache.generation(), before + 2);
}

#[test]
fn test_insert_if_generation_current() {
    let cache = ScoreCache::new();
    let key = ScoreKey::new("q", "d");

    assert!(cache.insert_if_generation(key, 2.5, cache.generation()));
    assert_eq!(cache.get(&key), Some(2.5));
}

#[test]
fn test_insert_if_generation_stale_after_clear() {
    let cache = ScoreCache::new();
    let key = ScoreKey::new("q", "d");
    let generation = cache.generation();

    cache.clear();

    assert!(!cache.insert_if_generation(key, 2.5, generation));
    assert!(cache.is_empty());
}
