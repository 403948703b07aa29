//! Correctness Tests for the LRU Cache
//!
//! These tests validate eviction order with small caches and simple,
//! deterministic access patterns. Each test checks explicitly which key was
//! evicted after a `set` that overflowed the cache.
//!
//! Every scenario runs against both the single-threaded [`LruCache`] and the
//! lock-protected [`ConcurrentLruCache`], which share the same segment.

use sync_lru_cache::config::LruCacheConfig;
use sync_lru_cache::metrics::CacheMetrics;
use sync_lru_cache::{ConcurrentLruCache, LruCache};

// ============================================================================
// HELPER FUNCTIONS FOR CACHE CREATION
// ============================================================================

fn make_lru<K: std::hash::Hash + Eq + Clone, V>(cap: usize) -> LruCache<K, V> {
    LruCache::init(LruCacheConfig::new(cap).unwrap(), None)
}

fn make_concurrent<K: std::hash::Hash + Eq + Clone, V: Clone>(
    cap: usize,
) -> ConcurrentLruCache<K, V> {
    ConcurrentLruCache::init(LruCacheConfig::new(cap).unwrap(), None)
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_zero_capacity_is_a_config_error() {
    let err = LruCache::<u32, u32>::new(0).unwrap_err();
    assert_eq!(err.message(), "cache capacity must be greater than zero");

    let err = ConcurrentLruCache::<u32, u32>::new(0).unwrap_err();
    assert!(err.to_string().contains("capacity"));

    assert!(LruCacheConfig::try_from(0usize).is_err());
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_lru_refreshed_key_survives_eviction() {
    let mut cache = make_lru(3);
    assert!(!cache.set("a", 1));
    assert!(!cache.set("b", 2));
    assert!(!cache.set("c", 3));
    assert_eq!(cache.get(&"a"), Some(&1));

    // "b" is least recently used because "a" was refreshed.
    assert!(!cache.set("d", 4));

    assert_eq!(cache.get(&"b"), None);
    let mut held = cache.keys();
    held.sort();
    assert_eq!(held, ["a", "c", "d"]);
}

#[test]
fn test_concurrent_refreshed_key_survives_eviction() {
    let cache = make_concurrent(3);
    assert!(!cache.set("a", 1));
    assert!(!cache.set("b", 2));
    assert!(!cache.set("c", 3));
    assert_eq!(cache.get(&"a"), Some(1));
    assert!(!cache.set("d", 4));

    assert_eq!(cache.get(&"b"), None);
    assert!(cache.contains_key(&"a"));
    assert!(cache.contains_key(&"c"));
    assert!(cache.contains_key(&"d"));
    assert_eq!(cache.len(), 3);
}

#[test]
fn test_lru_capacity_one() {
    let mut cache = make_lru(1);
    assert!(!cache.set("x", 1));
    assert!(cache.set("x", 2));
    assert_eq!(cache.get(&"x"), Some(&2));
    assert!(!cache.set("y", 3));
    assert_eq!(cache.get(&"x"), None);
    assert_eq!(cache.get(&"y"), Some(&3));
}

#[test]
fn test_concurrent_capacity_one() {
    let cache = make_concurrent(1);
    assert!(!cache.set("x", 1));
    assert!(cache.set("x", 2));
    assert_eq!(cache.get(&"x"), Some(2));
    assert!(!cache.set("y", 3));
    assert_eq!(cache.get(&"x"), None);

    // The update did not count as an eviction, the overflow did.
    assert_eq!(cache.stats().core.evictions, 1);
    assert_eq!(cache.stats().core.updates, 1);
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[test]
fn test_set_then_get_round_trip() {
    let mut cache = make_lru(8);
    for i in 0..8 {
        cache.set(i, i * 10);
        assert_eq!(cache.get(&i), Some(&(i * 10)));
    }
}

#[test]
fn test_overflow_evicts_first_inserted() {
    for cap in 1..=10usize {
        let mut cache = make_lru(cap);
        for i in 0..=cap {
            assert!(!cache.set(i, i));
        }
        assert_eq!(cache.len(), cap);
        assert!(!cache.contains_key(&0), "cap {}: key 0 should be evicted", cap);
        let expected: Vec<usize> = (1..=cap).rev().collect();
        assert_eq!(cache.keys(), expected);
    }
}

#[test]
fn test_set_reports_presence() {
    let cache = make_concurrent(2);
    assert!(!cache.set(1, "one"));
    assert!(cache.set(1, "uno"));
    assert!(!cache.set(2, "two"));
    assert!(!cache.set(3, "three"));
    // 1 was evicted, so setting it again is an insert.
    assert!(!cache.set(1, "one again"));
}

#[test]
fn test_update_refreshes_without_evicting() {
    let mut cache = make_lru(3);
    cache.set(1, 1);
    cache.set(2, 2);
    cache.set(3, 3);

    // Re-set of the least recently used key moves it to the front.
    assert!(cache.set(1, 100));
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.keys(), [1, 3, 2]);

    cache.set(4, 4);
    assert!(!cache.contains_key(&2));
    assert_eq!(cache.peek(&1), Some(&100));
}

#[test]
fn test_recency_order_follows_every_touch() {
    let mut cache = make_lru(4);
    for k in ["a", "b", "c", "d"] {
        cache.set(k, 0);
    }
    cache.get(&"b");
    cache.set("d", 1);
    cache.get(&"a");
    assert_eq!(cache.keys(), ["a", "d", "b", "c"]);

    // Misses and peeks leave the order alone.
    cache.get(&"zzz");
    cache.peek(&"c");
    assert_eq!(cache.keys(), ["a", "d", "b", "c"]);
    assert!(cache.check_invariants().is_ok());
}

#[test]
fn test_clear_is_complete() {
    let cache = make_concurrent(3);
    cache.set("a", 1);
    cache.set("b", 2);
    cache.set("c", 3);
    cache.clear();

    for key in ["a", "b", "c"] {
        assert_eq!(cache.get(&key), None);
    }
    assert!(cache.is_empty());

    // Refilling up to capacity evicts nothing.
    cache.set("d", 4);
    cache.set("e", 5);
    cache.set("f", 6);
    assert_eq!(cache.len(), 3);
    let metrics = cache.metrics();
    assert_eq!(metrics["evictions"], 0.0);
    assert_eq!(metrics["clears"], 1.0);
    assert!(cache.check_invariants().is_ok());
}

#[test]
fn test_eviction_sequence_with_mixed_access() {
    let mut cache = make_lru(3);
    cache.set(1, 10);
    cache.set(2, 20);
    cache.set(3, 30);

    // Order (MRU first): 3 2 1
    cache.get(&1); // 1 3 2
    cache.set(4, 40); // evicts 2 -> 4 1 3
    assert!(!cache.contains_key(&2));

    cache.get(&3); // 3 4 1
    cache.set(5, 50); // evicts 1 -> 5 3 4
    assert!(!cache.contains_key(&1));

    cache.set(4, 41); // 4 5 3
    cache.set(6, 60); // evicts 3 -> 6 4 5
    assert!(!cache.contains_key(&3));

    assert_eq!(cache.keys(), [6, 4, 5]);
    assert_eq!(cache.peek(&4), Some(&41));
}
