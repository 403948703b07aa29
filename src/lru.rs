//! Least Recently Used (LRU) Cache Implementation
//!
//! A bounded key/value store that holds at most `capacity` entries. When a
//! new key is inserted into a full cache, the least recently used entry is
//! evicted first.
//!
//! # Algorithm
//!
//! Entries live in a [`List`](crate::list::List) kept in recency order, front
//! being the most recently used. A hash map indexes each key to the
//! [`Handle`] of its node. Every operation keeps the two in step:
//!
//! - `set` of a new key pushes a node at the front and records its handle,
//!   evicting the back node first if the cache is full.
//! - `set` of an existing key overwrites the value in place and moves the
//!   node to the front. No eviction happens.
//! - `get` of an existing key moves the node to the front. It is a read that
//!   writes, which matters for locking (see [`ConcurrentLruCache`]).
//! - `clear` empties both.
//!
//! There is always exactly one eviction candidate: the current back node.
//!
//! # Performance Characteristics
//!
//! - `set`, `get`, `peek`, `contains_key`: O(1) average
//! - `clear`, `keys`: O(n)
//!
//! # Thread Safety
//!
//! [`LruCache`] takes `&mut self` for every operation that reorders. For
//! shared access from several threads use
//! [`ConcurrentLruCache`](crate::ConcurrentLruCache), which puts the same
//! state behind a single lock.
//!
//! [`ConcurrentLruCache`]: crate::ConcurrentLruCache

use crate::config::LruCacheConfig;
use crate::error::{ConfigError, InvariantError};
use crate::list::{Handle, List};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use std::collections::BTreeMap;
use tracing::{debug, trace};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Cache state: the recency list, the key index and the counters.
///
/// This is shared between `LruCache` (single-threaded) and
/// `ConcurrentLruCache`, which wraps one segment in a single mutex. The list
/// and the index are only ever mutated together through `&mut self`, so a
/// lock around the whole segment is enough to keep them consistent.
pub(crate) struct LruSegment<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: List<(K, V)>,
    map: HashMap<K, Handle, S>,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq, V, S: BuildHasher> LruSegment<K, V, S> {
    pub(crate) fn with_hasher(config: LruCacheConfig, hash_builder: S) -> Self {
        let cap = config.capacity.get();
        debug!(capacity = cap, "creating LRU cache");
        LruSegment {
            config,
            list: List::with_capacity(cap),
            map: HashMap::with_capacity_and_hasher(cap, hash_builder),
            metrics: LruCacheMetrics::new(cap),
        }
    }

    #[inline]
    pub(crate) fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub(crate) fn metrics(&self) -> LruCacheMetrics {
        LruCacheMetrics {
            len: self.map.len(),
            ..self.metrics.clone()
        }
    }

    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(handle) => {
                self.list.move_to_front(handle);
                self.metrics.core.record_hit();
                self.list.get(handle).map(|(_, v)| v)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    pub(crate) fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = self.map.get(key)?;
        self.list.get(*handle).map(|(_, v)| v)
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Inserts or updates `key`. Returns true if the key was already held.
    pub(crate) fn set(&mut self, key: K, value: V) -> bool
    where
        K: Clone,
    {
        if let Some(&handle) = self.map.get(&key) {
            if let Some((_, old)) = self.list.get_mut(handle) {
                *old = value;
            }
            self.list.move_to_front(handle);
            self.metrics.core.record_update();
            return true;
        }

        if self.map.len() >= self.cap().get() {
            self.evict();
        }

        let handle = self.list.push_front((key.clone(), value));
        self.map.insert(key, handle);
        self.metrics.core.record_insertion();
        false
    }

    /// Drops the back node and its index entry.
    fn evict(&mut self) {
        let Some(back) = self.list.back() else {
            return;
        };
        if let Some((key, _)) = self.list.remove(back) {
            self.map.remove(&key);
            self.metrics.core.record_eviction();
            trace!(?back, len = self.map.len(), "evicted least recently used entry");
        }
    }

    pub(crate) fn clear(&mut self) {
        let dropped = self.map.len();
        self.map.clear();
        self.list.clear();
        self.metrics.core.record_clear();
        debug!(dropped, "cleared LRU cache");
    }

    pub(crate) fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.list.iter().map(|(k, _)| k.clone()).collect()
    }

    pub(crate) fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;

        if self.map.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but list holds {} nodes",
                self.map.len(),
                self.list.len()
            )));
        }
        if self.map.len() > self.cap().get() {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.map.len(),
                self.cap()
            )));
        }
        for (key, handle) in &self.map {
            match self.list.get(*handle) {
                Some((node_key, _)) if node_key == key => {}
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "index entry {:?} names a node holding another key",
                        handle
                    )))
                }
                None => {
                    return Err(InvariantError::new(format!(
                        "index entry {:?} names a removed node",
                        handle
                    )))
                }
            }
        }
        Ok(())
    }
}

impl<K, V, S> core::fmt::Debug for LruSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LruSegment")
            .field("capacity", &self.config.capacity)
            .field("len", &self.map.len())
            .finish()
    }
}

/// A single-threaded Least Recently Used (LRU) cache.
///
/// # Examples
///
/// ```
/// use sync_lru_cache::LruCache;
///
/// let mut cache = LruCache::new(2).unwrap();
///
/// assert!(!cache.set("apple", 1));
/// assert!(!cache.set("banana", 2));
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// cache.set("cherry", 3);
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
#[derive(Debug)]
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    segment: LruSegment<K, V, S>,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self::init(LruCacheConfig::new(capacity)?, None))
    }

    /// Creates a cache from a configuration with an optional hasher.
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a cache from a configuration and a custom hash builder.
    pub fn with_hasher(config: LruCacheConfig, hash_builder: S) -> Self {
        Self {
            segment: LruSegment::with_hasher(config, hash_builder),
        }
    }

    /// Returns the maximum number of entries.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.segment.cap()
    }

    /// Returns the number of entries currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.segment.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    /// Returns the value for `key` and marks it most recently used.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get(key)
    }

    /// Like [`get`](Self::get), but hands the value to `f` and returns its
    /// result.
    pub fn get_with<Q, F, R>(&mut self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.segment.get(key).map(f)
    }

    /// Returns the value for `key` without changing its recency.
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.peek(key)
    }

    /// Returns `true` if `key` is held. Does not change recency.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.contains_key(key)
    }

    /// Drops every entry. Nothing is reported as evicted.
    #[inline]
    pub fn clear(&mut self) {
        self.segment.clear()
    }

    /// Verifies that the key index and the recency list agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.segment.check_invariants()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, S> {
    /// Inserts `value` under `key` and marks it most recently used.
    ///
    /// Returns `true` if the key was already present, in which case its value
    /// is overwritten and nothing is evicted. Returns `false` for a new key;
    /// if the cache was full the least recently used entry is evicted first.
    #[inline]
    pub fn set(&mut self, key: K, value: V) -> bool {
        self.segment.set(key, value)
    }

    /// Returns the held keys from most to least recently used.
    pub fn keys(&self) -> Vec<K> {
        self.segment.keys()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_lru<K: Hash + Eq, V>(cap: usize) -> LruCache<K, V> {
        LruCache::new(cap).unwrap()
    }

    #[test]
    fn test_lru_zero_capacity_rejected() {
        let err = LruCache::<&str, i32>::new(0).unwrap_err();
        assert!(err.to_string().contains("capacity"));
    }

    #[test]
    fn test_lru_get_set() {
        let mut cache = make_lru(2);
        assert!(!cache.set("apple", 1));
        assert!(!cache.set("banana", 2));
        assert_eq!(cache.get(&"apple"), Some(&1));
        assert_eq!(cache.get(&"banana"), Some(&2));
        assert_eq!(cache.get(&"cherry"), None);
        assert!(cache.set("apple", 3));
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert!(!cache.set("cherry", 4));
        assert_eq!(cache.get(&"banana"), None);
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert_eq!(cache.get(&"cherry"), Some(&4));
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn test_lru_refresh_on_get() {
        let mut cache = make_lru(3);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("c", 3);
        assert_eq!(cache.get(&"a"), Some(&1));
        assert!(!cache.set("d", 4));

        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.keys(), ["d", "a", "c"]);
    }

    #[test]
    fn test_lru_refresh_on_update() {
        let mut cache = make_lru(2);
        cache.set("a", 1);
        cache.set("b", 2);
        assert!(cache.set("a", 10));
        assert_eq!(cache.len(), 2);

        cache.set("c", 3);
        assert!(!cache.contains_key(&"b"));
        assert_eq!(cache.peek(&"a"), Some(&10));
    }

    #[test]
    fn test_lru_get_with_refreshes() {
        let mut cache = make_lru(2);
        cache.set("a", String::from("alpha"));
        cache.set("b", String::from("beta"));
        assert_eq!(cache.get_with(&"a", |v| v.len()), Some(5));
        assert_eq!(cache.get_with(&"zzz", |v| v.len()), None);

        cache.set("c", String::from("gamma"));
        assert!(cache.contains_key(&"a"));
        assert!(!cache.contains_key(&"b"));
    }

    #[test]
    fn test_lru_single_entry() {
        let mut cache = make_lru(1);
        assert!(!cache.set("x", 1));
        assert!(cache.set("x", 2));
        assert_eq!(cache.get(&"x"), Some(&2));
        assert!(!cache.set("y", 3));
        assert_eq!(cache.get(&"x"), None);
        assert_eq!(cache.get(&"y"), Some(&3));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_lru_peek_does_not_reorder() {
        let mut cache = make_lru(2);
        cache.set("a", 1);
        cache.set("b", 2);
        assert_eq!(cache.peek(&"a"), Some(&1));
        assert!(cache.contains_key(&"a"));

        // "a" is still least recently used.
        cache.set("c", 3);
        assert_eq!(cache.peek(&"a"), None);
        assert_eq!(cache.keys(), ["c", "b"]);
    }

    #[test]
    fn test_lru_clear() {
        let mut cache = make_lru(2);
        cache.set("apple", 1);
        cache.set("banana", 2);
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.get(&"apple"), None);

        cache.set("cherry", 3);
        cache.set("date", 4);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.metrics()["evictions"], 0.0);
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn test_lru_string_keys() {
        let mut cache = make_lru(2);
        let key1 = String::from("apple");
        let key2 = String::from("banana");
        cache.set(key1.clone(), 1);
        cache.set(key2.clone(), 2);
        assert_eq!(cache.get(&key1), Some(&1));
        assert_eq!(cache.get(&key2), Some(&2));
        assert_eq!(cache.get("apple"), Some(&1));
        assert_eq!(cache.get("banana"), Some(&2));
    }

    #[derive(Debug, Clone, Eq, PartialEq)]
    struct ComplexValue {
        val: i32,
        description: String,
    }

    #[test]
    fn test_lru_complex_values() {
        let mut cache = make_lru(2);
        let fruit = |val: i32, description: &str| ComplexValue {
            val,
            description: String::from(description),
        };
        cache.set(String::from("apple"), fruit(1, "First fruit"));
        cache.set(String::from("banana"), fruit(2, "Second fruit"));
        cache.set(String::from("cherry"), fruit(3, "Third fruit"));

        assert_eq!(cache.get("apple"), None);
        assert_eq!(cache.get("cherry"), Some(&fruit(3, "Third fruit")));
    }

    #[test]
    fn test_lru_metrics() {
        let mut cache = make_lru(2);
        let metrics = cache.metrics();
        assert_eq!(metrics["requests"], 0.0);
        assert_eq!(metrics["cache_hits"], 0.0);
        assert_eq!(metrics["cache_misses"], 0.0);

        cache.set("apple", 1);
        cache.set("banana", 2);
        cache.get(&"apple");
        cache.get(&"banana");
        cache.get(&"cherry");
        cache.set("apple", 5);
        cache.set("cherry", 3);

        let metrics = cache.metrics();
        assert_eq!(metrics["cache_hits"], 2.0);
        assert_eq!(metrics["cache_misses"], 1.0);
        assert_eq!(metrics["requests"], 3.0);
        assert_eq!(metrics["insertions"], 3.0);
        assert_eq!(metrics["updates"], 1.0);
        assert_eq!(metrics["evictions"], 1.0);
        assert_eq!(metrics["len"], 2.0);
        assert_eq!(cache.algorithm_name(), "LRU");
    }

    #[test]
    fn test_lru_segment_directly() {
        let mut segment: LruSegment<&str, i32> = LruSegment::with_hasher(
            LruCacheConfig::new(2).unwrap(),
            DefaultHashBuilder::default(),
        );
        assert_eq!(segment.len(), 0);
        assert!(segment.is_empty());
        assert_eq!(segment.cap().get(), 2);
        segment.set("a", 1);
        segment.set("b", 2);
        assert_eq!(segment.len(), 2);
        assert_eq!(segment.get(&"a"), Some(&1));
        assert_eq!(segment.keys(), ["a", "b"]);
        assert!(segment.check_invariants().is_ok());
    }

    #[test]
    fn test_lru_many_inserts_keep_last_entries() {
        let mut cache = make_lru(4);
        for i in 0..1000 {
            cache.set(i, i);
        }
        assert_eq!(cache.len(), 4);
        assert_eq!(cache.keys(), [999, 998, 997, 996]);
        assert!(cache.segment.list.check_invariants().is_ok());
        assert_eq!(cache.segment.list.len(), 4);
    }
}
