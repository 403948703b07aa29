//! Concurrent LRU Cache Implementation
//!
//! The multi-threaded counterpart to [`LruCache`](crate::LruCache): the same
//! segment, wrapped in a single mutex.
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │            ConcurrentLruCache              │
//! │                                            │
//! │   ┌────────────────────────────────────┐   │
//! │   │          Mutex<LruSegment>         │   │
//! │   │                                    │   │
//! │   │   ┌─────────┐      ┌────────────┐  │   │
//! │   │   │  index  │ ───▶ │ recency    │  │   │
//! │   │   │ K→Handle│      │ list (slab)│  │   │
//! │   │   └─────────┘      └────────────┘  │   │
//! │   └────────────────────────────────────┘   │
//! └────────────────────────────────────────────┘
//! ```
//!
//! LRU ordering is global: there is one list for the whole cache, so the
//! entry evicted is always the least recently used one of all held entries.

use crate::config::LruCacheConfig;
use crate::error::{ConfigError, InvariantError};
use crate::lru::LruSegment;
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use parking_lot::Mutex;
use std::collections::BTreeMap;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A thread-safe LRU cache guarded by a single exclusive lock.
///
/// `ConcurrentLruCache` is `Send + Sync` whenever its keys, values and
/// hasher are `Send`, and is shared between threads through `Arc`.
///
/// # Type Parameters
///
/// - `K`: Key type. Must implement `Hash + Eq + Clone`.
/// - `V`: Value type. `get` returns clones, so it must implement `Clone`;
///   use [`get_with`](Self::get_with) to avoid the clone.
/// - `S`: Hash builder type. Defaults to `DefaultHashBuilder`.
///
/// # Example
///
/// ```
/// use sync_lru_cache::ConcurrentLruCache;
///
/// let cache = ConcurrentLruCache::new(3).unwrap();
/// cache.set("a", 1);
/// cache.set("b", 2);
/// cache.set("c", 3);
/// assert_eq!(cache.get(&"a"), Some(1));
///
/// // "b" is now the least recently used entry.
/// assert!(!cache.set("d", 4));
/// assert_eq!(cache.get(&"b"), None);
/// ```
pub struct ConcurrentLruCache<K, V, S = DefaultHashBuilder> {
    segment: Mutex<LruSegment<K, V, S>>,
    capacity: NonZeroUsize,
}

impl<K: Hash + Eq, V> ConcurrentLruCache<K, V> {
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self::init(LruCacheConfig::new(capacity)?, None))
    }

    /// Creates a cache from a configuration with an optional hasher.
    ///
    /// # Example
    ///
    /// ```
    /// use sync_lru_cache::config::LruCacheConfig;
    /// use sync_lru_cache::ConcurrentLruCache;
    /// use core::num::NonZeroUsize;
    ///
    /// let config = LruCacheConfig {
    ///     capacity: NonZeroUsize::new(10_000).unwrap(),
    /// };
    /// let cache: ConcurrentLruCache<String, i32> = ConcurrentLruCache::init(config, None);
    /// assert_eq!(cache.capacity(), 10_000);
    /// ```
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ConcurrentLruCache<K, V, S> {
    /// Creates a cache with a custom hash builder.
    ///
    /// Use this for deterministic hashing or DoS-resistant hashers.
    pub fn with_hasher(config: LruCacheConfig, hash_builder: S) -> Self {
        Self {
            segment: Mutex::new(LruSegment::with_hasher(config, hash_builder)),
            capacity: config.capacity,
        }
    }

    /// Returns the maximum number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns the maximum number of entries as a `NonZeroUsize`.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Returns the number of entries currently held.
    ///
    /// The value may be stale by the time it is used if other threads are
    /// writing.
    pub fn len(&self) -> usize {
        self.segment.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.segment.lock().is_empty()
    }

    /// Retrieves a value and applies a function to it while holding the lock.
    ///
    /// Moves the entry to the most recently used position, exactly like
    /// [`get`](Self::get), but avoids cloning the value. `f` runs while the
    /// lock is held; calling back into this cache from `f` deadlocks.
    ///
    /// # Example
    ///
    /// ```
    /// use sync_lru_cache::ConcurrentLruCache;
    ///
    /// let cache = ConcurrentLruCache::new(4).unwrap();
    /// cache.set("greeting", String::from("hello world"));
    /// assert_eq!(cache.get_with("greeting", |v| v.len()), Some(11));
    /// ```
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        let mut segment = self.segment.lock();
        segment.get(key).map(f)
    }

    /// Returns `true` if `key` is held. Does not change recency.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lock().contains_key(key)
    }

    /// Drops every entry. Nothing is reported as evicted.
    pub fn clear(&self) {
        self.segment.lock().clear();
    }

    /// Verifies that the key index and the recency list agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.segment.lock().check_invariants()
    }

    /// Returns a snapshot of the counters.
    pub fn stats(&self) -> LruCacheMetrics {
        self.segment.lock().metrics()
    }
}

impl<K: Hash + Eq, V: Clone, S: BuildHasher> ConcurrentLruCache<K, V, S> {
    /// Retrieves a clone of the value for `key`.
    ///
    /// If the key exists it is moved to the most recently used position.
    /// This mutates the recency list, so it takes the same exclusive lock as
    /// [`set`](Self::set).
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let mut segment = self.segment.lock();
        segment.get(key).cloned()
    }

    /// Retrieves a clone of the value for `key` without changing its
    /// recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lock().peek(key).cloned()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> ConcurrentLruCache<K, V, S> {
    /// Inserts `value` under `key` and marks it most recently used.
    ///
    /// Returns `true` if the key was already present (the value is
    /// overwritten and nothing is evicted), `false` if it was new. A new key
    /// in a full cache evicts the least recently used entry first.
    pub fn set(&self, key: K, value: V) -> bool {
        let mut segment = self.segment.lock();
        segment.set(key, value)
    }

    /// Returns the held keys from most to least recently used.
    pub fn keys(&self) -> Vec<K> {
        self.segment.lock().keys()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for ConcurrentLruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.stats().to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentLRU"
    }
}

impl<K, V, S> core::fmt::Debug for ConcurrentLruCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut out = f.debug_struct("ConcurrentLruCache");
        out.field("capacity", &self.capacity);
        // Never block: the caller may already hold the lock.
        match self.segment.try_lock() {
            Some(segment) => out.field("segment", &*segment),
            None => out.field("segment", &format_args!("<locked>")),
        };
        out.finish()
    }
}
