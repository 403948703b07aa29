//! Cache Metrics
//!
//! Counters kept alongside the cache state and reported through the
//! [`CacheMetrics`] trait as a `BTreeMap`, so metric names always come out in
//! the same order.
//!
//! The counters live inside the lock-protected cache state and are updated
//! by the same critical section as the operation they count.

use std::collections::BTreeMap;

pub mod lru;

pub use lru::LruCacheMetrics;

/// Counters common to every cache operation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups (`get`, `get_with`) made against the cache.
    pub requests: u64,

    /// Lookups that found their key.
    pub cache_hits: u64,

    /// New keys admitted by `set`.
    pub insertions: u64,

    /// `set` calls that overwrote the value of an existing key.
    pub updates: u64,

    /// Entries dropped to make room for a new key.
    pub evictions: u64,

    /// Number of times the cache was cleared.
    pub clears: u64,
}

impl CoreCacheMetrics {
    /// Creates a zeroed set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found its key.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that did not find its key.
    ///
    /// Misses are derived as `requests - cache_hits`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a new key being admitted.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records an existing key's value being overwritten.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records the least recently used entry being evicted.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Records a full reset of the cache.
    pub fn record_clear(&mut self) {
        self.clears += 1;
    }

    /// Number of lookups that missed.
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Fraction of lookups that hit, between 0.0 and 1.0.
    ///
    /// Returns 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that missed, between 0.0 and 1.0.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Converts the counters to a `BTreeMap` for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("clears".to_string(), self.clears as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("updates".to_string(), self.updates as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.insertions > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.insertions as f64,
            );
        }

        metrics
    }
}

/// Uniform metrics reporting for cache implementations.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification, e.g. `"LRU"`.
    fn algorithm_name(&self) -> &'static str;
}
