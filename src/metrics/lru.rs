//! LRU Cache Metrics

use super::{CacheMetrics, CoreCacheMetrics};
use std::collections::BTreeMap;

/// Metrics kept by an LRU cache.
///
/// LRU has no counters beyond the core set; `len` is carried so reports show
/// how full the cache was when the snapshot was taken.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LruCacheMetrics {
    /// Core metrics common to all cache operations
    pub core: CoreCacheMetrics,
    /// Configured capacity of the cache.
    pub capacity: usize,
    /// Number of entries held when the snapshot was taken.
    pub len: usize,
}

impl LruCacheMetrics {
    /// Creates metrics for a cache of the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            core: CoreCacheMetrics::new(),
            capacity,
            len: 0,
        }
    }

    /// Fraction of the capacity in use, between 0.0 and 1.0.
    pub fn utilization(&self) -> f64 {
        if self.capacity > 0 {
            self.len as f64 / self.capacity as f64
        } else {
            0.0
        }
    }

    /// Converts LRU metrics to a `BTreeMap` for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("capacity".to_string(), self.capacity as f64);
        metrics.insert("len".to_string(), self.len as f64);
        metrics.insert("utilization".to_string(), self.utilization());
        metrics
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}
