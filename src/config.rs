//! Cache Configuration
//!
//! [`LruCacheConfig`] carries the parameters fixed at construction time. The
//! only parameter is the entry capacity, held as a [`NonZeroUsize`] so that a
//! config value that exists is always valid.
//!
//! # Zero capacity
//!
//! A cache with capacity zero could never admit an entry: the insert path
//! would try to evict from an empty list. Rather than guess a fallback
//! (such as treating zero as unbounded), zero is rejected when the config is
//! built from a plain integer:
//!
//! ```
//! use sync_lru_cache::config::LruCacheConfig;
//!
//! assert!(LruCacheConfig::new(0).is_err());
//!
//! let config = LruCacheConfig::new(128).unwrap();
//! assert_eq!(config.capacity.get(), 128);
//! ```
//!
//! Callers that already hold a `NonZeroUsize` can build the struct directly:
//!
//! ```
//! use sync_lru_cache::config::LruCacheConfig;
//! use sync_lru_cache::LruCache;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(10_000).unwrap(),
//! };
//! let cache: LruCache<String, Vec<u8>> = LruCache::init(config, None);
//! assert_eq!(cache.cap().get(), 10_000);
//! ```

use crate::error::ConfigError;
use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold. Inserting a
///   new key into a full cache evicts the least recently used entry first.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
}

impl LruCacheConfig {
    /// Builds a config from an integer capacity.
    ///
    /// Returns [`ConfigError`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| ConfigError::new("cache capacity must be greater than zero"))?;
        Ok(Self { capacity })
    }
}

impl TryFrom<usize> for LruCacheConfig {
    type Error = ConfigError;

    fn try_from(capacity: usize) -> Result<Self, Self::Error> {
        Self::new(capacity)
    }
}

impl From<NonZeroUsize> for LruCacheConfig {
    fn from(capacity: NonZeroUsize) -> Self {
        Self { capacity }
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
