//! Error types for the cache.
//!
//! - [`ConfigError`]: returned when a cache is constructed with invalid
//!   parameters (a capacity of zero).
//! - [`InvariantError`]: returned by the `check_invariants` methods when the
//!   recency list and the lookup index disagree.
//!
//! The cache operations themselves (`set`, `get`, `clear`) never fail; a miss
//! is reported as `None`, not as an error.
//!
//! ```
//! use sync_lru_cache::error::ConfigError;
//! use sync_lru_cache::LruCache;
//!
//! let err: ConfigError = LruCache::<u32, u32>::new(0).unwrap_err();
//! assert!(err.to_string().contains("capacity"));
//! ```

use thiserror::Error;

/// Error returned when cache configuration parameters are invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Error returned when internal cache invariants are violated.
///
/// Carries a description of the first invariant found broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}
