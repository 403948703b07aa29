//! # sync-lru-cache
//!
//! A bounded, thread-safe Least Recently Used (LRU) cache.
//!
//! The cache holds at most `capacity` entries. Inserting a new key into a
//! full cache evicts the entry that was touched least recently, where both
//! `set` and `get` count as a touch.
//!
//! ```text
//!   most recent                                   least recent
//!   ┌──────┐    ┌──────┐    ┌──────┐    ┌──────┐
//!   │  d   │◀──▶│  a   │◀──▶│  c   │◀──▶│  b   │ ──▶ evicted next
//!   └──────┘    └──────┘    └──────┘    └──────┘
//!      ▲           ▲           ▲           ▲
//!      └───────────┴─── index: key → handle ┘
//! ```
//!
//! Two views over the same state are provided:
//!
//! | Type | Access | Use |
//! |------|--------|-----|
//! | [`LruCache`] | `&mut self` | single owner, no locking |
//! | [`ConcurrentLruCache`] | `&self`, `Send + Sync` | shared through `Arc`, one mutex |
//!
//! # Quick Start
//!
//! ```
//! use sync_lru_cache::ConcurrentLruCache;
//!
//! let cache = ConcurrentLruCache::new(3).unwrap();
//!
//! assert!(!cache.set("a", 1)); // new key
//! assert!(!cache.set("b", 2));
//! assert!(!cache.set("c", 3));
//! assert_eq!(cache.get(&"a"), Some(1)); // "a" becomes most recent
//!
//! assert!(!cache.set("d", 4)); // evicts "b"
//! assert_eq!(cache.get(&"b"), None);
//! assert!(cache.set("d", 5)); // existing key, value overwritten
//! ```
//!
//! # Capacity
//!
//! Capacity is fixed at construction and must be at least one. A zero
//! capacity is rejected with [`ConfigError`](error::ConfigError):
//!
//! ```
//! use sync_lru_cache::LruCache;
//!
//! assert!(LruCache::<String, u64>::new(0).is_err());
//! ```
//!
//! # Logging
//!
//! The crate emits [`tracing`] events: `debug` when a cache is created or
//! cleared and `trace` for every eviction. Install a subscriber to see them.
//!
//! # Modules
//!
//! - [`list`]: slab-backed doubly linked list keeping recency order
//! - [`lru`]: single-threaded LRU cache
//! - [`concurrent`]: the same cache behind one lock
//! - [`config`]: cache configuration
//! - [`error`]: configuration and invariant errors
//! - [`metrics`]: hit, miss and eviction counters

/// Slab-backed doubly linked list with handle-based node access.
///
/// Tracks recency order only; it has no notion of keys or capacity.
pub mod list;

/// Cache configuration structures.
pub mod config;

/// Error types.
pub mod error;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used item when
/// a new key is inserted at capacity.
pub mod lru;

/// Cache metrics system.
pub mod metrics;

/// Thread-safe cache built on the same segment as [`LruCache`].
pub mod concurrent;

pub use concurrent::ConcurrentLruCache;
pub use config::LruCacheConfig;
pub use error::{ConfigError, InvariantError};
pub use lru::LruCache;
