//! Thread-safe cache.
//!
//! [`ConcurrentLruCache`] puts the whole cache state (recency list, key index
//! and counters) behind one `parking_lot::Mutex`. Every public operation
//! takes the lock, consults the index, updates the list and releases the
//! lock before returning, so no thread ever sees an index update without the
//! matching list update.
//!
//! ## Why Mutex Instead of RwLock?
//!
//! `get()` moves the entry it finds to the front of the recency list. It is
//! a write, so a shared read lock would not be sound for it, and every
//! operation would end up taking the exclusive lock anyway.
//!
//! ## Why one lock?
//!
//! The list and the index are never locked separately. Each operation must
//! observe and change both as a unit, and a single lock leaves no lock
//! ordering to get wrong. Lock hold times are short: no operation does I/O or
//! calls out while holding it, apart from the closure passed to
//! [`ConcurrentLruCache::get_with`].
//!
//! # Example
//!
//! ```
//! use sync_lru_cache::ConcurrentLruCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentLruCache::new(1000).unwrap());
//!
//! let handles: Vec<_> = (0..4).map(|t| {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || {
//!         for i in 0..100 {
//!             let key = format!("key_{}_{}", t, i);
//!             cache.set(key.clone(), i);
//!             let _ = cache.get(&key);
//!         }
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 400);
//! ```

mod lru;

pub use self::lru::ConcurrentLruCache;
