//! Concurrent Cache Usage Examples
//!
//! This example demonstrates multi-threaded usage patterns for the
//! sync-lru-cache concurrent cache.
//!
//! Run with: cargo run --example concurrent_usage
//!
//! Set `RUST_LOG=sync_lru_cache=trace` to see creation, clear and eviction
//! events from the cache.

use std::sync::Arc;
use std::thread;
use std::time::Instant;
use sync_lru_cache::metrics::CacheMetrics;
use sync_lru_cache::ConcurrentLruCache;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("Concurrent Cache Usage Examples");
    println!("================================\n");

    basic_concurrent_usage();
    println!();

    zero_copy_get_with();
    println!();

    eviction_order();
    println!();

    capacity_validation();
    println!();

    throughput_by_thread_count();
}

/// Basic multi-threaded cache usage
fn basic_concurrent_usage() {
    println!("1. Basic Concurrent Usage");
    println!("   -----------------------");

    let cache = Arc::new(ConcurrentLruCache::new(1000).expect("non-zero capacity"));

    let num_threads = 4;
    let ops_per_thread = 1000;

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = format!("thread{}-key{}", thread_id, i);
                    let value = thread_id * 10000 + i;

                    cache.set(key.clone(), value);

                    // Another thread may have evicted it already
                    if let Some(v) = cache.get(&key) {
                        assert_eq!(v, value);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    println!(
        "   Completed {} operations across {} threads",
        num_threads * ops_per_thread * 2, // set + get per iteration
        num_threads
    );
    println!(
        "   Final cache size: {} of {} items",
        cache.len(),
        cache.capacity()
    );

    let metrics = cache.metrics();
    println!(
        "   Hit rate: {:.1}%, evictions: {}",
        metrics["hit_rate"] * 100.0,
        metrics["evictions"]
    );
}

/// Zero-copy access pattern using get_with()
fn zero_copy_get_with() {
    println!("2. Zero-Copy Access with get_with()");
    println!("   ----------------------------------");

    let cache: ConcurrentLruCache<String, Vec<u8>> =
        ConcurrentLruCache::new(100).expect("non-zero capacity");

    cache.set("large_key".to_string(), vec![1u8; 1024]);

    let sum: Option<u64> = cache.get_with("large_key", |data| data.iter().map(|&x| x as u64).sum());

    println!("   Stored 1KB of data in cache");
    println!(
        "   Computed sum without cloning: {}",
        sum.unwrap_or_default()
    );
    println!("   get() returns a clone - use get_with() to avoid cloning");
}

/// Show which key a full cache gives up
fn eviction_order() {
    println!("3. Eviction Order");
    println!("   ---------------");

    let cache = ConcurrentLruCache::new(3).expect("non-zero capacity");
    cache.set("a", 1);
    cache.set("b", 2);
    cache.set("c", 3);
    println!("   Inserted a, b, c into a cache of 3");

    cache.get(&"a");
    println!("   Read a, order is now {:?}", cache.keys());

    let existed = cache.set("d", 4);
    println!("   Set d (existed: {}), order is now {:?}", existed, cache.keys());
    println!("   b was least recently used and is gone: {:?}", cache.get(&"b"));

    cache.clear();
    println!("   After clear: {} items", cache.len());
}

/// A zero capacity never produces a cache
fn capacity_validation() {
    println!("4. Capacity Validation");
    println!("   --------------------");

    match ConcurrentLruCache::<String, i32>::new(0) {
        Ok(_) => println!("   unexpected: zero capacity accepted"),
        Err(err) => println!("   new(0) rejected: {}", err),
    }
}

/// Compare throughput as more threads share the one lock
fn throughput_by_thread_count() {
    println!("5. Throughput by Thread Count (10K ops each)");
    println!("   -------------------------------------------");

    let ops_per_thread = 10_000;

    for num_threads in [1, 2, 4, 8] {
        let cache: Arc<ConcurrentLruCache<usize, usize>> =
            Arc::new(ConcurrentLruCache::new(10_000).expect("non-zero capacity"));

        let start = Instant::now();

        let handles: Vec<_> = (0..num_threads)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let offset = t * ops_per_thread;
                    for i in 0..ops_per_thread {
                        let key = offset + i;
                        cache.set(key, key);
                        cache.get(&key);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("Thread panicked");
        }

        let elapsed = start.elapsed();
        let total_ops = num_threads * ops_per_thread * 2;
        let ops_per_sec = (total_ops as f64 / elapsed.as_secs_f64()) as u64;

        println!(
            "   {:2} threads: {:>7.2?} ({:>10} ops/sec)",
            num_threads, elapsed, ops_per_sec
        );
    }

    println!();
    println!("   All threads serialize on one mutex; more threads add contention.");
}
