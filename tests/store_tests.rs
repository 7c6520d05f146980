//! Store Tests
//!
//! Tests verify:
//! - Basic get/set/delete
//! - Hit/miss/set/delete counting
//! - Stats snapshot formatting
//! - Concurrent access patterns

use std::sync::{Arc, Barrier};
use std::thread;

use kvcache::store::{DeleteOutcome, StatsSnapshot, Store};

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_store_is_empty() {
    let store = Store::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(store.num_shards(), Store::DEFAULT_SHARDS);
    assert_eq!(store.stats(), StatsSnapshot::default());
}

#[test]
fn test_set_and_get() {
    let store = Store::new();
    store.set("key1", "value1");

    assert_eq!(store.get(b"key1").as_deref(), Some(&b"value1"[..]));
}

#[test]
fn test_get_nonexistent_key() {
    let store = Store::new();
    assert_eq!(store.get(b"nonexistent"), None);
}

#[test]
fn test_set_overwrites_existing() {
    let store = Store::new();
    store.set("key1", "value1");
    store.set("key1", "value2");

    assert_eq!(store.len(), 1);
    assert_eq!(store.get(b"key1").as_deref(), Some(&b"value2"[..]));
}

#[test]
fn test_repeated_set_is_idempotent() {
    let store = Store::new();
    for _ in 0..5 {
        store.set("k", "v");
    }

    assert_eq!(store.len(), 1);
    assert_eq!(store.get(b"k").as_deref(), Some(&b"v"[..]));
}

#[test]
fn test_empty_key_and_value() {
    let store = Store::new();
    store.set("", "");

    assert!(store.contains(b""));
    assert_eq!(store.get(b"").as_deref(), Some(&b""[..]));
}

#[test]
fn test_zero_shards_clamped_to_one() {
    let store = Store::with_shards(0);
    assert_eq!(store.num_shards(), 1);

    store.set("a", "1");
    store.set("b", "2");
    assert_eq!(store.len(), 2);
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_existing() {
    let store = Store::new();
    store.set("key1", "value1");

    assert_eq!(store.delete(b"key1"), DeleteOutcome::Deleted);
    assert_eq!(store.get(b"key1"), None);
    assert!(store.is_empty());
}

#[test]
fn test_delete_missing() {
    let store = Store::new();
    assert_eq!(store.delete(b"ghost"), DeleteOutcome::NotFound);
    assert_eq!(store.stats().deletes, 0);
}

#[test]
fn test_delete_then_get_misses_after_many_sets() {
    let store = Store::new();
    store.set("k", "a");
    store.set("k", "b");
    store.delete(b"k");

    assert_eq!(store.get(b"k"), None);
    assert_eq!(store.delete(b"k"), DeleteOutcome::NotFound);
}

// =============================================================================
// Stats Tests
// =============================================================================

#[test]
fn test_hit_and_miss_counting() {
    let store = Store::new();
    store.set("key1", "value1");
    store.get(b"key1");
    store.get(b"key2");

    let stats = store.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.sets, 1);
    assert_eq!(stats.keys, 1);
}

#[test]
fn test_contains_does_not_count() {
    let store = Store::new();
    store.set("k", "v");
    assert!(store.contains(b"k"));
    assert!(!store.contains(b"other"));

    let stats = store.stats();
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 0);
}

#[test]
fn test_counters_are_monotonic() {
    let store = Store::new();
    let mut previous = store.stats();

    for i in 0..50 {
        let key = format!("key{}", i % 7);
        if i % 3 == 0 {
            store.set(key.clone(), "v");
        }
        store.get(key.as_bytes());
        if i % 5 == 0 {
            store.delete(key.as_bytes());
        }

        let current = store.stats();
        assert!(current.hits >= previous.hits);
        assert!(current.misses >= previous.misses);
        assert!(current.sets >= previous.sets);
        assert!(current.deletes >= previous.deletes);
        previous = current;
    }
}

#[test]
fn test_stats_display_format() {
    let snapshot = StatsSnapshot {
        hits: 1,
        misses: 2,
        sets: 3,
        deletes: 4,
        keys: 5,
    };
    assert_eq!(
        snapshot.to_string(),
        "Hits: 1, Misses: 2, Sets: 3, Deletes: 4, Keys: 5"
    );
    assert_eq!(StatsSnapshot::parse(&snapshot.to_string()), Some(snapshot));
}

#[test]
fn test_stats_parse_short_form() {
    let parsed = StatsSnapshot::parse("Hits: 7, Misses: 3").unwrap();
    assert_eq!(parsed.hits, 7);
    assert_eq!(parsed.misses, 3);
    assert_eq!(parsed.sets, 0);
}

#[test]
fn test_stats_parse_garbage() {
    assert_eq!(StatsSnapshot::parse(""), None);
    assert_eq!(StatsSnapshot::parse("Hits: lots"), None);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_set_get_distinct_keys() {
    let store = Arc::new(Store::new());
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..100 {
                    let key = format!("t{}-k{}", t, i);
                    let value = format!("v{}", i);
                    store.set(key.clone(), value.clone());
                    assert_eq!(store.get(key.as_bytes()).as_deref(), Some(value.as_bytes()));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let stats = store.stats();
    assert_eq!(store.len(), 800);
    assert_eq!(stats.hits, 800);
    assert_eq!(stats.sets, 800);
    assert_eq!(stats.misses, 0);
}

#[test]
fn test_concurrent_gets_same_key_count_exactly() {
    const THREADS: usize = 8;
    const GETS: usize = 250;

    let store = Arc::new(Store::new());
    store.set("hot", "value");
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..GETS {
                    assert_eq!(store.get(b"hot").as_deref(), Some(&b"value"[..]));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.stats().hits, (THREADS * GETS) as u64);
    assert_eq!(store.stats().misses, 0);
}

#[test]
fn test_concurrent_delete_only_one_wins() {
    const THREADS: usize = 8;

    for round in 0..20 {
        let store = Arc::new(Store::new());
        let key = format!("contested-{}", round);
        store.set(key.clone(), "v");
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                let key = key.clone();
                thread::spawn(move || {
                    barrier.wait();
                    store.delete(key.as_bytes())
                })
            })
            .collect();

        let deleted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|outcome| *outcome == DeleteOutcome::Deleted)
            .count();

        assert_eq!(deleted, 1);
        assert_eq!(store.stats().deletes, 1);
    }
}

#[test]
fn test_concurrent_mixed_every_get_counted_once() {
    const THREADS: usize = 6;
    const OPS: usize = 300;

    let store = Arc::new(Store::with_shards(4));
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..OPS {
                    let key = format!("k{}", i % 10);
                    match (t + i) % 3 {
                        0 => store.set(key, "v"),
                        1 => {
                            store.delete(key.as_bytes());
                        }
                        _ => {
                            store.get(key.as_bytes());
                        }
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let gets = (0..THREADS)
        .map(|t| (0..OPS).filter(|i| (t + i) % 3 == 2).count())
        .sum::<usize>() as u64;
    let stats = store.stats();
    assert_eq!(stats.hits + stats.misses, gets);
}
