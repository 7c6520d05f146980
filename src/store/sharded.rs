//! Sharded store implementation
//!
//! HashMap shards behind parking_lot RwLocks, shard picked by key hash.

use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::hash::BuildHasher;

use bytes::Bytes;
use parking_lot::RwLock;

use super::{DeleteOutcome, Stats, StatsSnapshot};

type Shard = RwLock<HashMap<Bytes, Bytes>>;

/// The shared key-value store
///
/// ## Concurrency Model
///
/// - Each shard has its own RwLock; a key always maps to the same shard.
/// - `get` counts its hit or miss while still holding the shard read lock,
///   so the count always matches the value that was observed.
/// - `delete` removes under the write lock; only one concurrent caller can
///   see `Deleted` for the same key.
/// - No lock is ever held across I/O; values are cloned out (cheap `Bytes`
///   refcount bump) before returning.
pub struct Store {
    shards: Box<[Shard]>,
    hasher: RandomState,
    stats: Stats,
}

impl Store {
    /// Default shard count
    pub const DEFAULT_SHARDS: usize = 16;

    /// Create an empty store with the default shard count
    pub fn new() -> Self {
        Self::with_shards(Self::DEFAULT_SHARDS)
    }

    /// Create an empty store with `num_shards` shards (at least one)
    pub fn with_shards(num_shards: usize) -> Self {
        let shards = (0..num_shards.max(1))
            .map(|_| RwLock::new(HashMap::new()))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            shards,
            hasher: RandomState::new(),
            stats: Stats::new(),
        }
    }

    fn shard(&self, key: &[u8]) -> &Shard {
        let index = self.hasher.hash_one(key) as usize % self.shards.len();
        &self.shards[index]
    }

    /// Insert or overwrite the value for `key`
    pub fn set(&self, key: impl Into<Bytes>, value: impl Into<Bytes>) {
        let key = key.into();
        let value = value.into();
        self.shard(&key).write().insert(key, value);
        self.stats.record_set();
    }

    /// Look up `key`, counting a hit or a miss
    pub fn get(&self, key: &[u8]) -> Option<Bytes> {
        let shard = self.shard(key).read();
        match shard.get(key) {
            Some(value) => {
                self.stats.record_hit();
                Some(value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Remove `key` if present
    pub fn delete(&self, key: &[u8]) -> DeleteOutcome {
        let removed = self.shard(key).write().remove(key);
        match removed {
            Some(_) => {
                self.stats.record_delete();
                DeleteOutcome::Deleted
            }
            None => DeleteOutcome::NotFound,
        }
    }

    /// Check for `key` without touching the hit/miss counters
    pub fn contains(&self, key: &[u8]) -> bool {
        self.shard(key).read().contains_key(key)
    }

    /// Number of live entries across all shards
    ///
    /// Shards are read one after another, so the total is approximate
    /// under concurrent writes.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.read().is_empty())
    }

    pub fn num_shards(&self) -> usize {
        self.shards.len()
    }

    /// Point-in-time statistics
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot(self.len())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
