//! Store Module
//!
//! Concurrent in-memory key-value storage with operation counters.
//!
//! ## Responsibilities
//! - Get/set/delete of byte keys and values
//! - Hit/miss/set/delete counting, one count per operation
//! - Point-in-time statistics snapshots
//!
//! ## Data Structure Choice
//! Keys are spread over N shards, each a HashMap behind its own
//! parking_lot RwLock:
//! - Operations on keys in different shards never contend
//! - GETs on the same shard share a read lock
//! - Counters are plain atomics, independent of the shard locks
//!
//! Entries never expire and are never evicted.

mod sharded;
mod stats;

pub use sharded::Store;
pub use stats::{Stats, StatsSnapshot};

/// Result of a delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The key existed and was removed by this call
    Deleted,

    /// The key was absent
    NotFound,
}
