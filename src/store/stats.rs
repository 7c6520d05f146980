//! Store statistics
//!
//! Lock-free counters plus a copyable snapshot type.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide operation counters
///
/// Each field is updated atomically on its own; no ordering is promised
/// between fields.
#[derive(Debug, Default)]
pub struct Stats {
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
    deletes: AtomicU64,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_set(&self) {
        self.sets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    /// Read every counter once
    pub fn snapshot(&self, keys: usize) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            keys,
        }
    }
}

/// Point-in-time view of the store counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// GETs that found their key
    pub hits: u64,

    /// GETs on an absent key
    pub misses: u64,

    /// SETs performed
    pub sets: u64,

    /// DELs that actually removed a key
    pub deletes: u64,

    /// Live entries at snapshot time
    pub keys: usize,
}

impl StatsSnapshot {
    /// Parse the text produced by `Display`
    ///
    /// Unknown fields are ignored and missing ones default to zero, so
    /// clients can still read the `Hits: N, Misses: M` form.
    pub fn parse(text: &str) -> Option<Self> {
        let mut snapshot = StatsSnapshot::default();
        let mut seen = false;

        for field in text.split(',') {
            let (name, value) = field.split_once(':')?;
            let value = value.trim();
            match name.trim() {
                "Hits" => snapshot.hits = value.parse().ok()?,
                "Misses" => snapshot.misses = value.parse().ok()?,
                "Sets" => snapshot.sets = value.parse().ok()?,
                "Deletes" => snapshot.deletes = value.parse().ok()?,
                "Keys" => snapshot.keys = value.parse().ok()?,
                _ => continue,
            }
            seen = true;
        }

        seen.then_some(snapshot)
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hits: {}, Misses: {}, Sets: {}, Deletes: {}, Keys: {}",
            self.hits, self.misses, self.sets, self.deletes, self.keys
        )
    }
}
