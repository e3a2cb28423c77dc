//! Group Statistics
//!
//! Lock-free counters describing how a group resolved its requests.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Group Stats ==
/// Per-group request counters.
#[derive(Debug, Default)]
pub struct GroupStats {
    gets: AtomicU64,
    cache_hits: AtomicU64,
    peer_loads: AtomicU64,
    peer_errors: AtomicU64,
    local_loads: AtomicU64,
    local_load_errs: AtomicU64,
}

/// Point-in-time copy of `GroupStats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupStatsSnapshot {
    /// Every call to `get`, including rejected ones
    pub gets: u64,
    pub cache_hits: u64,
    /// Values served by a remote peer
    pub peer_loads: u64,
    /// Failed peer fetches that fell back to the loader
    pub peer_errors: u64,
    /// Successful loader calls
    pub local_loads: u64,
    pub local_load_errs: u64,
}

impl GroupStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_get(&self) {
        self.gets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_peer_load(&self) {
        self.peer_loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_peer_error(&self) {
        self.peer_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_local_load(&self) {
        self.local_loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_local_load_err(&self) {
        self.local_load_errs.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Reads all counters.
    pub fn snapshot(&self) -> GroupStatsSnapshot {
        GroupStatsSnapshot {
            gets: self.gets.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            peer_loads: self.peer_loads.load(Ordering::Relaxed),
            peer_errors: self.peer_errors.load(Ordering::Relaxed),
            local_loads: self.local_loads.load(Ordering::Relaxed),
            local_load_errs: self.local_load_errs.load(Ordering::Relaxed),
        }
    }
}
