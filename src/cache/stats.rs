//! Store statistics
//!
//! Counters kept by an `LruStore` alongside its byte weight, reported by
//! the `/stats/{group}` endpoint.

use serde::Serialize;

// == Cache Stats ==
/// Lookup counters and current occupancy of one `LruStore`.
///
/// `bytes` is the store's weight: the sum of `key.len() + value.byte_len()`
/// over resident entries, the same quantity bounded by the store capacity.
/// `evictions` counts entries dropped through `remove_oldest`, whether by
/// capacity pressure or by the caller; `remove` by key is not an eviction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries dropped as least recently used
    pub evictions: u64,
    /// Resident entries
    pub total_entries: usize,
    /// Resident weight in bytes
    pub bytes: u64,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Mirrors the store's entry count and weight after a mutation.
    pub fn set_occupancy(&mut self, entries: usize, bytes: u64) {
        self.total_entries = entries;
        self.bytes = bytes;
    }
}
