//! LRU Store Module
//!
//! Byte-bounded key-value store combining HashMap storage with LRU tracking.

use std::collections::HashMap;
use std::fmt;

use crate::cache::{CacheStats, CacheValue, LruTracker};

/// Callback invoked with every entry evicted for capacity.
pub type EvictionCallback<V> = Box<dyn FnMut(&str, &V) + Send>;

// == LRU Store ==
/// Key-value storage bounded by cumulative byte weight.
///
/// An entry weighs `key.len() + value.byte_len()`. After every insert the
/// least recently used entries are evicted until the total weight fits the
/// capacity again. A capacity of 0 means unbounded.
///
/// Not synchronized; wrap it in a lock to share it (see `GuardedCache`).
pub struct LruStore<V> {
    /// Key-value storage
    entries: HashMap<String, V>,
    /// LRU access tracker
    lru: LruTracker,
    /// Store statistics
    stats: CacheStats,
    /// Maximum total weight, 0 = unbounded
    max_bytes: u64,
    /// Current total weight
    used_bytes: u64,
    /// Notified of capacity evictions
    on_evicted: Option<EvictionCallback<V>>,
}

impl<V: CacheValue> LruStore<V> {
    // == Constructor ==
    /// Creates an empty store holding at most `max_bytes` of keys and values.
    pub fn new(max_bytes: u64) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_bytes,
            used_bytes: 0,
            on_evicted: None,
        }
    }

    /// Creates an empty store that reports evicted entries to `on_evicted`.
    pub fn with_eviction_callback(max_bytes: u64, on_evicted: EvictionCallback<V>) -> Self {
        Self {
            on_evicted: Some(on_evicted),
            ..Self::new(max_bytes)
        }
    }

    // == Get ==
    /// Looks up a key, promoting it to most recently used on a hit.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        if !self.entries.contains_key(key) {
            self.stats.record_miss();
            return None;
        }

        self.lru.touch(key);
        self.stats.record_hit();
        self.entries.get(key)
    }

    // == Add ==
    /// Inserts or replaces a value, then evicts until within capacity.
    ///
    /// Replacing adjusts the weight by the value size delta; a new key adds
    /// its key and value length. Either way the key becomes most recently used.
    pub fn add(&mut self, key: &str, value: V) {
        let value_len = value.byte_len() as u64;

        match self.entries.get_mut(key) {
            Some(existing) => {
                self.used_bytes = self.used_bytes - existing.byte_len() as u64 + value_len;
                *existing = value;
            }
            None => {
                self.used_bytes += key.len() as u64 + value_len;
                self.entries.insert(key.to_string(), value);
            }
        }
        self.lru.touch(key);

        while self.max_bytes != 0 && self.used_bytes > self.max_bytes {
            if self.remove_oldest().is_none() {
                break;
            }
        }
        self.sync_occupancy();
    }

    // == Remove Oldest ==
    /// Evicts the least recently used entry, if any, and returns it.
    ///
    /// The eviction callback is notified before the entry is returned.
    pub fn remove_oldest(&mut self) -> Option<(String, V)> {
        let key = self.lru.evict_oldest()?;
        let value = self.entries.remove(&key)?;

        self.used_bytes -= key.len() as u64 + value.byte_len() as u64;
        self.stats.record_eviction();
        self.sync_occupancy();

        if let Some(on_evicted) = self.on_evicted.as_mut() {
            on_evicted(&key, &value);
        }
        Some((key, value))
    }

    // == Remove ==
    /// Removes an entry by key without notifying the eviction callback.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let value = self.entries.remove(key)?;
        self.lru.remove(key);
        self.used_bytes -= key.len() as u64 + value.byte_len() as u64;
        self.sync_occupancy();
        Some(value)
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the current total weight of keys and values.
    pub fn bytes(&self) -> u64 {
        self.used_bytes
    }

    pub fn capacity(&self) -> u64 {
        self.max_bytes
    }

    /// Returns current store statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    fn sync_occupancy(&mut self) {
        self.stats.set_occupancy(self.entries.len(), self.used_bytes);
    }
}

impl<V> fmt::Debug for LruStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruStore")
            .field("entries", &self.entries.len())
            .field("max_bytes", &self.max_bytes)
            .field("used_bytes", &self.used_bytes)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
