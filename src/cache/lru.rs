//! LRU Tracker Module
//!
//! Tracks recency of access for least-recently-used eviction.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Every touch stamps the key with the next value of a monotonic clock.
/// Stamps are kept in a BTreeMap where:
/// - First entry = Least recently used
/// - Last entry = Most recently used
///
/// Touch, remove and eviction are all O(log n).
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Keys ordered by access stamp
    order: BTreeMap<u64, String>,
    /// Current access stamp of every tracked key
    stamps: HashMap<String, u64>,
    /// Monotonic access clock
    clock: u64,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used.
    ///
    /// If key exists, its previous stamp is dropped first.
    pub fn touch(&mut self, key: &str) {
        self.clock += 1;
        let stamp = self.clock;

        match self.stamps.get_mut(key) {
            Some(previous) => {
                self.order.remove(&*previous);
                *previous = stamp;
            }
            None => {
                self.stamps.insert(key.to_string(), stamp);
            }
        }
        self.order.insert(stamp, key.to_string());
    }

    // == Remove ==
    /// Stops tracking a key. Returns whether it was tracked.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.stamps.remove(key) {
            Some(stamp) => {
                self.order.remove(&stamp);
                true
            }
            None => false,
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.stamps.remove(&key);
        Some(key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.order.first_key_value().map(|(_, key)| key.as_str())
    }

    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.stamps.contains_key(key)
    }
}
