//! Guarded Cache Module
//!
//! Thread-safe facade over one `LruStore`, constructed on first write.

use parking_lot::Mutex;

use crate::cache::{ByteView, CacheStats, LruStore};

/// Lifecycle of the underlying store.
#[derive(Debug)]
enum StoreState {
    /// Nothing has been written yet, nothing is allocated
    Uninitialized,
    Ready(LruStore<ByteView>),
}

// == Guarded Cache ==
/// A lock-guarded `LruStore` of `ByteView` values.
///
/// A single mutex serializes construction and every read or write; the
/// store itself is only ever touched while it is held. Lookups need the
/// exclusive lock too because a hit reorders recency.
#[derive(Debug)]
pub struct GuardedCache {
    capacity: u64,
    state: Mutex<StoreState>,
}

impl GuardedCache {
    // == Constructor ==
    /// Creates a cache that will hold at most `capacity` bytes once used.
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            state: Mutex::new(StoreState::Uninitialized),
        }
    }

    // == Add ==
    /// Stores a value, building the store first if this is the first write.
    pub fn add(&self, key: &str, value: ByteView) {
        let mut state = self.state.lock();
        if let StoreState::Uninitialized = *state {
            *state = StoreState::Ready(LruStore::new(self.capacity));
        }
        if let StoreState::Ready(store) = &mut *state {
            store.add(key, value);
        }
    }

    // == Get ==
    /// Looks up a value. Always a miss before the first write.
    pub fn get(&self, key: &str) -> Option<ByteView> {
        match &mut *self.state.lock() {
            StoreState::Uninitialized => None,
            StoreState::Ready(store) => store.get(key).cloned(),
        }
    }

    /// Returns whether the underlying store has been built.
    pub fn is_initialized(&self) -> bool {
        matches!(*self.state.lock(), StoreState::Ready(_))
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn len(&self) -> usize {
        match &*self.state.lock() {
            StoreState::Uninitialized => 0,
            StoreState::Ready(store) => store.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns store statistics, all zero before the first write.
    pub fn stats(&self) -> CacheStats {
        match &*self.state.lock() {
            StoreState::Uninitialized => CacheStats::new(),
            StoreState::Ready(store) => store.stats(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_store_is_built_on_first_write() {
        let cache = GuardedCache::new(64);
        assert!(!cache.is_initialized());

        assert_eq!(cache.get("missing"), None);
        assert!(!cache.is_initialized());

        cache.add("tom", ByteView::from("630"));
        assert!(cache.is_initialized());
        assert_eq!(cache.get("tom"), Some(ByteView::from("630")));
    }

    #[test]
    fn test_stats_before_first_write() {
        let cache = GuardedCache::new(0);
        assert_eq!(cache.stats(), CacheStats::new());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_capacity_is_passed_to_store() {
        let cache = GuardedCache::new(10);

        cache.add("k1", ByteView::from("123"));
        cache.add("k2", ByteView::from("456"));
        cache.add("k3", ByteView::from("789"));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("k1"), None);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_concurrent_writers() {
        let cache = Arc::new(GuardedCache::new(0));

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..100 {
                        let key = format!("w{}-{}", worker, i);
                        cache.add(&key, ByteView::from(key.as_str()));
                        assert!(cache.get(&key).is_some());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 800);
    }
}
