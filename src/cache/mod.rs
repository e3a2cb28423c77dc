//! Cache Module
//!
//! Provides the bounded, byte-weighted LRU store that backs every group's
//! local cache, plus the lock-guarded wrapper groups talk to.

mod byte_view;
mod guarded;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use byte_view::ByteView;
pub use guarded::GuardedCache;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::{EvictionCallback, LruStore};

// == Cache Value ==
/// A value that can be weighed by the LRU store.
///
/// The store charges `key.len() + value.byte_len()` against its capacity.
pub trait CacheValue {
    /// Number of bytes this value occupies.
    fn byte_len(&self) -> usize;
}

impl CacheValue for String {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl CacheValue for Vec<u8> {
    fn byte_len(&self) -> usize {
        self.len()
    }
}
