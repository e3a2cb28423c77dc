//! Peer capabilities
//!
//! Seams between a group and the cluster: picking the owner of a key and
//! fetching a key from that owner.

use std::sync::Arc;

use async_trait::async_trait;

// == Peer Picker ==
/// Locates the peer that owns a key.
pub trait PeerPicker: Send + Sync {
    /// Returns the owning remote peer, or None to resolve locally
    /// (no peers known, or this node is the owner).
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerFetcher>>;
}

// == Peer Fetcher ==
/// Fetches a key from the group of the same name on a remote peer.
#[async_trait]
pub trait PeerFetcher: Send + Sync {
    async fn fetch(&self, group: &str, key: &str) -> anyhow::Result<Vec<u8>>;
}
