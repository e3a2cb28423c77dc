//! Peer Module
//!
//! HTTP implementations of the peer capabilities: `HttpFetcher` asks a
//! remote node for a key, `HttpPool` picks the owning node from a
//! consistent-hash ring of peer addresses.

use std::time::Duration;

use reqwest::Client;

use crate::error::PeerError;

mod client;
mod pool;

pub use client::HttpFetcher;
pub use pool::HttpPool;
pub(crate) use pool::normalize_addr;

// == Public Constants ==
/// Path prefix of the peer endpoint: `/_groupcache/{group}/{key}`
pub const PEER_BASE_PATH: &str = "/_groupcache/";

/// Deadline for a whole peer request, connect through body
pub const DEFAULT_PEER_TIMEOUT: Duration = Duration::from_secs(2);

/// `PEER_BASE_PATH` as a single path segment
pub(crate) const PEER_SEGMENT: &str = "_groupcache";

/// Builds the HTTP client shared by a node's peer fetchers.
///
/// A peer that accepts the connection but never answers fails with a
/// timeout error after `timeout`, so the group can fall back to its loader.
pub(crate) fn peer_client(timeout: Duration) -> Result<Client, PeerError> {
    Ok(Client::builder().timeout(timeout).build()?)
}
