//! HTTP peer pool
//!
//! Tracks the cluster's peer addresses and routes keys to their owners.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::Client;
use tracing::{debug, info};

use crate::error::PeerError;
use crate::group::{PeerFetcher, PeerPicker};
use crate::peer::{peer_client, HttpFetcher};
use crate::ring::HashRing;

/// Ring and fetchers built from one peer list.
#[derive(Debug)]
struct PeerSet {
    ring: HashRing,
    fetchers: HashMap<String, Arc<HttpFetcher>>,
}

// == HTTP Pool ==
/// `PeerPicker` over a set of HTTP peers.
///
/// The peer list should include this node's own address; keys this node
/// owns are resolved locally.
#[derive(Debug)]
pub struct HttpPool {
    /// This node's base URL, as it appears in the peer list
    self_addr: String,
    replicas: usize,
    client: Client,
    peers: RwLock<Option<PeerSet>>,
}

impl HttpPool {
    // == Constructor ==
    /// Creates a pool with no peers; every key resolves locally until
    /// `set_peers` is called.
    ///
    /// `timeout` bounds each peer request. Trailing slashes on `self_addr`
    /// are ignored, matching how peer lists are parsed.
    pub fn new(
        self_addr: impl Into<String>,
        replicas: usize,
        timeout: Duration,
    ) -> Result<Self, PeerError> {
        Ok(Self {
            self_addr: normalize_addr(&self_addr.into()),
            replicas,
            client: peer_client(timeout)?,
            peers: RwLock::new(None),
        })
    }

    pub fn self_addr(&self) -> &str {
        &self.self_addr
    }

    // == Set Peers ==
    /// Replaces the peer list with `peers`.
    ///
    /// A fresh ring is built outside the lock and swapped in.
    pub fn set_peers<I, S>(&self, peers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let addrs: Vec<String> = peers
            .into_iter()
            .map(|peer| normalize_addr(peer.as_ref()))
            .filter(|peer| !peer.is_empty())
            .collect();

        let mut ring = HashRing::new(self.replicas);
        ring.add(&addrs);
        let fetchers = addrs
            .iter()
            .map(|addr| {
                let fetcher = HttpFetcher::with_client(addr.clone(), self.client.clone());
                (addr.clone(), Arc::new(fetcher))
            })
            .collect();

        *self.peers.write() = Some(PeerSet { ring, fetchers });
        info!(self_addr = %self.self_addr, peers = ?addrs, "peer set updated");
    }

    /// Returns the configured peer addresses, sorted.
    pub fn peers(&self) -> Vec<String> {
        let mut addrs: Vec<String> = self
            .peers
            .read()
            .as_ref()
            .map(|set| set.fetchers.keys().cloned().collect())
            .unwrap_or_default();
        addrs.sort();
        addrs
    }

    /// Returns the address owning `key`, including this node's own.
    pub fn owner_of(&self, key: &str) -> Option<String> {
        let peers = self.peers.read();
        peers.as_ref()?.ring.get(key).map(str::to_string)
    }
}

/// Strips surrounding whitespace and trailing slashes from a base URL.
pub(crate) fn normalize_addr(addr: &str) -> String {
    addr.trim().trim_end_matches('/').to_string()
}

impl PeerPicker for HttpPool {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerFetcher>> {
        let peers = self.peers.read();
        let set = peers.as_ref()?;
        let owner = set.ring.get(key)?;
        if owner == self.self_addr {
            return None;
        }

        debug!(self_addr = %self.self_addr, key, peer = owner, "picked peer");
        let fetcher: Arc<dyn PeerFetcher> = set.fetchers.get(owner)?.clone();
        Some(fetcher)
    }
}
