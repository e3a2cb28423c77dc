//! Consistent Hash Ring
//!
//! Maps keys onto peers through a sorted array of virtual-node positions.
//! Each peer is placed `replicas` times at `hash("{i}{peer}")`; a key belongs
//! to the first position at or after its own hash, wrapping to the start.

use std::collections::HashMap;
use std::fmt;

/// Hash function placing peers and keys on the ring.
pub type HashFn = fn(&[u8]) -> u32;

/// Virtual nodes per peer used when none is configured.
pub const DEFAULT_REPLICAS: usize = 50;

// == Hash Ring ==
/// Consistent-hash ring of peer identifiers.
pub struct HashRing {
    hash: HashFn,
    replicas: usize,
    /// Sorted ring positions
    positions: Vec<u32>,
    /// Owner of every ring position
    owners: HashMap<u32, String>,
}

impl HashRing {
    // == Constructor ==
    /// Creates an empty ring hashed with CRC-32 (IEEE).
    pub fn new(replicas: usize) -> Self {
        Self::with_hasher(replicas, crc32fast::hash)
    }

    /// Creates an empty ring using a custom hash function.
    pub fn with_hasher(replicas: usize, hash: HashFn) -> Self {
        Self {
            hash,
            replicas,
            positions: Vec::new(),
            owners: HashMap::new(),
        }
    }

    // == Add ==
    /// Places every peer on the ring `replicas` times.
    ///
    /// Positions are re-sorted once all peers have been inserted.
    pub fn add<I, S>(&mut self, peers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for peer in peers {
            let peer = peer.as_ref();
            for i in 0..self.replicas {
                let position = (self.hash)(format!("{}{}", i, peer).as_bytes());
                self.positions.push(position);
                self.owners.insert(position, peer.to_string());
            }
        }
        self.positions.sort_unstable();
    }

    // == Get ==
    /// Returns the peer owning `key`, or None when the ring is empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        if self.positions.is_empty() {
            return None;
        }

        let hash = (self.hash)(key.as_bytes());
        let idx = self.positions.partition_point(|&position| position < hash);
        let position = self.positions[idx % self.positions.len()];
        self.owners.get(&position).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the number of virtual nodes on the ring.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }
}

impl fmt::Debug for HashRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashRing")
            .field("replicas", &self.replicas)
            .field("virtual_nodes", &self.positions.len())
            .finish_non_exhaustive()
    }
}
