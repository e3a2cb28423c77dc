//! Configuration Module
//!
//! Handles loading node configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::peer::{normalize_addr, DEFAULT_PEER_TIMEOUT};
use crate::ring::DEFAULT_REPLICAS;

/// Node configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Capacity in bytes of the demo group's cache, 0 = unbounded
    pub cache_bytes: u64,
    /// HTTP server port
    pub server_port: u16,
    /// This node's base URL as listed in `peers`
    pub self_addr: String,
    /// Base URLs of every node in the cluster, this one included
    pub peers: Vec<String>,
    /// Virtual nodes per peer on the hash ring
    pub replicas: usize,
    /// Deadline for one request to a peer, in milliseconds
    pub peer_timeout_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_BYTES` - Cache capacity in bytes (default: 2048)
    /// - `SERVER_PORT` - HTTP server port (default: 8001)
    /// - `SELF_ADDR` - This node's base URL (default: `http://localhost:<SERVER_PORT>`)
    /// - `PEERS` - Comma-separated peer base URLs (default: only `SELF_ADDR`)
    /// - `REPLICAS` - Virtual nodes per peer (default: 50)
    /// - `PEER_TIMEOUT_MS` - Peer request deadline in milliseconds (default: 2000)
    ///
    /// Addresses are compared verbatim when routing, so `SELF_ADDR` and every
    /// `PEERS` entry are trimmed of whitespace and trailing slashes alike.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let server_port = parse_var("SERVER_PORT").unwrap_or(defaults.server_port);
        let self_addr = env::var("SELF_ADDR")
            .ok()
            .map(|v| normalize_addr(&v))
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| local_addr(server_port));
        let peers = env::var("PEERS")
            .ok()
            .map(|v| parse_peers(&v))
            .filter(|peers| !peers.is_empty())
            .unwrap_or_else(|| vec![self_addr.clone()]);

        Self {
            cache_bytes: parse_var("CACHE_BYTES").unwrap_or(defaults.cache_bytes),
            server_port,
            self_addr,
            peers,
            replicas: parse_var("REPLICAS").unwrap_or(defaults.replicas),
            peer_timeout_ms: parse_var("PEER_TIMEOUT_MS").unwrap_or(defaults.peer_timeout_ms),
        }
    }

    pub fn peer_timeout(&self) -> Duration {
        Duration::from_millis(self.peer_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        let server_port = 8001;
        let self_addr = local_addr(server_port);
        Self {
            cache_bytes: 2 << 10,
            server_port,
            peers: vec![self_addr.clone()],
            self_addr,
            replicas: DEFAULT_REPLICAS,
            peer_timeout_ms: DEFAULT_PEER_TIMEOUT.as_millis() as u64,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn local_addr(port: u16) -> String {
    format!("http://localhost:{}", port)
}

/// Splits a comma-separated peer list, dropping blanks and trailing slashes.
fn parse_peers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(normalize_addr)
        .filter(|peer| !peer.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_bytes, 2048);
        assert_eq!(config.server_port, 8001);
        assert_eq!(config.self_addr, "http://localhost:8001");
        assert_eq!(config.peers, vec!["http://localhost:8001"]);
        assert_eq!(config.replicas, 50);
        assert_eq!(config.peer_timeout(), Duration::from_secs(2));
    }

    const VARS: [&str; 6] = [
        "CACHE_BYTES",
        "SERVER_PORT",
        "SELF_ADDR",
        "PEERS",
        "REPLICAS",
        "PEER_TIMEOUT_MS",
    ];

    // Both cases mutate the process environment, so they run in one test
    #[test]
    fn test_config_from_env() {
        // Clear any existing env vars to test defaults
        for name in VARS {
            env::remove_var(name);
        }
        assert_eq!(Config::from_env(), Config::default());

        env::set_var("SELF_ADDR", " http://localhost:8001/ ");
        env::set_var("PEERS", "http://localhost:8001/,http://localhost:8002/");
        env::set_var("PEER_TIMEOUT_MS", "250");
        let config = Config::from_env();
        for name in VARS {
            env::remove_var(name);
        }

        assert_eq!(config.self_addr, "http://localhost:8001");
        assert_eq!(config.self_addr, config.peers[0]);
        assert_eq!(config.peers[1], "http://localhost:8002");
        assert_eq!(config.peer_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_parse_peers() {
        let peers = parse_peers(" http://a:8001/, ,http://b:8002 ,");
        assert_eq!(peers, vec!["http://a:8001", "http://b:8002"]);
        assert!(parse_peers(" , ").is_empty());
    }
}
