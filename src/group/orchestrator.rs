//! Group orchestrator
//!
//! Resolves a key in three steps: local cache, owning peer, local loader.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use crate::cache::{ByteView, CacheStats, GuardedCache};
use crate::error::{CacheError, GroupError, Result};
use crate::group::{GroupStats, GroupStatsSnapshot, Loader, PeerFetcher, PeerPicker};

// == Group ==
/// A named cache namespace.
///
/// Lookups first consult the local cache. On a miss the key is delegated to
/// the peer that owns it, if a peer picker is registered and names a remote
/// peer. Any peer failure is logged and the group falls back to its loader,
/// whose result is cached locally. Values served by a peer are not cached
/// here; the owner keeps them.
///
/// No lock is held while the loader or a peer is called. Concurrent misses
/// for the same key are not coalesced and each one reaches the loader.
pub struct Group {
    name: String,
    loader: Arc<dyn Loader>,
    main_cache: GuardedCache,
    peers: OnceLock<Arc<dyn PeerPicker>>,
    stats: GroupStats,
}

impl Group {
    // == Constructor ==
    /// Creates a group; use `GroupRegistry::new_group` to make it discoverable.
    pub(crate) fn new(name: String, cache_bytes: u64, loader: Arc<dyn Loader>) -> Self {
        Self {
            name,
            loader,
            main_cache: GuardedCache::new(cache_bytes),
            peers: OnceLock::new(),
            stats: GroupStats::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // == Register Peers ==
    /// Attaches the peer picker used to route misses.
    ///
    /// A group accepts exactly one picker over its lifetime.
    pub fn register_peers(&self, peers: Arc<dyn PeerPicker>) -> std::result::Result<(), GroupError> {
        self.peers
            .set(peers)
            .map_err(|_| GroupError::PeersAlreadyRegistered {
                group: self.name.clone(),
            })
    }

    // == Get ==
    /// Returns the value for `key`, loading it on a miss.
    ///
    /// # Errors
    /// - `CacheError::InvalidArgument` for an empty key
    /// - `CacheError::Load` when the loader fails
    pub async fn get(&self, key: &str) -> Result<ByteView> {
        self.stats.record_get();
        if key.is_empty() {
            return Err(CacheError::InvalidArgument("key is required".to_string()));
        }

        if let Some(value) = self.main_cache.get(key) {
            self.stats.record_cache_hit();
            debug!(group = %self.name, key, "cache hit");
            return Ok(value);
        }

        self.load(key).await
    }

    async fn load(&self, key: &str) -> Result<ByteView> {
        if let Some(peer) = self.peers.get().and_then(|picker| picker.pick_peer(key)) {
            match self.get_from_peer(peer.as_ref(), key).await {
                Ok(value) => {
                    self.stats.record_peer_load();
                    return Ok(value);
                }
                Err(err) => {
                    self.stats.record_peer_error();
                    warn!(group = %self.name, key, error = %err, "failed to get from peer, loading locally");
                }
            }
        }

        self.get_locally(key).await
    }

    async fn get_from_peer(&self, peer: &dyn PeerFetcher, key: &str) -> anyhow::Result<ByteView> {
        let bytes = peer.fetch(&self.name, key).await?;
        Ok(ByteView::from(bytes))
    }

    async fn get_locally(&self, key: &str) -> Result<ByteView> {
        let bytes = match self.loader.load(key).await {
            Ok(bytes) => bytes,
            Err(err) => {
                self.stats.record_local_load_err();
                return Err(CacheError::Load(err));
            }
        };
        self.stats.record_local_load();
        debug!(group = %self.name, key, bytes = bytes.len(), "loaded locally");

        // The loader hands over ownership of the buffer, so nothing else can mutate it
        let value = ByteView::from(bytes);
        self.populate_cache(key, value.clone());
        Ok(value)
    }

    fn populate_cache(&self, key: &str, value: ByteView) {
        self.main_cache.add(key, value);
    }

    /// Returns the group's request counters.
    pub fn stats(&self) -> GroupStatsSnapshot {
        self.stats.snapshot()
    }

    /// Returns the local cache's statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.main_cache.stats()
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("main_cache", &self.main_cache)
            .field("has_peers", &self.peers.get().is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::LoaderFn;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use proptest::prelude::*;

    /// Loader over a fixed table that counts calls per key
    fn counting_loader(
        table: &[(&str, &str)],
    ) -> (Arc<dyn Loader>, Arc<Mutex<HashMap<String, usize>>>) {
        let db: HashMap<String, String> = table
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let calls = Arc::new(Mutex::new(HashMap::new()));
        let seen = Arc::clone(&calls);

        let loader: Arc<dyn Loader> = Arc::new(LoaderFn(move |key: &str| -> anyhow::Result<Vec<u8>> {
            *seen.lock().unwrap().entry(key.to_string()).or_insert(0) += 1;
            db.get(key)
                .map(|v| v.clone().into_bytes())
                .ok_or_else(|| anyhow::anyhow!("{} not exist", key))
        }));
        (loader, calls)
    }

    struct StaticFetcher {
        result: std::result::Result<&'static str, &'static str>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PeerFetcher for StaticFetcher {
        async fn fetch(&self, _group: &str, _key: &str) -> anyhow::Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.result {
                Ok(value) => Ok(value.as_bytes().to_vec()),
                Err(msg) => Err(anyhow::anyhow!(msg)),
            }
        }
    }

    /// Routes every key to the same fetcher
    struct FixedPicker(Option<Arc<StaticFetcher>>);

    impl PeerPicker for FixedPicker {
        fn pick_peer(&self, _key: &str) -> Option<Arc<dyn PeerFetcher>> {
            self.0.clone().map(|f| f as Arc<dyn PeerFetcher>)
        }
    }

    fn fetcher(result: std::result::Result<&'static str, &'static str>) -> Arc<StaticFetcher> {
        Arc::new(StaticFetcher {
            result,
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn test_get_loads_then_caches() {
        let (loader, calls) = counting_loader(&[("Tom", "630"), ("Jack", "589")]);
        let group = Group::new("scores".into(), 2 << 10, loader);

        for _ in 0..3 {
            assert_eq!(group.get("Tom").await.unwrap().to_string(), "630");
            assert_eq!(group.get("Jack").await.unwrap().to_string(), "589");
        }

        let calls = calls.lock().unwrap();
        assert_eq!(calls["Tom"], 1);
        assert_eq!(calls["Jack"], 1);
        assert_eq!(group.stats().cache_hits, 4);
        assert_eq!(group.stats().local_loads, 2);
    }

    #[tokio::test]
    async fn test_empty_key_is_rejected_before_loading() {
        let (loader, calls) = counting_loader(&[]);
        let group = Group::new("scores".into(), 0, loader);

        let err = group.get("").await.unwrap_err();
        assert!(matches!(err, CacheError::InvalidArgument(_)));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_loader_error_is_returned_verbatim_and_not_cached() {
        let (loader, calls) = counting_loader(&[]);
        let group = Group::new("scores".into(), 0, loader);

        let err = group.get("unknown").await.unwrap_err();
        assert_eq!(err.to_string(), "unknown not exist");
        assert!(group.get("unknown").await.is_err());

        assert_eq!(calls.lock().unwrap()["unknown"], 2);
        assert_eq!(group.stats().local_load_errs, 2);
        assert_eq!(group.cache_stats().total_entries, 0);
    }

    #[tokio::test]
    async fn test_peer_value_is_returned_without_local_caching() {
        let (loader, calls) = counting_loader(&[("k", "local")]);
        let group = Group::new("scores".into(), 0, loader);
        let remote = fetcher(Ok("remote"));
        group
            .register_peers(Arc::new(FixedPicker(Some(Arc::clone(&remote)))))
            .unwrap();

        assert_eq!(group.get("k").await.unwrap().to_string(), "remote");
        assert_eq!(group.get("k").await.unwrap().to_string(), "remote");

        assert_eq!(remote.calls.load(Ordering::SeqCst), 2);
        assert!(calls.lock().unwrap().is_empty());
        assert_eq!(group.stats().peer_loads, 2);
        assert_eq!(group.cache_stats().total_entries, 0);
    }

    #[tokio::test]
    async fn test_peer_failure_falls_back_to_loader() {
        let (loader, calls) = counting_loader(&[("k", "local")]);
        let group = Group::new("scores".into(), 0, loader);
        let remote = fetcher(Err("connection refused"));
        group
            .register_peers(Arc::new(FixedPicker(Some(Arc::clone(&remote)))))
            .unwrap();

        assert_eq!(group.get("k").await.unwrap().to_string(), "local");
        assert_eq!(calls.lock().unwrap()["k"], 1);
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);

        // Cached after the local load, so the peer is not asked again
        assert_eq!(group.get("k").await.unwrap().to_string(), "local");
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
        assert_eq!(group.stats().peer_errors, 1);
    }

    #[tokio::test]
    async fn test_no_peer_picked_loads_locally() {
        let (loader, calls) = counting_loader(&[("k", "local")]);
        let group = Group::new("scores".into(), 0, loader);
        group.register_peers(Arc::new(FixedPicker(None))).unwrap();

        assert_eq!(group.get("k").await.unwrap().to_string(), "local");
        assert_eq!(calls.lock().unwrap()["k"], 1);
        assert_eq!(group.stats().peer_errors, 0);
    }

    #[test]
    fn test_register_peers_twice_is_misuse() {
        let (loader, _) = counting_loader(&[]);
        let group = Group::new("scores".into(), 0, loader);

        assert!(group.register_peers(Arc::new(FixedPicker(None))).is_ok());
        let err = group.register_peers(Arc::new(FixedPicker(None))).unwrap_err();
        assert_eq!(
            err,
            GroupError::PeersAlreadyRegistered {
                group: "scores".into()
            }
        );
    }

    #[tokio::test]
    async fn test_small_cache_evicts_and_reloads() {
        let (loader, calls) = counting_loader(&[("a", "1111"), ("b", "2222")]);
        // Room for one entry of 5 bytes
        let group = Group::new("tiny".into(), 5, loader);

        group.get("a").await.unwrap();
        group.get("b").await.unwrap();
        group.get("a").await.unwrap();

        assert_eq!(calls.lock().unwrap()["a"], 2);
        assert_eq!(group.cache_stats().evictions, 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        // Whatever the key, the loader runs once and the cache answers after.
        #[test]
        fn prop_loader_runs_once_per_key(keys in prop::collection::hash_set("[a-z]{1,10}", 1..20)) {
            let loader = LoaderFn(|key: &str| -> anyhow::Result<Vec<u8>> { Ok(key.to_uppercase().into_bytes()) });
            let group = Group::new("upper".into(), 0, Arc::new(loader));

            tokio_test::block_on(async {
                for key in &keys {
                    group.get(key).await.unwrap();
                    let cached = group.get(key).await.unwrap();
                    assert_eq!(cached.to_string(), key.to_uppercase());
                }
            });

            let stats = group.stats();
            prop_assert_eq!(stats.local_loads as usize, keys.len());
            prop_assert_eq!(stats.cache_hits as usize, keys.len());
        }
    }
}
