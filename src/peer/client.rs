//! HTTP peer fetcher
//!
//! Retrieves a key from a remote node's peer endpoint.

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::error::PeerError;
use crate::group::PeerFetcher;
use crate::peer::{peer_client, DEFAULT_PEER_TIMEOUT, PEER_SEGMENT};

// == HTTP Fetcher ==
/// Fetches values from one remote peer.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    /// Peer base URL, e.g. `http://10.0.0.2:8001`
    base_url: String,
    client: Client,
}

impl HttpFetcher {
    // == Constructor ==
    /// Creates a fetcher with its own client and the default request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, PeerError> {
        Ok(Self::with_client(base_url, peer_client(DEFAULT_PEER_TIMEOUT)?))
    }

    /// Creates a fetcher sharing an existing connection pool.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // == URL Building ==
    /// Builds `{base_url}/_groupcache/{group}/{key}` with both segments
    /// percent-encoded, so keys may contain `/`, `?` or `%`.
    pub fn url_for(&self, group: &str, key: &str) -> Result<Url, PeerError> {
        let invalid = || PeerError::InvalidUrl(self.base_url.clone());

        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| invalid())?;
            segments.pop_if_empty().push(PEER_SEGMENT).push(group).push(key);
        }
        Ok(url)
    }

    async fn get(&self, group: &str, key: &str) -> Result<Vec<u8>, PeerError> {
        let url = self.url_for(group, key)?;
        debug!(%url, "fetching from peer");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PeerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl PeerFetcher for HttpFetcher {
    async fn fetch(&self, group: &str, key: &str) -> anyhow::Result<Vec<u8>> {
        Ok(self.get(group, key).await?)
    }
}
