//! Response DTOs for the HTTP API
//!
//! Defines the structure of outgoing JSON bodies.

use serde::Serialize;

use crate::cache::{ByteView, CacheStats};
use crate::group::GroupStatsSnapshot;

/// Response body for GET /api/:group/:key
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub group: String,
    pub key: String,
    /// The value, decoded as UTF-8 (lossy)
    pub value: String,
}

impl GetResponse {
    pub fn new(group: impl Into<String>, key: impl Into<String>, value: &ByteView) -> Self {
        Self {
            group: group.into(),
            key: key.into(),
            value: value.to_string_lossy(),
        }
    }
}

/// Response body for GET /stats/:group
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub group: String,
    /// How requests were resolved
    pub requests: GroupStatsSnapshot,
    /// Local cache occupancy and counters
    pub cache: CacheStats,
    /// Local cache hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(group: impl Into<String>, requests: GroupStatsSnapshot, cache: CacheStats) -> Self {
        let hit_rate = cache.hit_rate();
        Self {
            group: group.into(),
            requests,
            cache,
            hit_rate,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
