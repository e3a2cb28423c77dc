//! API Handlers
//!
//! HTTP request handlers for each node endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::error::{CacheError, Result};
use crate::group::{Group, GroupRegistry};
use crate::models::{GetResponse, HealthResponse, StatsResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Groups served by this node
    pub registry: Arc<GroupRegistry>,
}

impl AppState {
    pub fn new(registry: Arc<GroupRegistry>) -> Self {
        Self { registry }
    }

    fn group(&self, name: &str) -> Result<Arc<Group>> {
        self.registry
            .get_group(name)
            .ok_or_else(|| CacheError::GroupNotFound(name.to_string()))
    }
}

/// Handler for GET /_groupcache/:group/:key
///
/// Serves another node's delegated lookup with the raw value bytes.
pub async fn peer_handler(
    State(state): State<AppState>,
    Path((group, key)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let value = state.group(&group)?.get(&key).await?;

    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        value.to_vec(),
    ))
}

/// Handler for GET /api/:group/:key
pub async fn api_handler(
    State(state): State<AppState>,
    Path((group, key)): Path<(String, String)>,
) -> Result<Json<GetResponse>> {
    let value = state.group(&group)?.get(&key).await?;

    Ok(Json(GetResponse::new(group, key, &value)))
}

/// Handler for GET /stats/:group
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(group): Path<String>,
) -> Result<Json<StatsResponse>> {
    let found = state.group(&group)?;

    Ok(Json(StatsResponse::new(
        group,
        found.stats(),
        found.cache_stats(),
    )))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
