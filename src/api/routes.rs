//! API Routes
//!
//! Configures the Axum router with all node endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{api_handler, health_handler, peer_handler, stats_handler, AppState};
use crate::peer::PEER_BASE_PATH;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /_groupcache/:group/:key` - Peer endpoint (octet-stream)
/// - `GET /api/:group/:key` - Client lookup (JSON)
/// - `GET /stats/:group` - Group statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let peer_route = format!("{}:group/:key", PEER_BASE_PATH);

    Router::new()
        .route(&peer_route, get(peer_handler))
        .route("/api/:group/:key", get(api_handler))
        .route("/stats/:group", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
