//! API Module
//!
//! HTTP handlers and routing for a cache node.
//!
//! # Endpoints
//! - `GET /_groupcache/:group/:key` - Peer endpoint, raw value bytes
//! - `GET /api/:group/:key` - Client lookup, JSON body
//! - `GET /stats/:group` - Group and cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
