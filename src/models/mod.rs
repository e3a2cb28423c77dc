//! Response models for the HTTP API
//!
//! DTOs serialized into JSON response bodies.

pub mod responses;

// Re-export commonly used types
pub use responses::{ErrorResponse, GetResponse, HealthResponse, StatsResponse};
