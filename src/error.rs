//! Error types for the group cache
//!
//! Provides unified error handling using thiserror. Request-level failures
//! (`CacheError`) are kept apart from construction-time misuse (`GroupError`)
//! and from peer transport failures (`PeerError`), which never reach callers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Errors returned from a group lookup.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Malformed request, e.g. an empty key
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No group registered under this name
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    /// The group's loader failed; its error is passed through unchanged
    #[error(transparent)]
    Load(anyhow::Error),
}

// == Group Error Enum ==
/// Misuse detected while building or wiring a group.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    #[error("group name must not be empty")]
    EmptyName,

    /// A peer picker may be attached to a group only once
    #[error("peers already registered for group '{group}'")]
    PeersAlreadyRegistered { group: String },
}

// == Peer Error Enum ==
/// Failures talking to a remote peer over HTTP.
#[derive(Error, Debug)]
pub enum PeerError {
    #[error("invalid peer url: {0}")]
    InvalidUrl(String),

    #[error("peer request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The peer answered with a non-success status
    #[error("peer returned {status}: {body}")]
    Status { status: u16, body: String },
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            CacheError::GroupNotFound(_) => StatusCode::NOT_FOUND,
            CacheError::Load(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for group lookups.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_is_transparent() {
        let err = CacheError::Load(anyhow::anyhow!("sam not exist"));
        assert_eq!(err.to_string(), "sam not exist");
    }

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (CacheError::InvalidArgument("key is required".into()), StatusCode::BAD_REQUEST),
            (CacheError::GroupNotFound("nope".into()), StatusCode::NOT_FOUND),
            (CacheError::Load(anyhow::anyhow!("boom")), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_group_error_messages() {
        let err = GroupError::PeersAlreadyRegistered {
            group: "scores".into(),
        };
        assert_eq!(err.to_string(), "peers already registered for group 'scores'");
        assert_eq!(GroupError::EmptyName.to_string(), "group name must not be empty");
    }
}
