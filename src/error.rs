//! Error types for the cache client and the local store
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Failures talking to the remote store.
///
/// These never escape the public `TaggedCache` API; they are logged and
/// turned into misses or no-ops.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Network or timeout failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Store answered with a non-success status
    #[error("Store API error: {status} {reason}")]
    Status { status: u16, reason: String },

    /// Stored payload or reply body was not valid JSON of the expected shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reply was well-formed but not the expected acknowledgement
    #[error("Unexpected reply: {0}")]
    UnexpectedReply(String),
}

impl CacheError {
    /// True when the store rejected the request (status >= 400).
    pub fn is_rejection(&self) -> bool {
        matches!(self, CacheError::Status { status, .. } if *status >= 400)
    }
}

/// Convenience Result type for cache internals.
pub type Result<T> = std::result::Result<T, CacheError>;

// == Store Error Enum ==
/// Errors returned by the local store's HTTP API.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Missing or wrong bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// Operation against a key holding the wrong kind of value
    #[error("WRONGTYPE Operation against a key holding the wrong kind of value")]
    WrongType,

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            StoreError::Unauthorized => StatusCode::UNAUTHORIZED,
            StoreError::WrongType => StatusCode::BAD_REQUEST,
            StoreError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            StoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_threshold() {
        let rejected = CacheError::Status {
            status: 401,
            reason: "Unauthorized".to_string(),
        };
        let redirect = CacheError::Status {
            status: 304,
            reason: "Not Modified".to_string(),
        };
        assert!(rejected.is_rejection());
        assert!(!redirect.is_rejection());
        assert!(!CacheError::UnexpectedReply("\"PANG\"".to_string()).is_rejection());
    }

    #[test]
    fn test_store_error_status_codes() {
        assert_eq!(
            StoreError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            StoreError::WrongType.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            StoreError::Internal("boom".to_string())
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
