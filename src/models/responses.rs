//! Response DTOs for the store REST contract
//!
//! Every store command answers `{ "result": ... }`; the local store adds
//! health and stats bodies for operators.

use serde::{Deserialize, Serialize};

/// Generic `{ "result": T }` reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply<T> {
    pub result: T,
}

impl<T> Reply<T> {
    pub fn new(result: T) -> Self {
        Self { result }
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

/// Response body for the local store stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatsResponse {
    /// Live string values
    pub strings: usize,
    /// Live sets
    pub sets: usize,
    /// Values removed by expiry since start
    pub expired: u64,
}
