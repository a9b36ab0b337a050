//! Request and Response models for the store REST contract
//!
//! Shared by the cache client (`rest`) and the local store (`api`).

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{DelRequest, SaddRequest, SetexRequest};
pub use responses::{HealthResponse, Reply, StoreStatsResponse};
