//! Request DTOs for the store REST contract
//!
//! Serialized by the cache client, deserialized by the local store.

use serde::{Deserialize, Serialize};

/// Body of `POST /setex`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetexRequest {
    /// Physical key
    pub key: String,
    /// Expiry in seconds
    pub ex: u64,
    /// Serialized cache envelope
    pub value: String,
}

impl SetexRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.ex == 0 {
            return Some("Expiry must be a positive number of seconds".to_string());
        }
        None
    }
}

/// Body of `POST /del`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelRequest {
    pub keys: Vec<String>,
}

/// Body of `POST /sadd`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaddRequest {
    /// Set key
    pub key: String,
    /// Members to add
    pub members: Vec<String>,
}

impl SaddRequest {
    /// Validates the request data
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.members.is_empty() {
            return Some("At least one member is required".to_string());
        }
        None
    }
}
