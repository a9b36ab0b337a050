//! Cache Entry Module
//!
//! Defines the envelope written to the store around every cached value.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

// == Cache Entry ==
/// A cached value plus the metadata needed for client-side expiry.
///
/// Serialized as `{"data":..,"timestamp":..,"ttl":..,"tags":[..]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The stored value
    pub data: T,
    /// Creation timestamp (Unix milliseconds)
    pub timestamp: u64,
    /// Lifetime in seconds, None = no client-side expiry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
    /// Grouping labels used for bulk invalidation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Wraps `data` created at `timestamp` with the given lifetime and tags.
    pub fn new(data: T, timestamp: u64, ttl: u64, tags: Option<Vec<String>>) -> Self {
        Self {
            data,
            timestamp,
            ttl: Some(ttl),
            tags: tags.filter(|t| !t.is_empty()),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// An entry is expired once strictly more than `ttl` seconds have passed
    /// since creation. A missing or zero TTL never expires here; the store's
    /// own expiry still applies.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        match self.ttl {
            Some(ttl) if ttl > 0 => {
                now_ms.saturating_sub(self.timestamp) > ttl.saturating_mul(1000)
            }
            _ => false,
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// A clock set before the epoch reads as 0.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
