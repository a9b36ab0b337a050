//! Stored values with optional expiry.

use std::collections::BTreeSet;

use crate::cache::current_timestamp_ms;

/// What a key holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Set(BTreeSet<String>),
}

// == Stored Value ==
/// A value in the local store.
#[derive(Debug, Clone)]
pub struct StoredValue {
    pub value: Value,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl StoredValue {
    /// A string expiring `ex_seconds` from now.
    pub fn string(value: String, ex_seconds: u64) -> Self {
        Self {
            value: Value::Str(value),
            expires_at: Some(
                current_timestamp_ms().saturating_add(ex_seconds.saturating_mul(1000)),
            ),
        }
    }

    /// An empty set with no expiry.
    pub fn empty_set() -> Self {
        Self {
            value: Value::Set(BTreeSet::new()),
            expires_at: None,
        }
    }

    /// Expired once the current time reaches the expiration time.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }
}
