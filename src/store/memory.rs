//! In-memory backing for the local store.
//!
//! String values with expiry plus string sets, with the command semantics
//! the cache client relies on.

use std::collections::HashMap;

use crate::error::StoreError;
use crate::store::value::{StoredValue, Value};

/// Result type for store commands.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Memory Store ==
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, StoredValue>,
    /// Values removed because they expired
    expired: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// String value under `key`. Expired values are removed on access.
    pub fn get(&mut self, key: &str) -> StoreResult<Option<String>> {
        match self.live(key) {
            Some(StoredValue {
                value: Value::Str(s),
                ..
            }) => Ok(Some(s.clone())),
            Some(_) => Err(StoreError::WrongType),
            None => Ok(None),
        }
    }

    // == Set With Expiry ==
    /// Stores a string expiring after `ex` seconds, replacing any value.
    pub fn setex(&mut self, key: String, ex: u64, value: String) -> StoreResult<()> {
        if ex == 0 {
            return Err(StoreError::InvalidRequest(
                "invalid expire time in 'setex' command".to_string(),
            ));
        }
        self.entries.insert(key, StoredValue::string(value, ex));
        Ok(())
    }

    // == Delete ==
    /// Removes keys; returns how many live keys were removed.
    pub fn del(&mut self, keys: &[String]) -> u64 {
        let mut removed = 0;
        for key in keys {
            if let Some(stored) = self.entries.remove(key) {
                if stored.is_expired() {
                    self.expired += 1;
                } else {
                    removed += 1;
                }
            }
        }
        removed
    }

    // == Set Add ==
    /// Adds members to the set at `key`, creating it; returns how many were new.
    pub fn sadd(&mut self, key: &str, members: &[String]) -> StoreResult<u64> {
        if self.live(key).is_none() {
            self.entries.insert(key.to_string(), StoredValue::empty_set());
        }

        match self.entries.get_mut(key).map(|stored| &mut stored.value) {
            Some(Value::Set(set)) => Ok(members
                .iter()
                .filter(|member| set.insert((*member).clone()))
                .count() as u64),
            Some(Value::Str(_)) => Err(StoreError::WrongType),
            None => Err(StoreError::Internal("set vanished after insert".to_string())),
        }
    }

    // == Set Members ==
    /// Members of the set at `key` in sorted order; empty if absent.
    pub fn smembers(&mut self, key: &str) -> StoreResult<Vec<String>> {
        match self.live(key) {
            Some(StoredValue {
                value: Value::Set(set),
                ..
            }) => Ok(set.iter().cloned().collect()),
            Some(_) => Err(StoreError::WrongType),
            None => Ok(Vec::new()),
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired values.
    ///
    /// Returns the number of values removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, stored| !stored.is_expired());
        let removed = before - self.entries.len();
        self.expired += removed as u64;
        removed
    }

    // == Counters ==
    /// (strings, sets) currently held, expired or not.
    pub fn counts(&self) -> (usize, usize) {
        self.entries
            .values()
            .fold((0, 0), |(strings, sets), stored| match stored.value {
                Value::Str(_) => (strings + 1, sets),
                Value::Set(_) => (strings, sets + 1),
            })
    }

    pub fn expired_count(&self) -> u64 {
        self.expired
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Live value at `key`, dropping it first if expired.
    fn live(&mut self, key: &str) -> Option<&StoredValue> {
        if self.entries.get(key).is_some_and(StoredValue::is_expired) {
            self.entries.remove(key);
            self.expired += 1;
        }
        self.entries.get(key)
    }
}
