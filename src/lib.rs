//! Tailoc Cache - tagged TTL caching over a REST key-value store
//!
//! `TaggedCache` wraps a hosted REST store (Upstash-style commands) with
//! TTL envelopes, tag-based invalidation and hit/miss statistics, and fails
//! open to "no caching" when the store is unavailable. The `api` and `store`
//! modules provide an in-memory server speaking the same commands.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod rest;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheOptions, CacheStats, TaggedCache};
pub use config::{CacheConfig, StoreConfig};
pub use tasks::spawn_cleanup_task;
