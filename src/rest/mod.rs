//! REST Store Module
//!
//! HTTP client for the remote key-value store consumed by the cache.
//!
//! # Endpoints used
//! - `POST /ping` - Liveness check
//! - `GET /get/{key}` - Read a string value
//! - `POST /setex` - Write a string value with expiry
//! - `POST /del` - Delete keys
//! - `POST /sadd` - Add members to a set
//! - `GET /smembers/{key}` - Read a set

mod client;

pub use client::RestStore;
