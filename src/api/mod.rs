//! API Module
//!
//! HTTP handlers and routing for the local store.
//!
//! # Endpoints
//! - `POST /ping` - Liveness check
//! - `GET /get/:key` - Read a string value
//! - `POST /setex` - Write a string value with expiry
//! - `POST /del` - Delete keys
//! - `POST /sadd` - Add members to a set
//! - `GET /smembers/:key` - Read a set
//! - `GET /stats` - Store counters
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
