//! Background Tasks Module
//!
//! # Tasks
//! - Expiry sweep: removes expired values from the local store

mod cleanup;

pub use cleanup::spawn_cleanup_task;
