//! Local Store Module
//!
//! In-memory implementation of the REST store commands, served by `api`.

mod memory;
mod value;

pub use memory::{MemoryStore, StoreResult};
pub use value::{StoredValue, Value};
