//! Cache Module
//!
//! Tagged TTL cache client over a REST key-value store.

mod client;
mod clock;
mod entry;
mod key;
mod options;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use client::TaggedCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{current_timestamp_ms, CacheEntry};
pub use key::{generate_key, key_from_object, tag_key, DIGEST_LEN};
pub use options::CacheOptions;
pub use stats::{hit_rate_percent, CacheStats};
