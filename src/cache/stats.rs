//! Cache Statistics Module
//!
//! Tracks hit/miss counters for one cache instance.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Placeholder reported for memory usage; the REST store does not expose it.
pub const MEMORY_USAGE_UNAVAILABLE: &str = "N/A";

// == Counters ==
/// Live counters, updated through `&self` from concurrent lookups.
#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    total_requests: AtomicU64,
}

impl StatsCounters {
    pub fn record_request(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.total_requests.store(0, Ordering::Relaxed);
    }

    pub fn snapshot(&self, connected: bool) -> CacheStats {
        CacheStats::new(
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            self.total_requests.load(Ordering::Relaxed),
            connected,
        )
    }
}

// == Cache Stats ==
/// Point-in-time statistics, shaped for a health endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Lookups that returned a live value
    pub hits: u64,
    /// Lookups that found nothing, an expired entry, or failed
    pub misses: u64,
    /// Hit percentage rounded to two decimals
    pub hit_rate: f64,
    /// Lookups attempted while connected
    pub total_requests: u64,
    /// Not tracked; always 0
    pub keys_count: u64,
    /// Not tracked; always "N/A"
    pub memory_usage: String,
    /// Current connection flag
    pub connected: bool,
}

impl CacheStats {
    fn new(hits: u64, misses: u64, total_requests: u64, connected: bool) -> Self {
        Self {
            hits,
            misses,
            hit_rate: hit_rate_percent(hits, total_requests),
            total_requests,
            keys_count: 0,
            memory_usage: MEMORY_USAGE_UNAVAILABLE.to_string(),
            connected,
        }
    }
}

/// `hits / total * 100`, rounded to two decimals; 0 with no requests.
pub fn hit_rate_percent(hits: u64, total_requests: u64) -> f64 {
    if total_requests == 0 {
        return 0.0;
    }
    let rate = hits as f64 / total_requests as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}
