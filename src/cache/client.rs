//! Tagged TTL Cache Client
//!
//! Best-effort cache over the REST store: TTL envelopes checked lazily on
//! read, tag sets for bulk invalidation, hit/miss statistics. Store failures
//! are logged and degrade to misses; they never reach the caller.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::cache::clock::{Clock, SystemClock};
use crate::cache::entry::CacheEntry;
use crate::cache::key::{generate_key, key_from_object, tag_key};
use crate::cache::options::CacheOptions;
use crate::cache::stats::{CacheStats, StatsCounters};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::rest::RestStore;

// == Tagged Cache ==
/// Cache client bound to one store.
///
/// Starts disabled when credentials are missing or the initial ping fails.
/// A store rejection (status >= 400) disables it again; only a successful
/// [`ping`](Self::ping) re-enables it.
#[derive(Debug)]
pub struct TaggedCache {
    /// Store transport, None when unconfigured
    store: Option<RestStore>,
    /// Connection flag checked before every call
    connected: AtomicBool,
    /// Hit/miss counters
    stats: StatsCounters,
    /// TTL in seconds used when options give none
    default_ttl: u64,
    /// Namespace used when callers give no prefix
    key_prefix: String,
    /// Time source for envelopes and expiry
    clock: Arc<dyn Clock>,
}

impl TaggedCache {
    // == Constructors ==
    /// Builds the cache from `config` and pings the store once.
    ///
    /// Never fails: any problem leaves the cache disabled and is logged.
    pub async fn new(config: CacheConfig) -> Self {
        let Some((url, token)) = config.credentials() else {
            warn!("Store credentials not configured, cache will be disabled");
            return Self::build(None, &config);
        };

        let store = match RestStore::new(url, token, config.request_timeout) {
            Ok(store) => store,
            Err(e) => {
                error!(error = %e, "Failed to build store client, cache will be disabled");
                return Self::build(None, &config);
            }
        };

        let cache = Self::build(Some(store), &config);
        cache.initialize().await;
        cache
    }

    /// A cache that never talks to a store.
    pub fn disabled() -> Self {
        Self::build(None, &CacheConfig::default())
    }

    /// Replaces the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn build(store: Option<RestStore>, config: &CacheConfig) -> Self {
        Self {
            store,
            connected: AtomicBool::new(false),
            stats: StatsCounters::default(),
            default_ttl: config.default_ttl,
            key_prefix: config.key_prefix.clone(),
            clock: Arc::new(SystemClock),
        }
    }

    async fn initialize(&self) {
        let Some(store) = &self.store else { return };

        match store.ping().await {
            Ok(()) => {
                self.connected.store(true, Ordering::SeqCst);
                info!(url = store.base_url(), "Cache store connected");
            }
            Err(e) => {
                error!(error = %e, "Failed to initialize cache store");
            }
        }
    }

    // == Keys ==
    /// Physical key for `key` under `prefix` (or the configured prefix).
    pub fn generate_key(&self, key: &str, prefix: Option<&str>) -> String {
        generate_key(key, prefix.unwrap_or(&self.key_prefix))
    }

    /// Physical key for a structured value, independent of field order.
    pub fn key_from_object<T: Serialize + ?Sized>(&self, value: &T, prefix: Option<&str>) -> String {
        key_from_object(value, prefix.unwrap_or(&self.key_prefix))
    }

    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    // == Get ==
    /// Returns the live value stored under `key`, or None.
    ///
    /// Expired entries are deleted (best-effort) and count as misses.
    /// While disabled nothing is counted.
    pub async fn get<T: DeserializeOwned>(&self, key: &str, prefix: Option<&str>) -> Option<T> {
        let store = self.live_store()?;
        self.stats.record_request();

        match self.try_get(store, key, prefix).await {
            Ok(Some(value)) => {
                self.stats.record_hit();
                Some(value)
            }
            Ok(None) => {
                self.stats.record_miss();
                None
            }
            Err(e) => {
                error!(key, error = %e, "Cache get error");
                self.stats.record_miss();
                None
            }
        }
    }

    async fn try_get<T: DeserializeOwned>(
        &self,
        store: &RestStore,
        key: &str,
        prefix: Option<&str>,
    ) -> Result<Option<T>> {
        let cache_key = self.generate_key(key, prefix);
        let Some(raw) = self.observe(store.get(&cache_key).await)? else {
            return Ok(None);
        };

        let entry: CacheEntry<T> = serde_json::from_str(&raw)?;
        if entry.is_expired_at(self.clock.now_ms()) {
            if let Err(e) = self.observe(store.del(&[cache_key]).await) {
                debug!(key, error = %e, "Failed to delete expired entry");
            }
            return Ok(None);
        }

        Ok(Some(entry.data))
    }

    // == Set ==
    /// Stores `value` under `key`; true once the store acknowledges.
    ///
    /// Tag indexing happens after the write and its failures are logged
    /// without failing the call.
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        options: &CacheOptions,
    ) -> bool {
        let Some(store) = self.live_store() else {
            return false;
        };

        match self.try_set(store, key, value, options).await {
            Ok(stored) => stored,
            Err(e) => {
                error!(key, error = %e, "Cache set error");
                false
            }
        }
    }

    async fn try_set<T: Serialize + ?Sized>(
        &self,
        store: &RestStore,
        key: &str,
        value: &T,
        options: &CacheOptions,
    ) -> Result<bool> {
        let cache_key = self.generate_key(key, options.key_prefix.as_deref());
        let ttl = options.effective_ttl(self.default_ttl);
        let entry = CacheEntry::new(value, self.clock.now_ms(), ttl, options.tags_for_entry());
        let payload = serde_json::to_string(&entry)?;

        if !self.observe(store.setex(&cache_key, ttl, payload).await)? {
            warn!(key, "Store did not acknowledge write");
            return Ok(false);
        }

        self.index_tags(store, &cache_key, &options.tags).await;
        Ok(true)
    }

    async fn index_tags(&self, store: &RestStore, cache_key: &str, tags: &[String]) {
        let member = [cache_key.to_string()];
        for tag in tags {
            if let Err(e) = self.observe(store.sadd(&tag_key(tag), &member).await) {
                warn!(tag = %tag, error = %e, "Failed to index cache key under tag");
            }
        }
    }

    // == Delete ==
    /// Removes `key`; true if the store actually deleted something.
    ///
    /// Tag sets that still list the key are left alone.
    pub async fn del(&self, key: &str, prefix: Option<&str>) -> bool {
        let Some(store) = self.live_store() else {
            return false;
        };

        let cache_key = self.generate_key(key, prefix);
        match self.observe(store.del(&[cache_key]).await) {
            Ok(removed) => removed > 0,
            Err(e) => {
                error!(key, error = %e, "Cache delete error");
                false
            }
        }
    }

    // == Invalidate By Tags ==
    /// Deletes every key indexed under each tag, then the tag sets.
    ///
    /// Returns the number of cache entries the store reported deleted. A tag
    /// that fails is logged and skipped.
    pub async fn invalidate_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> u64 {
        let mut total = 0;

        for tag in tags {
            let tag = tag.as_ref();
            let Some(store) = self.live_store() else {
                break;
            };

            match self.invalidate_tag(store, tag).await {
                Ok(count) => total += count,
                Err(e) => error!(tag, error = %e, "Cache invalidation error"),
            }
        }

        if total > 0 {
            info!(total, "Invalidated cache entries by tag");
        }
        total
    }

    async fn invalidate_tag(&self, store: &RestStore, tag: &str) -> Result<u64> {
        let index_key = tag_key(tag);
        let members = self.observe(store.smembers(&index_key).await)?;
        if members.is_empty() {
            return Ok(0);
        }

        let removed = self.observe(store.del(&members).await)?;
        self.observe(store.del(&[index_key]).await)?;
        Ok(removed)
    }

    // == Get Or Set ==
    /// Cache-aside: returns the cached value or computes, stores and returns
    /// it. Factory errors are returned unchanged and nothing is cached.
    pub async fn get_or_set<T, E, F, Fut>(
        &self,
        key: &str,
        factory: F,
        options: &CacheOptions,
    ) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        if let Some(cached) = self.get(key, options.key_prefix.as_deref()).await {
            return Ok(cached);
        }

        let value = factory().await?;
        self.set(key, &value, options).await;
        Ok(value)
    }

    // == Multi Get ==
    /// One lookup per key, issued concurrently. Results keep input order.
    pub async fn mget<T, S>(&self, keys: &[S], prefix: Option<&str>) -> Vec<Option<T>>
    where
        T: DeserializeOwned,
        S: AsRef<str>,
    {
        join_all(keys.iter().map(|key| self.get(key.as_ref(), prefix))).await
    }

    // == Multi Set ==
    /// Writes pairs one after another with shared options.
    ///
    /// Stops at the first failed write and returns false; earlier writes
    /// stay in place.
    pub async fn mset<K, T>(&self, pairs: &[(K, T)], options: &CacheOptions) -> bool
    where
        K: AsRef<str>,
        T: Serialize,
    {
        let Some(store) = self.live_store() else {
            return false;
        };

        for (key, value) in pairs {
            let key = key.as_ref();
            match self.try_set(store, key, value, options).await {
                Ok(true) => {}
                Ok(false) => return false,
                Err(e) => {
                    error!(key, error = %e, "Cache mset error");
                    return false;
                }
            }
        }
        true
    }

    // == Increment ==
    /// Adds `amount` to the counter under `key` and returns the new value.
    ///
    /// Missing, expired or malformed entries count as 0. If the write fails
    /// the previous value is returned. Returns 0 while disabled.
    pub async fn increment(&self, key: &str, amount: i64, options: &CacheOptions) -> i64 {
        let Some(store) = self.live_store() else {
            return 0;
        };

        let current = self
            .read_counter(store, key, options.key_prefix.as_deref())
            .await
            .unwrap_or_else(|e| {
                debug!(key, error = %e, "Counter read failed, starting from 0");
                0
            });
        let next = current.saturating_add(amount);

        match self.try_set(store, key, &next, options).await {
            Ok(true) => next,
            Ok(false) => current,
            Err(e) => {
                error!(key, error = %e, "Cache increment error");
                current
            }
        }
    }

    async fn read_counter(&self, store: &RestStore, key: &str, prefix: Option<&str>) -> Result<i64> {
        let cache_key = self.generate_key(key, prefix);
        let Some(raw) = self.observe(store.get(&cache_key).await)? else {
            return Ok(0);
        };

        let entry: CacheEntry<serde_json::Value> = serde_json::from_str(&raw)?;
        if entry.is_expired_at(self.clock.now_ms()) {
            return Ok(0);
        }
        Ok(entry.data.as_i64().unwrap_or(0))
    }

    // == Stats ==
    pub fn get_stats(&self) -> CacheStats {
        self.stats.snapshot(self.is_healthy())
    }

    /// Zeroes counters; connection and stored entries are untouched.
    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    // == Health ==
    /// Current connection flag, without probing.
    pub fn is_healthy(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Probes the store now.
    ///
    /// Success marks the cache connected again; any failure disables it.
    /// Always false when no store is configured.
    pub async fn ping(&self) -> bool {
        let Some(store) = &self.store else {
            return false;
        };

        match self.observe(store.ping().await) {
            Ok(()) => {
                if !self.connected.swap(true, Ordering::SeqCst) {
                    info!("Cache store reachable again, cache re-enabled");
                }
                true
            }
            Err(e) => {
                warn!(error = %e, "Cache store ping failed");
                self.connected.store(false, Ordering::SeqCst);
                false
            }
        }
    }

    // == Internals ==
    fn live_store(&self) -> Option<&RestStore> {
        self.store.as_ref().filter(|_| self.is_healthy())
    }

    /// Disables the cache when the store rejected a request.
    fn observe<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            if e.is_rejection() && self.connected.swap(false, Ordering::SeqCst) {
                warn!(error = %e, "Store rejected request, cache disabled");
            }
        }
        result
    }
}
