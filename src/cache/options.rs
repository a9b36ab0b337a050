//! Per-call options for writes.

/// Options accepted by `set`, `mset`, `increment` and `get_or_set`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheOptions {
    /// TTL in seconds; None or 0 falls back to the configured default
    pub ttl: Option<u64>,
    /// Key namespace; None falls back to the configured prefix
    pub key_prefix: Option<String>,
    /// Tags the written keys are indexed under
    pub tags: Vec<String>,
}

impl CacheOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ttl(mut self, ttl: u64) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Effective TTL given the cache default.
    pub fn effective_ttl(&self, default_ttl: u64) -> u64 {
        self.ttl.filter(|ttl| *ttl > 0).unwrap_or(default_ttl)
    }

    pub(crate) fn tags_for_entry(&self) -> Option<Vec<String>> {
        (!self.tags.is_empty()).then(|| self.tags.clone())
    }
}
