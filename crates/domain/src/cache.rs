//! Response cache side-state

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

/// One entry a handler placed in the response cache.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// The cache key.
    pub key: String,
    /// The cached value.
    pub value: Value,
    /// Relative lifetime, if one was set.
    pub duration: Option<Duration>,
    /// Absolute expiration, if one was set.
    pub absolute_expiration: Option<DateTime<Utc>>,
    /// Whether the lifetime slides on access.
    pub sliding: bool,
}

impl CacheEntry {
    /// Creates an entry with a key and value.
    #[must_use]
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
            duration: None,
            absolute_expiration: None,
            sliding: false,
        }
    }

    /// Sets the relative lifetime.
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Sets the absolute expiration.
    #[must_use]
    pub const fn with_absolute_expiration(mut self, at: DateTime<Utc>) -> Self {
        self.absolute_expiration = Some(at);
        self
    }

    /// Marks the lifetime as sliding.
    #[must_use]
    pub const fn sliding(mut self) -> Self {
        self.sliding = true;
        self
    }
}

/// Everything a handler cached during one invocation, keyed by entry key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseCache {
    entries: BTreeMap<String, CacheEntry>,
}

impl ResponseCache {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Inserts an entry, replacing any previous entry with the same key.
    pub fn insert(&mut self, entry: CacheEntry) {
        self.entries.insert(entry.key.clone(), entry);
    }

    /// Inserts an entry (builder pattern).
    #[must_use]
    pub fn with(mut self, entry: CacheEntry) -> Self {
        self.insert(entry);
        self
    }

    /// Inserts a bare key/value entry (builder pattern).
    #[must_use]
    pub fn with_value(self, key: impl Into<String>, value: Value) -> Self {
        self.with(CacheEntry::new(key, value))
    }

    /// Returns the entry for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = &CacheEntry> {
        self.entries.values()
    }
}
