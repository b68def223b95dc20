//! Shared Cache Handle
//!
//! A cloneable, lock-protected wrapper for using one cache from many tasks.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::cache::{Cache, CacheStats};

// == Shared Cache ==
/// Thread-safe handle to a [`Cache`].
///
/// Clones point at the same underlying cache. Each operation holds the lock
/// for its whole duration, so operations are atomic with respect to one
/// another. Reads take the write lock because they may evict.
#[derive(Debug, Clone, Default)]
pub struct SharedCache {
    inner: Arc<RwLock<Cache>>,
}

impl SharedCache {
    // == Constructors ==
    /// Creates a handle to a new, empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing cache.
    pub fn from_cache(cache: Cache) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }

    // == Put ==
    /// Stores a value that never expires. See [`Cache::put`].
    pub async fn put(&self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.write().await.put(key, value);
    }

    // == Put Till ==
    /// Stores a value until `deadline`. See [`Cache::put_till`].
    pub async fn put_till(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
        deadline: DateTime<Utc>,
    ) {
        self.inner.write().await.put_till(key, value, deadline);
    }

    // == Put For ==
    /// Stores a value for `ttl` and returns the deadline set. See [`Cache::put_for`].
    pub async fn put_for(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
        ttl: Duration,
    ) -> Option<DateTime<Utc>> {
        self.inner.write().await.put_for(key, value, ttl)
    }

    // == Get ==
    /// Retrieves a live value, evicting it if expired. See [`Cache::get`].
    pub async fn get(&self, key: &str) -> Option<String> {
        self.inner.write().await.get(key)
    }

    // == Keys ==
    /// Lists live keys, evicting expired entries. See [`Cache::keys`].
    pub async fn keys(&self) -> Vec<String> {
        self.inner.write().await.keys()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    // == Length ==
    /// Number of entries physically held, expired or not.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries at all.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
