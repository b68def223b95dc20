//! Cache Store Module
//!
//! Main cache engine: a HashMap of entries with deadline-based, lazy expiration.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats};

// == Cache ==
/// String key/value storage with optional per-entry deadlines.
///
/// Expired entries are never swept in the background. They stay in the map
/// until a [`Cache::get`] or [`Cache::keys`] call touches them, at which point
/// they are removed. Mutating operations take `&mut self`; wrap the cache in a
/// [`SharedCache`](crate::cache::SharedCache) to share it between tasks.
#[derive(Debug, Default)]
pub struct Cache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Lookup statistics
    stats: CacheStats,
}

impl Cache {
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    // == Put ==
    /// Stores a value that never expires.
    ///
    /// Any previous entry for `key` is replaced, including its deadline.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), CacheEntry::new(value.into()));
    }

    // == Put Till ==
    /// Stores a value that expires once `deadline` has passed.
    ///
    /// A deadline already in the past is accepted. The entry is then treated
    /// as absent by the next read, which also removes it.
    pub fn put_till(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        deadline: DateTime<Utc>,
    ) {
        self.entries
            .insert(key.into(), CacheEntry::with_deadline(value.into(), deadline));
    }

    // == Put For ==
    /// Stores a value that expires `ttl` from now.
    ///
    /// If `now + ttl` falls outside the representable range of timestamps the
    /// entry is stored without a deadline. Returns the deadline that was set.
    pub fn put_for(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        ttl: Duration,
    ) -> Option<DateTime<Utc>> {
        let deadline = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| Utc::now().checked_add_signed(ttl));

        match deadline {
            Some(deadline) => self.put_till(key, value, deadline),
            None => self.put(key, value),
        }
        deadline
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns `None` if the key was never written or its entry has expired.
    /// An expired entry is removed as a side effect.
    pub fn get(&mut self, key: &str) -> Option<String> {
        self.get_at(key, Utc::now())
    }

    /// Retrieves a value by key, judging expiration against `now`.
    pub fn get_at(&mut self, key: &str, now: DateTime<Utc>) -> Option<String> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired_at(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            debug!(key, "evicted expired entry on read");
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Keys ==
    /// Lists the keys of all live entries, in no particular order.
    ///
    /// Every expired entry encountered is removed.
    pub fn keys(&mut self) -> Vec<String> {
        self.keys_at(Utc::now())
    }

    /// Lists live keys, judging expiration against `now`.
    pub fn keys_at(&mut self, now: DateTime<Utc>) -> Vec<String> {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));

        let removed = before - self.entries.len();
        if removed > 0 {
            self.stats.record_expirations(removed);
            debug!(removed, "evicted expired entries while listing keys");
        }

        self.entries.keys().cloned().collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of entries physically held.
    ///
    /// Expired entries that no read has touched yet are still counted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries, expired or not.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
