//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with an optional deadline.

use chrono::{DateTime, Utc};

// == Cache Entry ==
/// Represents a single cache entry: a value and the instant it stops being valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Absolute expiration deadline, None = no expiration
    pub expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    // == Constructors ==
    /// Creates an entry that never expires.
    pub fn new(value: String) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    /// Creates an entry that expires once `deadline` has passed.
    pub fn with_deadline(value: String, deadline: DateTime<Utc>) -> Self {
        Self {
            value,
            expires_at: Some(deadline),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired relative to the current time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Checks if the entry has expired relative to `now`.
    ///
    /// Boundary condition: the deadline must be strictly before `now`. An entry
    /// whose deadline equals `now` is still live.
    ///
    /// # Returns
    /// - `true` if the entry has a deadline and it lies before `now`
    /// - `false` if the entry has no deadline or the deadline hasn't passed
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(deadline) => deadline < now,
            None => false,
        }
    }
}
