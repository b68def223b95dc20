//! Shell Replies
//!
//! JSON shapes written back for each executed command.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::CacheStats;

/// Reply to `put`, `puttill` and `putfor`
#[derive(Debug, Clone, Serialize)]
pub struct StoredReply {
    /// The key that was written
    pub stored: String,
    /// Deadline of the new entry, null when it never expires
    pub expires_at: Option<DateTime<Utc>>,
}

/// Reply to `get`; `value` is null when the key is absent or expired
#[derive(Debug, Clone, Serialize)]
pub struct ValueReply {
    pub key: String,
    pub value: Option<String>,
}

/// Reply to `keys`
#[derive(Debug, Clone, Serialize)]
pub struct KeysReply {
    pub keys: Vec<String>,
}

impl KeysReply {
    /// Creates a KeysReply with keys sorted for stable display
    pub fn new(mut keys: Vec<String>) -> Self {
        keys.sort();
        Self { keys }
    }
}

/// Reply to `stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsReply {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsReply {
    fn from(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Self { stats, hit_rate }
    }
}

/// Reply for a line that could not be parsed
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReply {
    pub error: String,
}

/// Any reply the shell writes as a JSON line.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Stored(StoredReply),
    Value(ValueReply),
    Keys(KeysReply),
    Stats(StatsReply),
    Error(ErrorReply),
}

impl Reply {
    /// Wraps any displayable error as an error reply
    pub fn error(error: impl ToString) -> Self {
        Reply::Error(ErrorReply {
            error: error.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_stored_reply_serialize() {
        let deadline = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let reply = Reply::Stored(StoredReply {
            stored: "key1".to_string(),
            expires_at: Some(deadline),
        });

        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(value, json!({"stored": "key1", "expires_at": "2030-01-01T00:00:00Z"}));
    }

    #[test]
    fn test_value_reply_absent_is_null() {
        let reply = Reply::Value(ValueReply {
            key: "missing".to_string(),
            value: None,
        });

        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(value, json!({"key": "missing", "value": null}));
    }

    #[test]
    fn test_keys_reply_sorted() {
        let reply = KeysReply::new(vec!["b".to_string(), "c".to_string(), "a".to_string()]);
        assert_eq!(reply.keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_stats_reply_flattens_counters() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();

        let value = serde_json::to_value(Reply::Stats(stats.into())).unwrap();
        assert_eq!(value["hits"], 1);
        assert_eq!(value["misses"], 1);
        assert_eq!(value["hit_rate"], 0.5);
    }

    #[test]
    fn test_error_reply_serialize() {
        let json = serde_json::to_string(&Reply::error("Something went wrong")).unwrap();
        assert_eq!(json, r#"{"error":"Something went wrong"}"#);
    }
}
