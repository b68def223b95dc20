//! Deadline Cache - An in-process string key/value store
//!
//! Entries may carry an absolute expiration deadline. Expired entries are
//! evicted lazily, when a read touches them.

pub mod cache;
pub mod config;
pub mod error;
pub mod shell;

pub use cache::{Cache, CacheEntry, CacheStats, SharedCache};
pub use config::Config;
pub use shell::Session;
