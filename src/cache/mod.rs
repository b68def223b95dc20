//! Cache Module
//!
//! Provides in-memory string caching with absolute deadlines and lazy expiration.

mod entry;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::Cache;
