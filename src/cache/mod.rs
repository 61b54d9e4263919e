//! Cache Module
//!
//! Provides a bounded in-memory cache with LRU eviction, lazy TTL expiration
//! and eviction notifications.

mod entry;
mod eviction;
mod lru;
mod stats;
mod store;


// Re-export public types
pub(crate) use entry::Entry;
pub use eviction::{Eviction, EvictionReason};
pub(crate) use eviction::EvictionListener;
pub(crate) use lru::LruList;
pub use stats::CacheStats;
pub use store::LruCache;
