//! Recency Cache - A bounded in-process LRU cache
//!
//! Provides O(1) lookup with least-recently-used eviction, optional lazy TTL
//! expiration, and synchronous eviction notifications.

pub mod cache;
pub mod config;
pub mod error;
pub mod shell;

pub use cache::{CacheStats, Eviction, EvictionReason, LruCache};
pub use config::CacheOptions;
pub use error::{CacheError, Result};
