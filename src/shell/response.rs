//! Shell Responses
//!
//! JSON-serializable results written back for each command, plus the line
//! format for eviction events.

use serde::Serialize;

use crate::cache::{CacheStats, Eviction, EvictionReason};

/// Outcome of one shell command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Response {
    /// `get`/`peek` result, `value` is null when absent or expired
    Value { key: String, value: Option<String> },
    /// `set` result
    Stored { key: String, value: String },
    /// `del` result, `value` is null when the key was not present
    Removed { key: String, value: Option<String> },
    /// `evict`/`clear` completed
    Ok,
    /// Resident keys, most recently used first
    Keys { keys: Vec<String> },
    Stats(StatsResponse),
    Error { message: String },
}

impl Response {
    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            message: message.into(),
        }
    }
}

/// Statistics with the derived hit rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_entries: usize,
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// An eviction as printed by the shell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvictEvent {
    /// Always `"evict"`
    pub event: &'static str,
    pub key: String,
    pub value: String,
    pub reason: EvictionReason,
}

impl From<Eviction<String>> for EvictEvent {
    fn from(eviction: Eviction<String>) -> Self {
        Self {
            event: "evict",
            key: eviction.key,
            value: eviction.value,
            reason: eviction.reason,
        }
    }
}
