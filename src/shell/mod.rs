//! Shell Module
//!
//! A line-oriented command interface over an `LruCache<String>`.
//!
//! # Commands
//! - `set <key> <value>` - Store a value
//! - `get <key>` - Read a value and mark it recently used
//! - `peek <key>` - Read a value without reordering
//! - `del <key>` - Remove a key
//! - `evict` - Drop the least recently used entry
//! - `clear` - Drop every entry
//! - `keys` - List keys, most recently used first
//! - `stats` - Show counters

pub mod command;
pub mod response;

pub use command::Command;
pub use response::{EvictEvent, Response, StatsResponse};

use crate::cache::LruCache;

/// Runs one command against the cache.
pub fn execute(cache: &mut LruCache<String>, command: Command) -> Response {
    match command {
        Command::Set { key, value } => {
            let value = cache.set(&key, value).clone();
            Response::Stored { key, value }
        }
        Command::Get { key } => {
            let value = cache.get(&key).cloned();
            Response::Value { key, value }
        }
        Command::Peek { key } => {
            let value = cache.peek(&key).cloned();
            Response::Value { key, value }
        }
        Command::Remove { key } => {
            let value = cache.remove(&key);
            Response::Removed { key, value }
        }
        Command::Evict => {
            cache.evict();
            Response::Ok
        }
        Command::Clear => {
            cache.clear();
            Response::Ok
        }
        Command::Keys => Response::Keys {
            keys: cache.keys_by_recency().map(str::to_string).collect(),
        },
        Command::Stats => Response::Stats(cache.stats().into()),
    }
}

/// Parses and runs one input line, turning parse failures into an error
/// response.
pub fn handle_line(cache: &mut LruCache<String>, line: &str) -> Response {
    match line.parse::<Command>() {
        Ok(command) => execute(cache, command),
        Err(e) => Response::error(e.to_string()),
    }
}
