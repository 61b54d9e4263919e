//! Shell Commands
//!
//! Parses one input line into a cache command.

use std::str::FromStr;

use crate::error::{CacheError, Result};

/// A single shell command.
///
/// # Syntax
/// - `set <key> <value...>` - the value is the rest of the line
/// - `get <key>` / `peek <key>` / `del <key>`
/// - `evict` / `clear` / `keys` / `stats`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { key: String, value: String },
    Get { key: String },
    Peek { key: String },
    Remove { key: String },
    Evict,
    Clear,
    Keys,
    Stats,
}

impl FromStr for Command {
    type Err = CacheError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name.to_ascii_lowercase().as_str() {
            "" => Err(CacheError::InvalidCommand("empty command".to_string())),
            "set" => {
                let (key, value) = rest.split_once(char::is_whitespace).ok_or_else(|| {
                    CacheError::InvalidCommand("usage: set <key> <value>".to_string())
                })?;
                Ok(Command::Set {
                    key: key.to_string(),
                    value: value.trim().to_string(),
                })
            }
            "get" => Ok(Command::Get { key: single_key("get", rest)? }),
            "peek" => Ok(Command::Peek { key: single_key("peek", rest)? }),
            "del" | "remove" => Ok(Command::Remove { key: single_key("del", rest)? }),
            "evict" => no_args(Command::Evict, "evict", rest),
            "clear" => no_args(Command::Clear, "clear", rest),
            "keys" => no_args(Command::Keys, "keys", rest),
            "stats" => no_args(Command::Stats, "stats", rest),
            other => Err(CacheError::InvalidCommand(format!("unknown command '{other}'"))),
        }
    }
}

fn single_key(name: &str, rest: &str) -> Result<String> {
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        return Err(CacheError::InvalidCommand(format!("usage: {name} <key>")));
    }
    Ok(rest.to_string())
}

fn no_args(command: Command, name: &str, rest: &str) -> Result<Command> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(CacheError::InvalidCommand(format!("{name} takes no arguments")))
    }
}
