//! Error types for the cache crate
//!
//! Cache operations themselves never fail; these cover option parsing and the
//! command shell.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Construction options could not be parsed or were out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A shell line did not parse as a command
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, CacheError>;
