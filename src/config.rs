//! Configuration Module
//!
//! Construction options for the cache, loadable from JSON or the environment.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

/// Capacity used when none is given.
pub const DEFAULT_MAX: usize = 1000;

/// Cache construction options.
///
/// Deserializes from either a bare capacity (`500`) or an object
/// (`{"max": 500, "ttl": 60000}`); missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawOptions")]
pub struct CacheOptions {
    /// Maximum number of entries the cache can hold
    pub max: usize,
    /// Entry lifetime in milliseconds, 0 disables expiry
    pub ttl: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOptions {
    Capacity(usize),
    Config {
        #[serde(default = "default_max")]
        max: usize,
        #[serde(default)]
        ttl: u64,
    },
}

fn default_max() -> usize {
    DEFAULT_MAX
}

impl From<RawOptions> for CacheOptions {
    fn from(raw: RawOptions) -> Self {
        match raw {
            RawOptions::Capacity(max) => Self { max, ttl: 0 },
            RawOptions::Config { max, ttl } => Self { max, ttl },
        }
    }
}

impl CacheOptions {
    /// Creates options with the given capacity and TTL in milliseconds.
    pub fn new(max: usize, ttl: u64) -> Self {
        Self { max, ttl }
    }

    /// Loads options from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX` - Maximum cache entries (default: 1000)
    /// - `CACHE_TTL_MS` - Entry lifetime in milliseconds (default: 0, disabled)
    pub fn from_env() -> Self {
        Self {
            max: env::var("CACHE_MAX")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX),
            ttl: env::var("CACHE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }

    /// Parses options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self =
            serde_json::from_str(json).map_err(|e| CacheError::InvalidConfig(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Rejects a zero capacity.
    pub fn validate(&self) -> Result<()> {
        if self.max == 0 {
            return Err(CacheError::InvalidConfig(
                "max must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// The TTL as a duration, `None` when expiry is disabled.
    pub fn ttl_duration(&self) -> Option<Duration> {
        (self.ttl > 0).then(|| Duration::from_millis(self.ttl))
    }
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            max: DEFAULT_MAX,
            ttl: 0,
        }
    }
}

impl From<usize> for CacheOptions {
    fn from(max: usize) -> Self {
        Self { max, ttl: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default() {
        let options = CacheOptions::default();
        assert_eq!(options.max, 1000);
        assert_eq!(options.ttl, 0);
        assert!(options.ttl_duration().is_none());
    }

    #[test]
    fn test_options_from_capacity() {
        let options = CacheOptions::from(25);
        assert_eq!(options, CacheOptions::new(25, 0));
    }

    #[test]
    fn test_ttl_duration() {
        let options = CacheOptions::new(10, 50);
        assert_eq!(options.ttl_duration(), Some(Duration::from_millis(50)));
    }

    #[test]
    fn test_deserialize_bare_number() {
        let options = CacheOptions::from_json("42").unwrap();
        assert_eq!(options, CacheOptions::new(42, 0));
    }

    #[test]
    fn test_deserialize_object() {
        let options = CacheOptions::from_json(r#"{"max": 10, "ttl": 500}"#).unwrap();
        assert_eq!(options, CacheOptions::new(10, 500));
    }

    #[test]
    fn test_deserialize_partial_object() {
        let options = CacheOptions::from_json(r#"{"ttl": 500}"#).unwrap();
        assert_eq!(options, CacheOptions::new(1000, 500));

        let options = CacheOptions::from_json("{}").unwrap();
        assert_eq!(options, CacheOptions::default());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = CacheOptions::from_json(r#"{"max": 0}"#);
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = CacheOptions::from_json(r#"{"max": -3}"#);
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_options_from_env_defaults() {
        env::remove_var("CACHE_MAX");
        env::remove_var("CACHE_TTL_MS");

        let options = CacheOptions::from_env();
        assert_eq!(options, CacheOptions::default());
    }
}
