//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Default directory for cache records.
const DEFAULT_ROOT_DIR: &str = ".cache";

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory where cache records are written
    pub root_dir: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DIR` - Cache record directory (default: ".cache")
    pub fn from_env() -> Self {
        Self {
            root_dir: env::var("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_ROOT_DIR)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from(DEFAULT_ROOT_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.root_dir, PathBuf::from(".cache"));
    }

    #[test]
    fn test_config_from_env() {
        env::set_var("CACHE_DIR", "/tmp/filecache-test");
        let config = Config::from_env();
        env::remove_var("CACHE_DIR");

        assert_eq!(config.root_dir, PathBuf::from("/tmp/filecache-test"));
    }
}
