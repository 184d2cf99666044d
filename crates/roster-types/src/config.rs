//! Configuration types for Roster.
//!
//! `RosterConfig` represents the optional `config.toml` in the data
//! directory that controls where the database lives and how the pool is sized.

use serde::{Deserialize, Serialize};

/// Top-level configuration. All fields have defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Database file name, relative to the data directory.
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// Size of the read-only connection pool.
    #[serde(default = "default_max_reader_connections")]
    pub max_reader_connections: u32,

    /// How long a connection waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
}

fn default_database_file() -> String {
    "roster.db".to_string()
}

fn default_max_reader_connections() -> u32 {
    8
}

fn default_busy_timeout_secs() -> u64 {
    5
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
            max_reader_connections: default_max_reader_connections(),
            busy_timeout_secs: default_busy_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = RosterConfig::default();
        assert_eq!(config.database_file, "roster.db");
        assert_eq!(config.max_reader_connections, 8);
        assert_eq!(config.busy_timeout_secs, 5);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: RosterConfig = toml::from_str("max_reader_connections = 2").unwrap();
        assert_eq!(config.max_reader_connections, 2);
        assert_eq!(config.database_file, "roster.db");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: RosterConfig = toml::from_str("").unwrap();
        assert_eq!(config, RosterConfig::default());
    }
}
