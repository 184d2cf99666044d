//! Configuration loader for Roster.
//!
//! Resolves the data directory, reads `config.toml` from it, and builds the
//! SQLite URL. Falls back to defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use roster_types::config::RosterConfig;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "ROSTER_DATA_DIR";

/// Resolve the data directory.
///
/// Priority: `ROSTER_DATA_DIR`, then `~/.roster`, then `./.roster`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".roster");
    }

    PathBuf::from(".roster")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: returns [`RosterConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> RosterConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return RosterConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return RosterConfig::default();
        }
    };

    match toml::from_str::<RosterConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            RosterConfig::default()
        }
    }
}

/// SQLite URL for the configured database file inside `data_dir`.
pub fn database_url(data_dir: &Path, config: &RosterConfig) -> String {
    format!(
        "sqlite://{}?mode=rwc",
        data_dir.join(&config.database_file).display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config, RosterConfig::default());
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            "database_file = \"realm.db\"\nbusy_timeout_secs = 10\n",
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.database_file, "realm.db");
        assert_eq!(config.busy_timeout_secs, 10);
        assert_eq!(config.max_reader_connections, 8);
    }

    #[tokio::test]
    async fn load_config_malformed_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "database_file = [")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config, RosterConfig::default());
    }

    #[test]
    fn database_url_points_into_data_dir() {
        let url = database_url(Path::new("/srv/roster"), &RosterConfig::default());
        assert_eq!(url, "sqlite:///srv/roster/roster.db?mode=rwc");
    }

    #[test]
    fn resolve_data_dir_from_env() {
        // SAFETY: This test is single-threaded and restores the env var immediately.
        unsafe {
            std::env::set_var(DATA_DIR_ENV, "/tmp/test-roster");
        }
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-roster"));
        unsafe {
            std::env::remove_var(DATA_DIR_ENV);
        }
    }
}
