//! Database pool with split reader/writer connections in WAL mode.
//!
//! SQLite allows only one writer at a time. This module provides a `DatabasePool`
//! with a multi-connection reader pool for concurrent reads and a single-connection
//! writer pool for serialized writes. Both use WAL journal mode and enforce foreign
//! keys, which the cascade and set-null delete policies depend on.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use roster_types::config::RosterConfig;

/// Split read/write pool for SQLite with WAL mode.
///
/// - `reader`: Multi-connection read-only pool for SELECT queries.
/// - `writer`: Single-connection pool for serialized INSERT/UPDATE/DELETE.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open the database with default pool settings.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        Self::with_config(database_url, &RosterConfig::default()).await
    }

    /// Open the database, run the embedded migrations on the writer, then open
    /// the reader pool.
    pub async fn with_config(database_url: &str, config: &RosterConfig) -> Result<Self, sqlx::Error> {
        let base_opts = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(config.busy_timeout_secs))
            .create_if_missing(true);

        let read_opts = base_opts.clone().read_only(true);
        let write_opts = base_opts;

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(write_opts)
            .await?;

        // Schema must exist before readers connect
        sqlx::migrate!("../../migrations").run(&writer).await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(config.max_reader_connections.max(1))
            .connect_with(read_opts)
            .await?;

        tracing::debug!(
            readers = config.max_reader_connections,
            "database pool ready"
        );

        Ok(Self { reader, writer })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_types::reference::ALL_REFERENCES;

    async fn test_pool(name: &str) -> (tempfile::TempDir, DatabasePool) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join(name);
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (dir, pool)
    }

    #[tokio::test]
    async fn test_pool_creates_tables() {
        let (_dir, pool) = test_pool("test.db").await;

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '_sqlx_migrations' ORDER BY name",
        )
        .fetch_all(&pool.reader)
        .await
        .unwrap();

        let table_names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();
        assert_eq!(table_names, vec!["guilds", "players", "races", "skills"]);
    }

    #[tokio::test]
    async fn test_pool_wal_mode() {
        let (_dir, pool) = test_pool("test_wal.db").await;

        let result: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&pool.writer)
            .await
            .unwrap();

        assert_eq!(result.0.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn test_pool_foreign_keys_enforced() {
        let (_dir, pool) = test_pool("test_fk.db").await;

        let result: (i32,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&pool.writer)
            .await
            .unwrap();

        assert_eq!(result.0, 1, "foreign keys should be enabled");
    }

    #[tokio::test]
    async fn test_schema_matches_declared_delete_policies() {
        let (_dir, pool) = test_pool("test_policies.db").await;

        for reference in ALL_REFERENCES {
            let sql = format!(
                "SELECT \"table\", \"from\", on_delete FROM pragma_foreign_key_list('{}')",
                reference.from.table_name()
            );
            let keys: Vec<(String, String, String)> = sqlx::query_as(&sql)
                .fetch_all(&pool.reader)
                .await
                .unwrap();

            let key = keys
                .iter()
                .find(|(_, column, _)| column == reference.column)
                .unwrap_or_else(|| {
                    panic!(
                        "no foreign key on {}.{}",
                        reference.from.table_name(),
                        reference.column
                    )
                });

            assert_eq!(key.0, reference.to.table_name());
            assert_eq!(key.2, reference.on_delete.as_sql());
        }
    }

    #[tokio::test]
    async fn test_pool_honours_config() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("cfg.db").display());
        let config = RosterConfig {
            max_reader_connections: 2,
            ..Default::default()
        };

        let pool = DatabasePool::with_config(&url, &config).await.unwrap();
        assert_eq!(pool.reader.options().get_max_connections(), 2);
        assert_eq!(pool.writer.options().get_max_connections(), 1);
    }
}
