//! Application state wiring the roster service to SQLite.

use std::sync::Arc;

use roster_core::service::roster::RosterService;
use roster_infra::config::{database_url, load_config, resolve_data_dir};
use roster_infra::sqlite::guild::SqliteGuildRepository;
use roster_infra::sqlite::player::SqlitePlayerRepository;
use roster_infra::sqlite::pool::DatabasePool;
use roster_infra::sqlite::race::SqliteRaceRepository;
use roster_infra::sqlite::skill::SqliteSkillRepository;

/// `RosterService` pinned to the SQLite repositories.
pub type ConcreteRosterService = RosterService<
    SqliteRaceRepository,
    SqliteSkillRepository,
    SqliteGuildRepository,
    SqlitePlayerRepository,
>;

#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<ConcreteRosterService>,
}

impl AppState {
    /// Connect to the database and wire the service.
    ///
    /// `database_url_override` replaces the URL derived from the data directory and
    /// `config.toml`.
    pub async fn init(database_url_override: Option<&str>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;
        let db_url = match database_url_override {
            Some(url) => url.to_string(),
            None => database_url(&data_dir, &config),
        };
        tracing::debug!("opening database {db_url}");

        let db_pool = DatabasePool::with_config(&db_url, &config).await?;

        let roster = RosterService::new(
            SqliteRaceRepository::new(db_pool.clone()),
            SqliteSkillRepository::new(db_pool.clone()),
            SqliteGuildRepository::new(db_pool.clone()),
            SqlitePlayerRepository::new(db_pool),
        );

        Ok(Self {
            roster: Arc::new(roster),
        })
    }
}
