//! SQLite guild repository implementation.

use roster_core::repository::guild::GuildRepository;
use roster_core::repository::ListOptions;
use roster_types::entity::EntityKind;
use roster_types::error::RepositoryError;
use roster_types::guild::{Guild, GuildId};
use roster_types::reference::DeletionReport;
use sqlx::{QueryBuilder, Row, Sqlite};

use super::pool::DatabasePool;
use super::propagation::delete_with_report;
use super::{constraint_kind, parse_id, push_list_options, query_error, ConstraintKind};

/// SQLite-backed implementation of `GuildRepository`.
pub struct SqliteGuildRepository {
    pool: DatabasePool,
}

impl SqliteGuildRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct GuildRow {
    id: String,
    name: String,
    description: Option<String>,
}

impl GuildRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
        })
    }

    fn into_guild(self) -> Result<Guild, RepositoryError> {
        Ok(Guild {
            id: parse_id::<GuildId>("guild", &self.id)?,
            name: self.name,
            description: self.description,
        })
    }
}

fn write_error(err: sqlx::Error, guild: &Guild) -> RepositoryError {
    match constraint_kind(&err) {
        Some(ConstraintKind::Unique) => RepositoryError::Conflict {
            field: "name",
            value: guild.name.clone(),
        },
        _ => query_error(err),
    }
}

fn guild_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Guild, RepositoryError> {
    GuildRow::from_row(row)
        .map_err(query_error)
        .and_then(GuildRow::into_guild)
}

fn map_row(row: Option<sqlx::sqlite::SqliteRow>) -> Result<Option<Guild>, RepositoryError> {
    row.as_ref().map(guild_from_row).transpose()
}

impl GuildRepository for SqliteGuildRepository {
    async fn create(&self, guild: &Guild) -> Result<Guild, RepositoryError> {
        sqlx::query("INSERT INTO guilds (id, name, description) VALUES (?, ?, ?)")
            .bind(guild.id.to_string())
            .bind(&guild.name)
            .bind(&guild.description)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| write_error(e, guild))?;

        Ok(guild.clone())
    }

    async fn get_by_id(&self, id: &GuildId) -> Result<Option<Guild>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM guilds WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        map_row(row)
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Guild>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM guilds WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        map_row(row)
    }

    async fn list(&self, options: Option<ListOptions>) -> Result<Vec<Guild>, RepositoryError> {
        let options = options.unwrap_or_default();
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM guilds");
        push_list_options(&mut qb, "name", &options);

        let rows = qb
            .build()
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows.iter().map(guild_from_row).collect()
    }

    async fn update(&self, guild: &Guild) -> Result<Guild, RepositoryError> {
        let result = sqlx::query("UPDATE guilds SET name = ?, description = ? WHERE id = ?")
            .bind(&guild.name)
            .bind(&guild.description)
            .bind(guild.id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| write_error(e, guild))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(guild.clone())
    }

    async fn delete(&self, id: &GuildId) -> Result<DeletionReport, RepositoryError> {
        delete_with_report(&self.pool, EntityKind::Guild, &id.to_string()).await
    }
}
