//! SQLite race repository implementation.
//!
//! Implements `RaceRepository` from `roster-core` using sqlx with split read/write pools.

use roster_core::repository::race::RaceRepository;
use roster_core::repository::ListOptions;
use roster_types::entity::EntityKind;
use roster_types::error::RepositoryError;
use roster_types::race::{Race, RaceId};
use roster_types::reference::DeletionReport;
use sqlx::{QueryBuilder, Row, Sqlite};

use super::pool::DatabasePool;
use super::propagation::delete_with_report;
use super::{constraint_kind, parse_id, push_list_options, query_error, ConstraintKind};

/// SQLite-backed implementation of `RaceRepository`.
pub struct SqliteRaceRepository {
    pool: DatabasePool,
}

impl SqliteRaceRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Race.
struct RaceRow {
    id: String,
    name: String,
    description: String,
}

impl RaceRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
        })
    }

    fn into_race(self) -> Result<Race, RepositoryError> {
        Ok(Race {
            id: parse_id::<RaceId>("race", &self.id)?,
            name: self.name,
            description: self.description,
        })
    }
}

fn write_error(err: sqlx::Error, race: &Race) -> RepositoryError {
    match constraint_kind(&err) {
        Some(ConstraintKind::Unique) => RepositoryError::Conflict {
            field: "name",
            value: race.name.clone(),
        },
        _ => query_error(err),
    }
}

impl SqliteRaceRepository {
    async fn fetch_one_where(
        &self,
        column: &'static str,
        value: String,
    ) -> Result<Option<Race>, RepositoryError> {
        let sql = format!("SELECT * FROM races WHERE {column} = ?");
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => {
                let race_row = RaceRow::from_row(&row).map_err(query_error)?;
                Ok(Some(race_row.into_race()?))
            }
            None => Ok(None),
        }
    }
}

impl RaceRepository for SqliteRaceRepository {
    async fn create(&self, race: &Race) -> Result<Race, RepositoryError> {
        sqlx::query("INSERT INTO races (id, name, description) VALUES (?, ?, ?)")
            .bind(race.id.to_string())
            .bind(&race.name)
            .bind(&race.description)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| write_error(e, race))?;

        Ok(race.clone())
    }

    async fn get_by_id(&self, id: &RaceId) -> Result<Option<Race>, RepositoryError> {
        self.fetch_one_where("id", id.to_string()).await
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Race>, RepositoryError> {
        self.fetch_one_where("name", name.to_string()).await
    }

    async fn list(&self, options: Option<ListOptions>) -> Result<Vec<Race>, RepositoryError> {
        let options = options.unwrap_or_default();
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM races");
        push_list_options(&mut qb, "name", &options);

        let rows = qb
            .build()
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        let mut races = Vec::with_capacity(rows.len());
        for row in &rows {
            let race_row = RaceRow::from_row(row).map_err(query_error)?;
            races.push(race_row.into_race()?);
        }

        Ok(races)
    }

    async fn update(&self, race: &Race) -> Result<Race, RepositoryError> {
        let result = sqlx::query("UPDATE races SET name = ?, description = ? WHERE id = ?")
            .bind(&race.name)
            .bind(&race.description)
            .bind(race.id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| write_error(e, race))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(race.clone())
    }

    async fn delete(&self, id: &RaceId) -> Result<DeletionReport, RepositoryError> {
        delete_with_report(&self.pool, EntityKind::Race, &id.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::repository::SortOrder;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_race(name: &str) -> Race {
        Race {
            id: RaceId::new(),
            name: name.to_string(),
            description: format!("The {name} folk"),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_by_id() {
        let repo = SqliteRaceRepository::new(test_pool().await);
        let race = make_race("Dwarf");

        repo.create(&race).await.unwrap();

        let found = repo.get_by_id(&race.id).await.unwrap().unwrap();
        assert_eq!(found, race);
    }

    #[tokio::test]
    async fn test_get_by_name() {
        let repo = SqliteRaceRepository::new(test_pool().await);
        let race = make_race("Hobbit");
        repo.create(&race).await.unwrap();

        let found = repo.get_by_name("Hobbit").await.unwrap().unwrap();
        assert_eq!(found.id, race.id);
        assert!(repo.get_by_name("hobbit").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_name_conflict() {
        let repo = SqliteRaceRepository::new(test_pool().await);
        repo.create(&make_race("Elf")).await.unwrap();

        let err = repo.create(&make_race("Elf")).await.unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Conflict { field: "name", ref value } if value == "Elf"
        ));
    }

    #[tokio::test]
    async fn test_rename_into_existing_name_conflicts() {
        let repo = SqliteRaceRepository::new(test_pool().await);
        repo.create(&make_race("Elf")).await.unwrap();
        let mut orc = make_race("Orc");
        repo.create(&orc).await.unwrap();

        orc.name = "Elf".to_string();
        let err = repo.update(&orc).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_list_sorted_and_paged() {
        let repo = SqliteRaceRepository::new(test_pool().await);
        for name in ["Orc", "Dwarf", "Human", "Elf"] {
            repo.create(&make_race(name)).await.unwrap();
        }

        let all = repo.list(None).await.unwrap();
        let names: Vec<&str> = all.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Dwarf", "Elf", "Human", "Orc"]);

        let page = repo
            .list(Some(ListOptions {
                sort_order: Some(SortOrder::Desc),
                limit: Some(2),
                offset: Some(1),
            }))
            .await
            .unwrap();
        let names: Vec<&str> = page.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Human", "Elf"]);
    }

    #[tokio::test]
    async fn test_update_missing_race() {
        let repo = SqliteRaceRepository::new(test_pool().await);
        let err = repo.update(&make_race("Ghost")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_without_dependents() {
        let repo = SqliteRaceRepository::new(test_pool().await);
        let race = make_race("Ent");
        repo.create(&race).await.unwrap();

        let report = repo.delete(&race.id).await.unwrap();
        assert_eq!(report.entity, EntityKind::Race);
        assert_eq!(report.cascaded(EntityKind::Skill), 0);
        assert!(repo.get_by_id(&race.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent() {
        let repo = SqliteRaceRepository::new(test_pool().await);
        let err = repo.delete(&RaceId::new()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
