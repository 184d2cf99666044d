//! SQLite skill repository implementation.

use roster_core::repository::skill::{SkillFilter, SkillRepository};
use roster_types::entity::EntityKind;
use roster_types::error::RepositoryError;
use roster_types::race::RaceId;
use roster_types::reference::DeletionReport;
use roster_types::skill::{Skill, SkillId};
use sqlx::{QueryBuilder, Row, Sqlite};

use super::pool::DatabasePool;
use super::propagation::delete_with_report;
use super::{constraint_kind, parse_id, push_list_options, query_error, ConstraintKind};

/// SQLite-backed implementation of `SkillRepository`.
pub struct SqliteSkillRepository {
    pool: DatabasePool,
}

impl SqliteSkillRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct SkillRow {
    id: String,
    name: String,
    bonus: String,
    race_id: String,
}

impl SkillRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            bonus: row.try_get("bonus")?,
            race_id: row.try_get("race_id")?,
        })
    }

    fn into_skill(self) -> Result<Skill, RepositoryError> {
        Ok(Skill {
            id: parse_id::<SkillId>("skill", &self.id)?,
            name: self.name,
            bonus: self.bonus,
            race_id: parse_id::<RaceId>("race", &self.race_id)?,
        })
    }
}

fn write_error(err: sqlx::Error, skill: &Skill) -> RepositoryError {
    match constraint_kind(&err) {
        Some(ConstraintKind::Unique) => RepositoryError::Conflict {
            field: "name",
            value: skill.name.clone(),
        },
        Some(ConstraintKind::ForeignKey) => RepositoryError::MissingReference {
            entity: EntityKind::Race,
            id: skill.race_id.to_string(),
        },
        None => query_error(err),
    }
}

fn collect_skills(rows: &[sqlx::sqlite::SqliteRow]) -> Result<Vec<Skill>, RepositoryError> {
    let mut skills = Vec::with_capacity(rows.len());
    for row in rows {
        let skill_row = SkillRow::from_row(row).map_err(query_error)?;
        skills.push(skill_row.into_skill()?);
    }
    Ok(skills)
}

impl SkillRepository for SqliteSkillRepository {
    async fn create(&self, skill: &Skill) -> Result<Skill, RepositoryError> {
        sqlx::query("INSERT INTO skills (id, name, bonus, race_id) VALUES (?, ?, ?, ?)")
            .bind(skill.id.to_string())
            .bind(&skill.name)
            .bind(&skill.bonus)
            .bind(skill.race_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| write_error(e, skill))?;

        Ok(skill.clone())
    }

    async fn get_by_id(&self, id: &SkillId) -> Result<Option<Skill>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM skills WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        Ok(collect_skills(row.as_slice())?.pop())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Skill>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM skills WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        Ok(collect_skills(row.as_slice())?.pop())
    }

    async fn list(&self, filter: Option<SkillFilter>) -> Result<Vec<Skill>, RepositoryError> {
        let filter = filter.unwrap_or_default();
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM skills");

        if let Some(race) = &filter.race {
            qb.push(" WHERE race_id = ").push_bind(race.to_string());
        }
        push_list_options(&mut qb, "name", &filter.options);

        let rows = qb
            .build()
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        collect_skills(&rows)
    }

    async fn update(&self, skill: &Skill) -> Result<Skill, RepositoryError> {
        let result = sqlx::query("UPDATE skills SET name = ?, bonus = ?, race_id = ? WHERE id = ?")
            .bind(&skill.name)
            .bind(&skill.bonus)
            .bind(skill.race_id.to_string())
            .bind(skill.id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| write_error(e, skill))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(skill.clone())
    }

    async fn delete(&self, id: &SkillId) -> Result<DeletionReport, RepositoryError> {
        delete_with_report(&self.pool, EntityKind::Skill, &id.to_string()).await
    }
}
