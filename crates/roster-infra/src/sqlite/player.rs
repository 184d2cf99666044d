//! SQLite player repository implementation.
//!
//! `created_at` is written once by `create` and never appears in the
//! `UPDATE` statement.

use roster_core::repository::player::{PlayerFilter, PlayerRepository};
use roster_types::entity::EntityKind;
use roster_types::error::RepositoryError;
use roster_types::guild::GuildId;
use roster_types::player::{Player, PlayerId};
use roster_types::race::RaceId;
use roster_types::reference::DeletionReport;
use sqlx::{QueryBuilder, Row, Sqlite};

use super::pool::DatabasePool;
use super::propagation::delete_with_report;
use super::{
    constraint_kind, format_datetime, parse_datetime, parse_id, push_list_options, query_error,
    ConstraintKind,
};

/// SQLite-backed implementation of `PlayerRepository`.
pub struct SqlitePlayerRepository {
    pool: DatabasePool,
}

impl SqlitePlayerRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct PlayerRow {
    id: String,
    nickname: String,
    email: String,
    bio: String,
    race_id: String,
    guild_id: Option<String>,
    created_at: String,
}

impl PlayerRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            nickname: row.try_get("nickname")?,
            email: row.try_get("email")?,
            bio: row.try_get("bio")?,
            race_id: row.try_get("race_id")?,
            guild_id: row.try_get("guild_id")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_player(self) -> Result<Player, RepositoryError> {
        let guild_id = self
            .guild_id
            .as_deref()
            .map(|raw| parse_id::<GuildId>("guild", raw))
            .transpose()?;

        Ok(Player {
            id: parse_id::<PlayerId>("player", &self.id)?,
            nickname: self.nickname,
            email: self.email,
            bio: self.bio,
            race_id: parse_id::<RaceId>("race", &self.race_id)?,
            guild_id,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

fn player_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Player, RepositoryError> {
    PlayerRow::from_row(row)
        .map_err(query_error)
        .and_then(PlayerRow::into_player)
}

impl SqlitePlayerRepository {
    /// Map a failed write. A foreign-key failure can come from either
    /// reference, so the race is looked up to tell which one is missing.
    async fn write_error(&self, err: sqlx::Error, player: &Player) -> RepositoryError {
        match constraint_kind(&err) {
            Some(ConstraintKind::Unique) => RepositoryError::Conflict {
                field: "nickname",
                value: player.nickname.clone(),
            },
            Some(ConstraintKind::ForeignKey) => {
                let race_exists: Result<Option<(i64,)>, sqlx::Error> =
                    sqlx::query_as("SELECT 1 FROM races WHERE id = ?")
                        .bind(player.race_id.to_string())
                        .fetch_optional(&self.pool.writer)
                        .await;

                match (race_exists, &player.guild_id) {
                    (Ok(Some(_)), Some(guild_id)) => RepositoryError::MissingReference {
                        entity: EntityKind::Guild,
                        id: guild_id.to_string(),
                    },
                    (Ok(_), _) => RepositoryError::MissingReference {
                        entity: EntityKind::Race,
                        id: player.race_id.to_string(),
                    },
                    (Err(lookup), _) => query_error(lookup),
                }
            }
            None => query_error(err),
        }
    }
}

impl PlayerRepository for SqlitePlayerRepository {
    async fn create(&self, player: &Player) -> Result<Player, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO players (id, nickname, email, bio, race_id, guild_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(player.id.to_string())
        .bind(&player.nickname)
        .bind(&player.email)
        .bind(&player.bio)
        .bind(player.race_id.to_string())
        .bind(player.guild_id.as_ref().map(|g| g.to_string()))
        .bind(format_datetime(&player.created_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(player.clone()),
            Err(e) => Err(self.write_error(e, player).await),
        }
    }

    async fn get_by_id(&self, id: &PlayerId) -> Result<Option<Player>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM players WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        row.as_ref().map(player_from_row).transpose()
    }

    async fn get_by_nickname(&self, nickname: &str) -> Result<Option<Player>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM players WHERE nickname = ?")
            .bind(nickname)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        row.as_ref().map(player_from_row).transpose()
    }

    async fn list(&self, filter: Option<PlayerFilter>) -> Result<Vec<Player>, RepositoryError> {
        let filter = filter.unwrap_or_default();
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM players");

        let mut conjunction = " WHERE ";
        if let Some(race) = &filter.race {
            qb.push(conjunction)
                .push("race_id = ")
                .push_bind(race.to_string());
            conjunction = " AND ";
        }
        if let Some(guild) = &filter.guild {
            qb.push(conjunction)
                .push("guild_id = ")
                .push_bind(guild.to_string());
        }
        push_list_options(&mut qb, "nickname", &filter.options);

        let rows = qb
            .build()
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows.iter().map(player_from_row).collect()
    }

    async fn update(&self, player: &Player) -> Result<Player, RepositoryError> {
        let result = sqlx::query(
            "UPDATE players SET nickname = ?, email = ?, bio = ?, race_id = ?, guild_id = ?
             WHERE id = ?",
        )
        .bind(&player.nickname)
        .bind(&player.email)
        .bind(&player.bio)
        .bind(player.race_id.to_string())
        .bind(player.guild_id.as_ref().map(|g| g.to_string()))
        .bind(player.id.to_string())
        .execute(&self.pool.writer)
        .await;

        let result = match result {
            Ok(result) => result,
            Err(e) => return Err(self.write_error(e, player).await),
        };

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        // Return the stored row so the caller sees the persisted created_at
        self.get_by_id(&player.id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: &PlayerId) -> Result<DeletionReport, RepositoryError> {
        delete_with_report(&self.pool, EntityKind::Player, &id.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::guild::SqliteGuildRepository;
    use crate::sqlite::race::SqliteRaceRepository;
    use chrono::Utc;
    use roster_core::repository::guild::GuildRepository;
    use roster_core::repository::race::RaceRepository;
    use roster_types::guild::Guild;
    use roster_types::race::Race;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    async fn seed_race(pool: &DatabasePool, name: &str) -> Race {
        let race = Race {
            id: RaceId::new(),
            name: name.to_string(),
            description: String::new(),
        };
        SqliteRaceRepository::new(pool.clone())
            .create(&race)
            .await
            .unwrap()
    }

    async fn seed_guild(pool: &DatabasePool, name: &str) -> Guild {
        let guild = Guild {
            id: GuildId::new(),
            name: name.to_string(),
            description: None,
        };
        SqliteGuildRepository::new(pool.clone())
            .create(&guild)
            .await
            .unwrap()
    }

    fn make_player(nickname: &str, race: &Race, guild: Option<&Guild>) -> Player {
        Player {
            id: PlayerId::new(),
            nickname: nickname.to_string(),
            email: format!("{nickname}@example.com"),
            bio: format!("{nickname} walks the realm"),
            race_id: race.id.clone(),
            guild_id: guild.map(|g| g.id.clone()),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_by_nickname() {
        let pool = test_pool().await;
        let human = seed_race(&pool, "Human").await;
        let repo = SqlitePlayerRepository::new(pool);

        let player = make_player("aragorn", &human, None);
        repo.create(&player).await.unwrap();

        let found = repo.get_by_nickname("aragorn").await.unwrap().unwrap();
        assert_eq!(found, player);
    }

    #[tokio::test]
    async fn test_nickname_conflict() {
        let pool = test_pool().await;
        let human = seed_race(&pool, "Human").await;
        let repo = SqlitePlayerRepository::new(pool);

        repo.create(&make_player("boromir", &human, None))
            .await
            .unwrap();
        let err = repo
            .create(&make_player("boromir", &human, None))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Conflict {
                field: "nickname",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_race_reference() {
        let pool = test_pool().await;
        let repo = SqlitePlayerRepository::new(pool);
        let ghost_race = Race {
            id: RaceId::new(),
            name: "Ghost".to_string(),
            description: String::new(),
        };

        let err = repo
            .create(&make_player("wraith", &ghost_race, None))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::MissingReference {
                entity: EntityKind::Race,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_guild_reference() {
        let pool = test_pool().await;
        let human = seed_race(&pool, "Human").await;
        let repo = SqlitePlayerRepository::new(pool);
        let ghost_guild = Guild {
            id: GuildId::new(),
            name: "Nowhere".to_string(),
            description: None,
        };

        let err = repo
            .create(&make_player("faramir", &human, Some(&ghost_guild)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::MissingReference {
                entity: EntityKind::Guild,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_update_never_touches_created_at() {
        let pool = test_pool().await;
        let human = seed_race(&pool, "Human").await;
        let repo = SqlitePlayerRepository::new(pool);

        let player = make_player("eowyn", &human, None);
        repo.create(&player).await.unwrap();

        let mut changed = player.clone();
        changed.bio = "Shieldmaiden of Rohan".to_string();
        changed.created_at = Utc::now() + chrono::Duration::days(365);
        let updated = repo.update(&changed).await.unwrap();

        assert_eq!(updated.bio, "Shieldmaiden of Rohan");
        assert_eq!(updated.created_at, player.created_at);
    }

    #[tokio::test]
    async fn test_list_filters_combine() {
        let pool = test_pool().await;
        let human = seed_race(&pool, "Human").await;
        let hobbit = seed_race(&pool, "Hobbit").await;
        let fellowship = seed_guild(&pool, "Fellowship").await;
        let repo = SqlitePlayerRepository::new(pool);

        repo.create(&make_player("sam", &hobbit, Some(&fellowship)))
            .await
            .unwrap();
        repo.create(&make_player("frodo", &hobbit, Some(&fellowship)))
            .await
            .unwrap();
        repo.create(&make_player("rosie", &hobbit, None))
            .await
            .unwrap();
        repo.create(&make_player("aragorn", &human, Some(&fellowship)))
            .await
            .unwrap();

        let hobbits_in_fellowship = repo
            .list(Some(PlayerFilter {
                race: Some(hobbit.id.clone()),
                guild: Some(fellowship.id.clone()),
                ..Default::default()
            }))
            .await
            .unwrap();
        let names: Vec<&str> = hobbits_in_fellowship
            .iter()
            .map(|p| p.nickname.as_str())
            .collect();
        assert_eq!(names, vec!["frodo", "sam"]);

        let fellowship_members = repo
            .list(Some(PlayerFilter {
                guild: Some(fellowship.id.clone()),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(fellowship_members.len(), 3);
    }

    #[tokio::test]
    async fn test_guild_delete_detaches_players() {
        let pool = test_pool().await;
        let human = seed_race(&pool, "Human").await;
        let rangers = seed_guild(&pool, "Rangers").await;
        let guilds = SqliteGuildRepository::new(pool.clone());
        let repo = SqlitePlayerRepository::new(pool);

        let player = make_player("halbarad", &human, Some(&rangers));
        repo.create(&player).await.unwrap();

        let report = guilds.delete(&rangers.id).await.unwrap();
        assert_eq!(report.nullified(EntityKind::Player), 1);

        let survivor = repo.get_by_id(&player.id).await.unwrap().unwrap();
        assert_eq!(survivor.guild_id, None);
        assert_eq!(survivor.created_at, player.created_at);
    }

    #[tokio::test]
    async fn test_race_delete_removes_players() {
        let pool = test_pool().await;
        let human = seed_race(&pool, "Human").await;
        let races = SqliteRaceRepository::new(pool.clone());
        let repo = SqlitePlayerRepository::new(pool);

        let player = make_player("denethor", &human, None);
        repo.create(&player).await.unwrap();

        let report = races.delete(&human.id).await.unwrap();
        assert_eq!(report.cascaded(EntityKind::Player), 1);
        assert!(repo.get_by_id(&player.id).await.unwrap().is_none());
    }
}
