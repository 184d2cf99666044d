//! Roster service: create, read, update and delete for races, skills,
//! guilds and players.
//!
//! Every write goes through the same steps: build the full entity, validate
//! its fields, confirm that referenced rows exist, then hand it to the
//! repository. Storage-level uniqueness and foreign-key failures come back as
//! `RepositoryError` and are mapped to `ConstraintViolation`.

use chrono::Utc;
use tracing::{debug, info};

use roster_types::entity::EntityKind;
use roster_types::error::{ConstraintViolation, RepositoryError, RosterError};
use roster_types::guild::{CreateGuildRequest, Guild, GuildId, UpdateGuildRequest};
use roster_types::player::{CreatePlayerRequest, Player, PlayerId, UpdatePlayerRequest};
use roster_types::race::{CreateRaceRequest, Race, RaceId, UpdateRaceRequest};
use roster_types::reference::DeletionReport;
use roster_types::skill::{CreateSkillRequest, Skill, SkillId, UpdateSkillRequest};

use crate::repository::guild::GuildRepository;
use crate::repository::player::{PlayerFilter, PlayerRepository};
use crate::repository::race::RaceRepository;
use crate::repository::skill::{SkillFilter, SkillRepository};
use crate::repository::ListOptions;

/// Service owning the four entity repositories.
///
/// Generic over the repository traits so roster-core never depends on
/// roster-infra.
pub struct RosterService<R, S, G, P>
where
    R: RaceRepository,
    S: SkillRepository,
    G: GuildRepository,
    P: PlayerRepository,
{
    races: R,
    skills: S,
    guilds: G,
    players: P,
}

/// Translate a repository failure for `entity` (looked up by `key`) into a service error.
fn into_roster_error(err: RepositoryError, entity: EntityKind, key: &str) -> RosterError {
    match err {
        RepositoryError::Conflict { field, value } => ConstraintViolation::DuplicateKey {
            entity,
            field,
            value,
        }
        .into(),
        RepositoryError::MissingReference { entity, id } => {
            ConstraintViolation::MissingReference { entity, id }.into()
        }
        RepositoryError::NotFound => RosterError::not_found(entity, key),
        other => RosterError::Storage(other.to_string()),
    }
}

impl<R, S, G, P> RosterService<R, S, G, P>
where
    R: RaceRepository,
    S: SkillRepository,
    G: GuildRepository,
    P: PlayerRepository,
{
    pub fn new(races: R, skills: S, guilds: G, players: P) -> Self {
        Self {
            races,
            skills,
            guilds,
            players,
        }
    }

    // ---- races ----

    pub async fn create_race(&self, request: CreateRaceRequest) -> Result<Race, RosterError> {
        let race = Race {
            id: RaceId::new(),
            name: request.name,
            description: request.description.unwrap_or_default(),
        };
        race.validate()?;

        let race = self
            .races
            .create(&race)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Race, &race.name))?;

        info!(race_id = %race.id, name = %race.name, "race created");
        Ok(race)
    }

    pub async fn get_race(&self, id: &RaceId) -> Result<Race, RosterError> {
        let key = id.to_string();
        self.races
            .get_by_id(id)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Race, &key))?
            .ok_or_else(|| RosterError::not_found(EntityKind::Race, key))
    }

    pub async fn get_race_by_name(&self, name: &str) -> Result<Race, RosterError> {
        self.races
            .get_by_name(name)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Race, name))?
            .ok_or_else(|| RosterError::not_found(EntityKind::Race, name))
    }

    pub async fn list_races(&self, options: Option<ListOptions>) -> Result<Vec<Race>, RosterError> {
        self.races
            .list(options)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Race, ""))
    }

    pub async fn update_race(
        &self,
        id: &RaceId,
        request: UpdateRaceRequest,
    ) -> Result<Race, RosterError> {
        let mut race = self.get_race(id).await?;
        request.apply_to(&mut race);
        race.validate()?;

        let race = self
            .races
            .update(&race)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Race, &race.name))?;

        debug!(race_id = %race.id, "race updated");
        Ok(race)
    }

    /// Delete a race. Its skills and players are deleted with it.
    pub async fn delete_race(&self, id: &RaceId) -> Result<DeletionReport, RosterError> {
        let report = self
            .races
            .delete(id)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Race, &id.to_string()))?;

        info!(
            race_id = %id,
            skills_removed = report.cascaded(EntityKind::Skill),
            players_removed = report.cascaded(EntityKind::Player),
            "race deleted"
        );
        Ok(report)
    }

    async fn ensure_race_exists(&self, id: &RaceId) -> Result<(), RosterError> {
        match self.get_race(id).await {
            Ok(_) => Ok(()),
            Err(RosterError::NotFound { .. }) => Err(ConstraintViolation::MissingReference {
                entity: EntityKind::Race,
                id: id.to_string(),
            }
            .into()),
            Err(e) => Err(e),
        }
    }

    // ---- skills ----

    pub async fn create_skill(&self, request: CreateSkillRequest) -> Result<Skill, RosterError> {
        let skill = Skill {
            id: SkillId::new(),
            name: request.name,
            bonus: request.bonus,
            race_id: request.race_id,
        };
        skill.validate()?;
        self.ensure_race_exists(&skill.race_id).await?;

        let skill = self
            .skills
            .create(&skill)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Skill, &skill.name))?;

        info!(skill_id = %skill.id, name = %skill.name, race_id = %skill.race_id, "skill created");
        Ok(skill)
    }

    pub async fn get_skill(&self, id: &SkillId) -> Result<Skill, RosterError> {
        let key = id.to_string();
        self.skills
            .get_by_id(id)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Skill, &key))?
            .ok_or_else(|| RosterError::not_found(EntityKind::Skill, key))
    }

    pub async fn get_skill_by_name(&self, name: &str) -> Result<Skill, RosterError> {
        self.skills
            .get_by_name(name)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Skill, name))?
            .ok_or_else(|| RosterError::not_found(EntityKind::Skill, name))
    }

    pub async fn list_skills(&self, filter: Option<SkillFilter>) -> Result<Vec<Skill>, RosterError> {
        self.skills
            .list(filter)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Skill, ""))
    }

    pub async fn update_skill(
        &self,
        id: &SkillId,
        request: UpdateSkillRequest,
    ) -> Result<Skill, RosterError> {
        let mut skill = self.get_skill(id).await?;
        let moves_race = request.race_id.is_some();
        request.apply_to(&mut skill);
        skill.validate()?;
        if moves_race {
            self.ensure_race_exists(&skill.race_id).await?;
        }

        let skill = self
            .skills
            .update(&skill)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Skill, &skill.name))?;

        debug!(skill_id = %skill.id, "skill updated");
        Ok(skill)
    }

    pub async fn delete_skill(&self, id: &SkillId) -> Result<DeletionReport, RosterError> {
        let report = self
            .skills
            .delete(id)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Skill, &id.to_string()))?;

        info!(skill_id = %id, "skill deleted");
        Ok(report)
    }

    // ---- guilds ----

    pub async fn create_guild(&self, request: CreateGuildRequest) -> Result<Guild, RosterError> {
        let guild = Guild {
            id: GuildId::new(),
            name: request.name,
            description: request.description,
        };
        guild.validate()?;

        let guild = self
            .guilds
            .create(&guild)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Guild, &guild.name))?;

        info!(guild_id = %guild.id, name = %guild.name, "guild created");
        Ok(guild)
    }

    pub async fn get_guild(&self, id: &GuildId) -> Result<Guild, RosterError> {
        let key = id.to_string();
        self.guilds
            .get_by_id(id)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Guild, &key))?
            .ok_or_else(|| RosterError::not_found(EntityKind::Guild, key))
    }

    pub async fn get_guild_by_name(&self, name: &str) -> Result<Guild, RosterError> {
        self.guilds
            .get_by_name(name)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Guild, name))?
            .ok_or_else(|| RosterError::not_found(EntityKind::Guild, name))
    }

    pub async fn list_guilds(&self, options: Option<ListOptions>) -> Result<Vec<Guild>, RosterError> {
        self.guilds
            .list(options)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Guild, ""))
    }

    pub async fn update_guild(
        &self,
        id: &GuildId,
        request: UpdateGuildRequest,
    ) -> Result<Guild, RosterError> {
        let mut guild = self.get_guild(id).await?;
        request.apply_to(&mut guild);
        guild.validate()?;

        let guild = self
            .guilds
            .update(&guild)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Guild, &guild.name))?;

        debug!(guild_id = %guild.id, "guild updated");
        Ok(guild)
    }

    /// Delete a guild. Its players stay, with their guild cleared.
    pub async fn delete_guild(&self, id: &GuildId) -> Result<DeletionReport, RosterError> {
        let report = self
            .guilds
            .delete(id)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Guild, &id.to_string()))?;

        info!(
            guild_id = %id,
            players_detached = report.nullified(EntityKind::Player),
            "guild deleted"
        );
        Ok(report)
    }

    async fn ensure_guild_exists(&self, id: &GuildId) -> Result<(), RosterError> {
        match self.get_guild(id).await {
            Ok(_) => Ok(()),
            Err(RosterError::NotFound { .. }) => Err(ConstraintViolation::MissingReference {
                entity: EntityKind::Guild,
                id: id.to_string(),
            }
            .into()),
            Err(e) => Err(e),
        }
    }

    // ---- players ----

    pub async fn create_player(&self, request: CreatePlayerRequest) -> Result<Player, RosterError> {
        let player = Player {
            id: PlayerId::new(),
            nickname: request.nickname,
            email: request.email,
            bio: request.bio,
            race_id: request.race_id,
            guild_id: request.guild_id,
            created_at: Utc::now(),
        };
        player.validate()?;
        self.ensure_race_exists(&player.race_id).await?;
        if let Some(guild_id) = &player.guild_id {
            self.ensure_guild_exists(guild_id).await?;
        }

        let player = self
            .players
            .create(&player)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Player, &player.nickname))?;

        info!(player_id = %player.id, nickname = %player.nickname, "player created");
        Ok(player)
    }

    pub async fn get_player(&self, id: &PlayerId) -> Result<Player, RosterError> {
        let key = id.to_string();
        self.players
            .get_by_id(id)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Player, &key))?
            .ok_or_else(|| RosterError::not_found(EntityKind::Player, key))
    }

    pub async fn get_player_by_nickname(&self, nickname: &str) -> Result<Player, RosterError> {
        self.players
            .get_by_nickname(nickname)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Player, nickname))?
            .ok_or_else(|| RosterError::not_found(EntityKind::Player, nickname))
    }

    pub async fn list_players(
        &self,
        filter: Option<PlayerFilter>,
    ) -> Result<Vec<Player>, RosterError> {
        self.players
            .list(filter)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Player, ""))
    }

    pub async fn update_player(
        &self,
        id: &PlayerId,
        request: UpdatePlayerRequest,
    ) -> Result<Player, RosterError> {
        let mut player = self.get_player(id).await?;
        let moves_race = request.race_id.is_some();
        let joins_guild = matches!(request.guild_id, Some(Some(_)));
        request.apply_to(&mut player);
        player.validate()?;

        if moves_race {
            self.ensure_race_exists(&player.race_id).await?;
        }
        if joins_guild {
            if let Some(guild_id) = &player.guild_id {
                self.ensure_guild_exists(guild_id).await?;
            }
        }

        let player = self
            .players
            .update(&player)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Player, &player.nickname))?;

        debug!(player_id = %player.id, "player updated");
        Ok(player)
    }

    pub async fn delete_player(&self, id: &PlayerId) -> Result<DeletionReport, RosterError> {
        let report = self
            .players
            .delete(id)
            .await
            .map_err(|e| into_roster_error(e, EntityKind::Player, &id.to_string()))?;

        info!(player_id = %id, "player deleted");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_maps_to_duplicate_key() {
        let err = into_roster_error(
            RepositoryError::Conflict {
                field: "nickname",
                value: "frodo".to_string(),
            },
            EntityKind::Player,
            "frodo",
        );
        match err {
            RosterError::Constraint(ConstraintViolation::DuplicateKey {
                entity,
                field,
                value,
            }) => {
                assert_eq!(entity, EntityKind::Player);
                assert_eq!(field, "nickname");
                assert_eq!(value, "frodo");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_reference_keeps_target_entity() {
        let err = into_roster_error(
            RepositoryError::MissingReference {
                entity: EntityKind::Guild,
                id: "g1".to_string(),
            },
            EntityKind::Player,
            "frodo",
        );
        assert!(matches!(
            err,
            RosterError::Constraint(ConstraintViolation::MissingReference {
                entity: EntityKind::Guild,
                ..
            })
        ));
    }

    #[test]
    fn test_not_found_carries_key() {
        let err = into_roster_error(RepositoryError::NotFound, EntityKind::Race, "Orc");
        assert_eq!(err.to_string(), "race 'Orc' not found");
    }

    #[test]
    fn test_query_error_is_storage() {
        let err = into_roster_error(
            RepositoryError::Query("disk I/O error".to_string()),
            EntityKind::Skill,
            "",
        );
        assert!(matches!(err, RosterError::Storage(_)));
    }
}
