use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{display_label, entity_id, EntityKind, Labeled};
use crate::error::ValidationError;
use crate::guild::GuildId;
use crate::race::RaceId;
use crate::validation::{require_text, validate_email, MAX_FIELD_LENGTH};

entity_id!(
    /// Unique identifier for a player.
    PlayerId
);

/// A player. Identified to humans by a unique nickname.
///
/// Always belongs to a race (and is deleted with it); optionally belongs to a
/// guild (and is detached, not deleted, when the guild goes away).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub nickname: String,
    pub email: String,
    pub bio: String,
    pub race_id: RaceId,
    pub guild_id: Option<GuildId>,
    /// Stamped once when the player is created; never updated.
    pub created_at: DateTime<Utc>,
}

impl Player {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("nickname", &self.nickname, Some(MAX_FIELD_LENGTH))?;
        require_text("email", &self.email, Some(MAX_FIELD_LENGTH))?;
        validate_email(&self.email)?;
        require_text("bio", &self.bio, Some(MAX_FIELD_LENGTH))
    }
}

impl Labeled for Player {
    const KIND: EntityKind = EntityKind::Player;

    fn label(&self) -> &str {
        &self.nickname
    }
}

display_label!(Player);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlayerRequest {
    pub nickname: String,
    pub email: String,
    pub bio: String,
    pub race_id: RaceId,
    pub guild_id: Option<GuildId>,
}

/// Partial update. `created_at` cannot be changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlayerRequest {
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub race_id: Option<RaceId>,
    /// `Some(None)` leaves the current guild.
    pub guild_id: Option<Option<GuildId>>,
}

impl UpdatePlayerRequest {
    pub fn apply_to(self, player: &mut Player) {
        if let Some(nickname) = self.nickname {
            player.nickname = nickname;
        }
        if let Some(email) = self.email {
            player.email = email;
        }
        if let Some(bio) = self.bio {
            player.bio = bio;
        }
        if let Some(race_id) = self.race_id {
            player.race_id = race_id;
        }
        if let Some(guild_id) = self.guild_id {
            player.guild_id = guild_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legolas() -> Player {
        Player {
            id: PlayerId::new(),
            nickname: "legolas".to_string(),
            email: "legolas@mirkwood.me".to_string(),
            bio: "Prince of the Woodland Realm".to_string(),
            race_id: RaceId::new(),
            guild_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_label_is_nickname() {
        let player = legolas();
        assert_eq!(player.label(), "legolas");
        assert_eq!(player.to_string(), "legolas");
    }

    #[test]
    fn test_valid_player() {
        assert!(legolas().validate().is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let mut player = legolas();
        player.email = "legolas-at-mirkwood".to_string();
        assert_eq!(
            player.validate(),
            Err(ValidationError::InvalidEmail(
                "legolas-at-mirkwood".to_string()
            ))
        );
    }

    #[test]
    fn test_bio_too_long() {
        let mut player = legolas();
        player.bio = "a".repeat(MAX_FIELD_LENGTH + 1);
        assert!(matches!(
            player.validate(),
            Err(ValidationError::TooLong { field: "bio", .. })
        ));
    }

    #[test]
    fn test_update_keeps_created_at() {
        let mut player = legolas();
        let created_at = player.created_at;
        UpdatePlayerRequest {
            bio: Some("Member of the Fellowship".to_string()),
            guild_id: Some(Some(GuildId::new())),
            ..Default::default()
        }
        .apply_to(&mut player);

        assert_eq!(player.created_at, created_at);
        assert_eq!(player.bio, "Member of the Fellowship");
        assert!(player.guild_id.is_some());
    }

    #[test]
    fn test_serialize_roundtrip() {
        let player = legolas();
        let json = serde_json::to_string(&player).unwrap();
        let back: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(player, back);
    }
}
