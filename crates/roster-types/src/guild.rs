use serde::{Deserialize, Serialize};

use crate::entity::{display_label, entity_id, EntityKind, Labeled};
use crate::error::ValidationError;
use crate::validation::{require_text, MAX_FIELD_LENGTH};

entity_id!(
    /// Unique identifier for a guild.
    GuildId
);

/// A guild players may join. Deleting it detaches its players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    pub id: GuildId,
    pub name: String,
    /// `None` means unset, which is not the same as `Some("")`.
    pub description: Option<String>,
}

impl Guild {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name, Some(MAX_FIELD_LENGTH))
    }
}

impl Labeled for Guild {
    const KIND: EntityKind = EntityKind::Guild;

    fn label(&self) -> &str {
        &self.name
    }
}

display_label!(Guild);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGuildRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGuildRequest {
    pub name: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
}

impl UpdateGuildRequest {
    pub fn apply_to(self, guild: &mut Guild) {
        if let Some(name) = self.name {
            guild.name = name;
        }
        if let Some(description) = self.description {
            guild.description = description;
        }
    }
}
