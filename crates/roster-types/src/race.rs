use serde::{Deserialize, Serialize};

use crate::entity::{display_label, entity_id, EntityKind, Labeled};
use crate::error::ValidationError;
use crate::validation::{require_text, MAX_FIELD_LENGTH};

entity_id!(
    /// Unique identifier for a race.
    RaceId
);

/// A playable race. Owns its skills; referenced by players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    pub id: RaceId,
    /// Globally unique display name.
    pub name: String,
    /// Free text, empty when not given.
    pub description: String,
}

impl Race {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name, Some(MAX_FIELD_LENGTH))
    }
}

impl Labeled for Race {
    const KIND: EntityKind = EntityKind::Race;

    fn label(&self) -> &str {
        &self.name
    }
}

display_label!(Race);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRaceRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRaceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateRaceRequest {
    pub fn apply_to(self, race: &mut Race) {
        if let Some(name) = self.name {
            race.name = name;
        }
        if let Some(description) = self.description {
            race.description = description;
        }
    }
}
