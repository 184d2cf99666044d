use serde::{Deserialize, Serialize};

use crate::entity::{display_label, entity_id, EntityKind, Labeled};
use crate::error::ValidationError;
use crate::race::RaceId;
use crate::validation::{require_text, MAX_FIELD_LENGTH};

entity_id!(
    /// Unique identifier for a skill.
    SkillId
);

/// A racial skill. Belongs to exactly one race and is deleted with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    /// Unique across all races, not per race.
    pub name: String,
    /// Free-form description of the effect ("+2 night vision").
    pub bonus: String,
    pub race_id: RaceId,
}

impl Skill {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name, Some(MAX_FIELD_LENGTH))?;
        require_text("bonus", &self.bonus, Some(MAX_FIELD_LENGTH))
    }
}

impl Labeled for Skill {
    const KIND: EntityKind = EntityKind::Skill;

    fn label(&self) -> &str {
        &self.name
    }
}

display_label!(Skill);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSkillRequest {
    pub name: String,
    pub bonus: String,
    pub race_id: RaceId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSkillRequest {
    pub name: Option<String>,
    pub bonus: Option<String>,
    /// Move the skill to another race.
    pub race_id: Option<RaceId>,
}

impl UpdateSkillRequest {
    pub fn apply_to(self, skill: &mut Skill) {
        if let Some(name) = self.name {
            skill.name = name;
        }
        if let Some(bonus) = self.bonus {
            skill.bonus = bonus;
        }
        if let Some(race_id) = self.race_id {
            skill.race_id = race_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn darkvision() -> Skill {
        Skill {
            id: SkillId::new(),
            name: "Darkvision".to_string(),
            bonus: "see in the dark".to_string(),
            race_id: RaceId::new(),
        }
    }

    #[test]
    fn test_label_is_name() {
        assert_eq!(darkvision().label(), "Darkvision");
    }

    #[test]
    fn test_bonus_is_required() {
        let mut skill = darkvision();
        skill.bonus = " ".to_string();
        assert_eq!(
            skill.validate(),
            Err(ValidationError::Empty { field: "bonus" })
        );
    }

    #[test]
    fn test_bonus_is_bounded() {
        let mut skill = darkvision();
        skill.bonus = "+".repeat(MAX_FIELD_LENGTH + 1);
        assert!(matches!(
            skill.validate(),
            Err(ValidationError::TooLong { field: "bonus", .. })
        ));
    }
}
