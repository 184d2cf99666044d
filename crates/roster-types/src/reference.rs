//! Foreign-key references between entities and what happens to the
//! referencing rows when the referenced row is deleted.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::entity::EntityKind;

/// Delete propagation policy attached to a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// Deleting the referenced row deletes every referencing row.
    Cascade,
    /// Deleting the referenced row clears the reference; the referencing row survives.
    SetNull,
}

impl DeletePolicy {
    /// The `ON DELETE` action as written in SQL.
    pub fn as_sql(&self) -> &'static str {
        match self {
            DeletePolicy::Cascade => "CASCADE",
            DeletePolicy::SetNull => "SET NULL",
        }
    }
}

impl fmt::Display for DeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletePolicy::Cascade => write!(f, "cascade"),
            DeletePolicy::SetNull => write!(f, "set null"),
        }
    }
}

/// A foreign-key column on `from` pointing at the primary key of `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub from: EntityKind,
    pub column: &'static str,
    pub to: EntityKind,
    /// Whether the column is NOT NULL.
    pub required: bool,
    pub on_delete: DeletePolicy,
}

/// Skill → Race: a skill cannot outlive its race.
pub const SKILL_RACE: Reference = Reference {
    from: EntityKind::Skill,
    column: "race_id",
    to: EntityKind::Race,
    required: true,
    on_delete: DeletePolicy::Cascade,
};

/// Player → Race: a player cannot outlive its race.
pub const PLAYER_RACE: Reference = Reference {
    from: EntityKind::Player,
    column: "race_id",
    to: EntityKind::Race,
    required: true,
    on_delete: DeletePolicy::Cascade,
};

/// Player → Guild: optional, cleared when the guild goes away.
pub const PLAYER_GUILD: Reference = Reference {
    from: EntityKind::Player,
    column: "guild_id",
    to: EntityKind::Guild,
    required: false,
    on_delete: DeletePolicy::SetNull,
};

pub const ALL_REFERENCES: [Reference; 3] = [SKILL_RACE, PLAYER_RACE, PLAYER_GUILD];

impl Reference {
    /// Every declared reference whose target is `target`.
    pub fn pointing_at(target: EntityKind) -> impl Iterator<Item = &'static Reference> {
        ALL_REFERENCES.iter().filter(move |r| r.to == target)
    }
}

/// Rows touched by one reference while deleting its target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropagatedRows {
    pub entity: EntityKind,
    pub column: &'static str,
    pub policy: DeletePolicy,
    pub rows: u64,
}

/// Outcome of deleting one entity, including everything the delete propagated to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionReport {
    pub entity: EntityKind,
    pub id: String,
    pub propagated: Vec<PropagatedRows>,
}

impl DeletionReport {
    pub fn new(entity: EntityKind, id: impl ToString) -> Self {
        Self {
            entity,
            id: id.to_string(),
            propagated: Vec::new(),
        }
    }

    /// Rows of `kind` deleted by cascade.
    pub fn cascaded(&self, kind: EntityKind) -> u64 {
        self.count(kind, DeletePolicy::Cascade)
    }

    /// Rows of `kind` whose reference was cleared.
    pub fn nullified(&self, kind: EntityKind) -> u64 {
        self.count(kind, DeletePolicy::SetNull)
    }

    fn count(&self, kind: EntityKind, policy: DeletePolicy) -> u64 {
        self.propagated
            .iter()
            .filter(|p| p.entity == kind && p.policy == policy)
            .map(|p| p.rows)
            .sum()
    }
}
