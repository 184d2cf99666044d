//! Cross-entity building blocks: the entity kind tag, the human-readable
//! label accessor, and the UUID v7 identifier newtypes.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// The four kinds of roster entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Race,
    Skill,
    Guild,
    Player,
}

impl EntityKind {
    /// Storage table backing this entity.
    pub fn table_name(&self) -> &'static str {
        match self {
            EntityKind::Race => "races",
            EntityKind::Skill => "skills",
            EntityKind::Guild => "guilds",
            EntityKind::Player => "players",
        }
    }

    /// Column holding the unique natural key (`name` or `nickname`).
    pub fn natural_key_field(&self) -> &'static str {
        match self {
            EntityKind::Player => "nickname",
            _ => "name",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Race => write!(f, "race"),
            EntityKind::Skill => write!(f, "skill"),
            EntityKind::Guild => write!(f, "guild"),
            EntityKind::Player => write!(f, "player"),
        }
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "race" => Ok(EntityKind::Race),
            "skill" => Ok(EntityKind::Skill),
            "guild" => Ok(EntityKind::Guild),
            "player" => Ok(EntityKind::Player),
            other => Err(format!("invalid entity kind: '{other}'")),
        }
    }
}

/// Human-readable label: `name` for races, skills and guilds, `nickname` for players.
pub trait Labeled {
    const KIND: EntityKind;

    fn label(&self) -> &str;
}

/// Declares a UUID v7 identifier newtype with Display/FromStr round-tripping.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub struct $name(pub uuid::Uuid);

        impl $name {
            /// Create a new id using UUID v7 (time-sortable).
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(uuid::Uuid::parse_str(s)?))
            }
        }
    };
}

pub(crate) use entity_id;

/// Implements `Display` by printing the entity's label.
macro_rules! display_label {
    ($ty:ty) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::entity::Labeled::label(self))
            }
        }
    };
}

pub(crate) use display_label;
