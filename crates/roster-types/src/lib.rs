//! Shared domain types for Roster.
//!
//! This crate contains the four roster entities (Race, Skill, Guild, Player),
//! their identifiers and request types, the foreign-key reference descriptors
//! with their delete policies, field validation, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod entity;
pub mod error;
pub mod guild;
pub mod player;
pub mod race;
pub mod reference;
pub mod skill;
pub mod validation;
