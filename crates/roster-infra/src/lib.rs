//! Infrastructure layer for Roster.
//!
//! Contains the SQLite implementations of the repository traits defined in
//! `roster-core`, plus configuration loading and data directory resolution.

pub mod config;
pub mod sqlite;
