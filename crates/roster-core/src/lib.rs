//! Integrity rules and repository trait definitions for Roster.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements, and the `RosterService` that enforces field validation
//! and reference checks before anything reaches storage. It depends only on
//! `roster-types` -- never on `roster-infra` or any database crate.

pub mod repository;
pub mod service;
