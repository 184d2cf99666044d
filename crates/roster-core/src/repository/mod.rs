//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (roster-infra) implements. The core crate never depends on any specific
//! storage technology. Implementations must enforce natural-key uniqueness
//! and the delete policies declared in `roster_types::reference`.

pub mod guild;
pub mod player;
pub mod race;
pub mod skill;

/// Sort order for list queries. Lists are ordered by natural key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Ordering and offset pagination shared by every list query.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub sort_order: Option<SortOrder>,
    /// Maximum number of results.
    pub limit: Option<i64>,
    /// Number of results to skip.
    pub offset: Option<i64>,
}
