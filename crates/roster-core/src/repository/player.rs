//! Player repository trait definition.

use roster_types::error::RepositoryError;
use roster_types::guild::GuildId;
use roster_types::player::{Player, PlayerId};
use roster_types::race::RaceId;
use roster_types::reference::DeletionReport;

use super::ListOptions;

/// Filter criteria for listing players. Both filters combine with AND.
#[derive(Debug, Clone, Default)]
pub struct PlayerFilter {
    pub race: Option<RaceId>,
    pub guild: Option<GuildId>,
    pub options: ListOptions,
}

/// Repository trait for player persistence.
pub trait PlayerRepository: Send + Sync {
    /// Insert a new player. `created_at` is stored as given.
    fn create(
        &self,
        player: &Player,
    ) -> impl std::future::Future<Output = Result<Player, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &PlayerId,
    ) -> impl std::future::Future<Output = Result<Option<Player>, RepositoryError>> + Send;

    fn get_by_nickname(
        &self,
        nickname: &str,
    ) -> impl std::future::Future<Output = Result<Option<Player>, RepositoryError>> + Send;

    fn list(
        &self,
        filter: Option<PlayerFilter>,
    ) -> impl std::future::Future<Output = Result<Vec<Player>, RepositoryError>> + Send;

    /// Update every field except `created_at`.
    fn update(
        &self,
        player: &Player,
    ) -> impl std::future::Future<Output = Result<Player, RepositoryError>> + Send;

    fn delete(
        &self,
        id: &PlayerId,
    ) -> impl std::future::Future<Output = Result<DeletionReport, RepositoryError>> + Send;
}
