//! Race repository trait definition.

use roster_types::error::RepositoryError;
use roster_types::race::{Race, RaceId};
use roster_types::reference::DeletionReport;

use super::ListOptions;

/// Repository trait for race persistence.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait RaceRepository: Send + Sync {
    /// Insert a new race. Fails with `Conflict` if the name is taken.
    fn create(
        &self,
        race: &Race,
    ) -> impl std::future::Future<Output = Result<Race, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &RaceId,
    ) -> impl std::future::Future<Output = Result<Option<Race>, RepositoryError>> + Send;

    fn get_by_name(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<Race>, RepositoryError>> + Send;

    fn list(
        &self,
        options: Option<ListOptions>,
    ) -> impl std::future::Future<Output = Result<Vec<Race>, RepositoryError>> + Send;

    fn update(
        &self,
        race: &Race,
    ) -> impl std::future::Future<Output = Result<Race, RepositoryError>> + Send;

    /// Delete a race together with its skills and players.
    fn delete(
        &self,
        id: &RaceId,
    ) -> impl std::future::Future<Output = Result<DeletionReport, RepositoryError>> + Send;
}
