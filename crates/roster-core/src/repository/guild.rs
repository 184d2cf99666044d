//! Guild repository trait definition.

use roster_types::error::RepositoryError;
use roster_types::guild::{Guild, GuildId};
use roster_types::reference::DeletionReport;

use super::ListOptions;

/// Repository trait for guild persistence.
pub trait GuildRepository: Send + Sync {
    fn create(
        &self,
        guild: &Guild,
    ) -> impl std::future::Future<Output = Result<Guild, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &GuildId,
    ) -> impl std::future::Future<Output = Result<Option<Guild>, RepositoryError>> + Send;

    fn get_by_name(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<Guild>, RepositoryError>> + Send;

    fn list(
        &self,
        options: Option<ListOptions>,
    ) -> impl std::future::Future<Output = Result<Vec<Guild>, RepositoryError>> + Send;

    fn update(
        &self,
        guild: &Guild,
    ) -> impl std::future::Future<Output = Result<Guild, RepositoryError>> + Send;

    /// Delete a guild. Its players survive with their guild cleared.
    fn delete(
        &self,
        id: &GuildId,
    ) -> impl std::future::Future<Output = Result<DeletionReport, RepositoryError>> + Send;
}
