//! Skill repository trait definition.

use roster_types::error::RepositoryError;
use roster_types::race::RaceId;
use roster_types::reference::DeletionReport;
use roster_types::skill::{Skill, SkillId};

use super::ListOptions;

/// Filter criteria for listing skills.
#[derive(Debug, Clone, Default)]
pub struct SkillFilter {
    /// Only skills owned by this race.
    pub race: Option<RaceId>,
    pub options: ListOptions,
}

/// Repository trait for skill persistence.
pub trait SkillRepository: Send + Sync {
    /// Insert a new skill. Fails with `Conflict` on a duplicate name and
    /// `MissingReference` if the race does not exist.
    fn create(
        &self,
        skill: &Skill,
    ) -> impl std::future::Future<Output = Result<Skill, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &SkillId,
    ) -> impl std::future::Future<Output = Result<Option<Skill>, RepositoryError>> + Send;

    fn get_by_name(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<Skill>, RepositoryError>> + Send;

    fn list(
        &self,
        filter: Option<SkillFilter>,
    ) -> impl std::future::Future<Output = Result<Vec<Skill>, RepositoryError>> + Send;

    fn update(
        &self,
        skill: &Skill,
    ) -> impl std::future::Future<Output = Result<Skill, RepositoryError>> + Send;

    fn delete(
        &self,
        id: &SkillId,
    ) -> impl std::future::Future<Output = Result<DeletionReport, RepositoryError>> + Send;
}
