//! Port abstraction for project persistence.
use async_trait::async_trait;

use crate::domain::{Project, ProjectId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by project repository adapters.
    pub enum ProjectRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "project repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "project repository query failed: {message}",
    }
}

/// Owner-scoped project store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Persist a new project.
    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError>;

    /// All projects owned by `owner`, oldest first.
    async fn list_owned_by(&self, owner: &UserId) -> Result<Vec<Project>, ProjectRepositoryError>;

    /// The project with `id`, only when `owner` owns it.
    ///
    /// Absent and foreign projects are indistinguishable: both yield `None`.
    async fn find_owned_by(
        &self,
        id: &ProjectId,
        owner: &UserId,
    ) -> Result<Option<Project>, ProjectRepositoryError>;
}
