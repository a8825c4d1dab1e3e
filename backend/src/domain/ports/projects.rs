//! Driving ports for project use-cases.

use async_trait::async_trait;

use crate::domain::{Error, NewProject, Project, ProjectId, UserId};

/// Write-side project use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectsCommand: Send + Sync {
    /// Create a project owned by `owner`.
    async fn create_project(&self, owner: &UserId, draft: NewProject) -> Result<Project, Error>;
}

/// Read-side project use-cases. Every read is scoped to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectsQuery: Send + Sync {
    /// Projects owned by `owner`.
    async fn list_projects(&self, owner: &UserId) -> Result<Vec<Project>, Error>;

    /// One project owned by `owner`; a not-found error otherwise.
    async fn get_project(&self, owner: &UserId, id: &ProjectId) -> Result<Project, Error>;
}
