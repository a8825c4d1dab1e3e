//! Project domain service: owner-scoped creation and reads.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    ProjectRepository, ProjectRepositoryError, ProjectsCommand, ProjectsQuery,
};
use crate::domain::{Error, NewProject, Project, ProjectId, UserId};

/// Message returned when a project is absent or owned by someone else.
pub const PROJECT_NOT_FOUND: &str = "Project not found";

pub(crate) fn map_project_error(error: ProjectRepositoryError) -> Error {
    match error {
        ProjectRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("project repository unavailable: {message}"))
        }
        ProjectRepositoryError::Query { message } => {
            Error::internal(format!("project repository error: {message}"))
        }
    }
}

/// Project service implementing the project driving ports.
#[derive(Clone)]
pub struct ProjectsService<P> {
    projects: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<P> ProjectsService<P> {
    pub fn new(projects: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self { projects, clock }
    }
}

#[async_trait]
impl<P> ProjectsCommand for ProjectsService<P>
where
    P: ProjectRepository,
{
    async fn create_project(&self, owner: &UserId, draft: NewProject) -> Result<Project, Error> {
        let project = draft.into_project(ProjectId::random(), *owner, self.clock.utc());
        self.projects
            .insert(&project)
            .await
            .map_err(map_project_error)?;
        info!(project_id = %project.id(), owner = %owner, "project created");
        Ok(project)
    }
}

#[async_trait]
impl<P> ProjectsQuery for ProjectsService<P>
where
    P: ProjectRepository,
{
    async fn list_projects(&self, owner: &UserId) -> Result<Vec<Project>, Error> {
        self.projects
            .list_owned_by(owner)
            .await
            .map_err(map_project_error)
    }

    async fn get_project(&self, owner: &UserId, id: &ProjectId) -> Result<Project, Error> {
        self.projects
            .find_owned_by(id, owner)
            .await
            .map_err(map_project_error)?
            .ok_or_else(|| Error::not_found(PROJECT_NOT_FOUND))
    }
}
