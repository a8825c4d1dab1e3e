//! In-memory project store.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{ProjectRepository, ProjectRepositoryError};
use crate::domain::{Project, ProjectId, UserId};

use super::{read, write};

/// Process-local [`ProjectRepository`]; listings keep insertion order.
#[derive(Default)]
pub struct InMemoryProjectRepository {
    projects: RwLock<Vec<Project>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> ProjectRepositoryError {
    ProjectRepositoryError::query("project store lock poisoned")
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        write(&self.projects, poisoned)?.push(project.clone());
        Ok(())
    }

    async fn list_owned_by(&self, owner: &UserId) -> Result<Vec<Project>, ProjectRepositoryError> {
        Ok(read(&self.projects, poisoned)?
            .iter()
            .filter(|project| project.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn find_owned_by(
        &self,
        id: &ProjectId,
        owner: &UserId,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        Ok(read(&self.projects, poisoned)?
            .iter()
            .find(|project| project.id() == id && project.is_owned_by(owner))
            .cloned())
    }
}
