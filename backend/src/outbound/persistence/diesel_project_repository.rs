//! PostgreSQL-backed `ProjectRepository` implementation using Diesel ORM.
//!
//! Every read filters on `user_id` in SQL, so rows owned by other users
//! never leave the database.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ProjectRepository, ProjectRepositoryError};
use crate::domain::{Project, ProjectId, ProjectName, UserId};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewProjectRow, ProjectRow};
use super::pool::{DbPool, PoolError};
use super::schema::projects;

/// Diesel-backed project store.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProjectRepositoryError {
    ProjectRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &'static str) -> ProjectRepositoryError {
    match classify_diesel_error(error, operation) {
        DieselFailure::Connection => ProjectRepositoryError::connection("database connection error"),
        DieselFailure::UniqueViolation { .. } => ProjectRepositoryError::query("duplicate project"),
        DieselFailure::Query(message) => ProjectRepositoryError::query(message),
    }
}

fn row_to_project(row: ProjectRow) -> Result<Project, ProjectRepositoryError> {
    let name = ProjectName::new(&row.name).map_err(|err| {
        warn!(project_id = %row.id, "stored project row failed validation");
        ProjectRepositoryError::query(format!("stored project is invalid: {err}"))
    })?;
    Ok(Project::from_parts(
        ProjectId::from_uuid(row.id),
        name,
        row.description,
        UserId::from_uuid(row.user_id),
        row.created_at,
        row.updated_at,
    ))
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewProjectRow {
            id: *project.id().as_uuid(),
            user_id: *project.owner().as_uuid(),
            name: project.name().as_ref(),
            description: project.description(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        };

        diesel::insert_into(projects::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "insert project"))
    }

    async fn list_owned_by(&self, owner: &UserId) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ProjectRow> = projects::table
            .filter(projects::user_id.eq(owner.as_uuid()))
            .order((projects::created_at.asc(), projects::id.asc()))
            .select(ProjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list projects"))?;

        rows.into_iter().map(row_to_project).collect()
    }

    async fn find_owned_by(
        &self,
        id: &ProjectId,
        owner: &UserId,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ProjectRow> = projects::table
            .filter(
                projects::id
                    .eq(id.as_uuid())
                    .and(projects::user_id.eq(owner.as_uuid())),
            )
            .select(ProjectRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find project"))?;

        row.map(row_to_project).transpose()
    }
}
