//! Project API handlers.
//!
//! ```text
//! POST /api/projects {"name":"Login Flow","description":"Sign-in paths"}
//! GET /api/projects
//! GET /api/projects/{id}
//! ```
//!
//! Every route sits behind the access guard and only ever sees projects
//! owned by the caller.

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::projects_service::PROJECT_NOT_FOUND;
use crate::domain::{Error, NewProject, Project, ProjectId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::project_error;

/// Request body for `POST /api/projects`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[serde(default)]
    #[schema(example = "Login Flow")]
    pub name: String,
    #[schema(example = "Sign-in and session paths")]
    pub description: Option<String>,
}

impl TryFrom<&CreateProjectRequest> for NewProject {
    type Error = crate::domain::ProjectValidationError;

    fn try_from(value: &CreateProjectRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.name, value.description.as_deref())
    }
}

/// Project as returned to clients.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    #[serde(rename = "_id")]
    #[schema(example = "7d0f6a6e-4b5c-4a2f-9c53-0f1b2c3d4e5f")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owner of the project.
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Project> for ProjectResponse {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id().to_string(),
            name: project.name().to_string(),
            description: project.description().map(str::to_owned),
            user_id: project.owner().to_string(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }
}

/// Create a project owned by the caller.
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Not authorized", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "createProject"
)]
#[post("")]
pub async fn create_project(
    caller: Authenticated,
    state: web::Data<HttpState>,
    payload: web::Json<CreateProjectRequest>,
) -> ApiResult<HttpResponse> {
    let draft = NewProject::try_from(&*payload).map_err(project_error)?;
    let project = state
        .projects
        .create_project(caller.user_id(), draft)
        .await?;
    Ok(HttpResponse::Created().json(ProjectResponse::from(&project)))
}

/// List the caller's projects, oldest first.
#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "Projects owned by the caller", body = [ProjectResponse]),
        (status = 401, description = "Not authorized", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "listProjects"
)]
#[get("")]
pub async fn list_projects(
    caller: Authenticated,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ProjectResponse>>> {
    let projects = state.projects_query.list_projects(caller.user_id()).await?;
    Ok(web::Json(projects.iter().map(ProjectResponse::from).collect()))
}

/// Fetch one of the caller's projects.
///
/// Absent projects, projects owned by someone else and malformed ids all
/// answer `404` so the response never confirms that an id exists.
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(("id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Project", body = ProjectResponse),
        (status = 401, description = "Not authorized", body = ErrorSchema),
        (status = 404, description = "Project not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "getProject"
)]
#[get("/{id}")]
pub async fn get_project(
    caller: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProjectResponse>> {
    let id = ProjectId::new(path.as_str()).map_err(|err| {
        debug!(error = %err, "malformed project id");
        Error::not_found(PROJECT_NOT_FOUND)
    })?;
    let project = state
        .projects_query
        .get_project(caller.user_id(), &id)
        .await?;
    Ok(web::Json(ProjectResponse::from(&project)))
}

/// Register the project routes under `/api/projects`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/projects")
            .service(create_project)
            .service(list_projects)
            .service(get_project),
    );
}
