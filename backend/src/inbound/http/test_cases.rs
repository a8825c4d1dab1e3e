//! Test case API handlers.
//!
//! ```text
//! POST /api/testcases {"title":"Check login","projectId":"<uuid>","status":"Passed"}
//! GET /api/testcases/project/{projectId}
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Error, NewTestCase, ProjectId, TestCase, TestCaseFields};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::{ErrorSchema, TestCaseStatusSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_uuid_error, test_case_error};

const PROJECT_ID_FIELD: FieldName = FieldName::new("projectId");

/// Request body for `POST /api/testcases`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestCaseRequest {
    #[serde(default)]
    #[schema(example = "Check login")]
    pub title: String,
    pub description: Option<String>,
    pub steps: Option<String>,
    pub expected_result: Option<String>,
    /// Defaults to `Not Run` when omitted.
    #[schema(value_type = Option<TestCaseStatusSchema>, example = "Not Run")]
    pub status: Option<String>,
    #[serde(default)]
    #[schema(example = "7d0f6a6e-4b5c-4a2f-9c53-0f1b2c3d4e5f")]
    pub project_id: String,
}

impl CreateTestCaseRequest {
    fn to_draft(&self) -> Result<NewTestCase, Error> {
        let project_id = ProjectId::new(&self.project_id)
            .map_err(|_| invalid_uuid_error(PROJECT_ID_FIELD, &self.project_id))?;
        NewTestCase::try_from_fields(
            project_id,
            TestCaseFields {
                title: &self.title,
                description: self.description.as_deref(),
                steps: self.steps.as_deref(),
                expected_result: self.expected_result.as_deref(),
                status: self.status.as_deref(),
            },
        )
        .map_err(test_case_error)
    }
}

/// Test case as returned to clients.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_result: Option<String>,
    #[schema(value_type = TestCaseStatusSchema, example = "Not Run")]
    pub status: String,
    pub project_id: String,
    /// User who created the test case.
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&TestCase> for TestCaseResponse {
    fn from(test_case: &TestCase) -> Self {
        Self {
            id: test_case.id().to_string(),
            title: test_case.title().as_ref().to_owned(),
            description: test_case.description().map(str::to_owned),
            steps: test_case.steps().map(str::to_owned),
            expected_result: test_case.expected_result().map(str::to_owned),
            status: test_case.status().as_str().to_owned(),
            project_id: test_case.project_id().to_string(),
            user_id: test_case.owner().to_string(),
            created_at: test_case.created_at(),
            updated_at: test_case.updated_at(),
        }
    }
}

/// Attach a test case to one of the caller's projects.
#[utoipa::path(
    post,
    path = "/api/testcases",
    request_body = CreateTestCaseRequest,
    responses(
        (status = 201, description = "Test case created", body = TestCaseResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Not authorized", body = ErrorSchema),
        (status = 404, description = "Project not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["testcases"],
    operation_id = "createTestCase"
)]
#[post("")]
pub async fn create_test_case(
    caller: Authenticated,
    state: web::Data<HttpState>,
    payload: web::Json<CreateTestCaseRequest>,
) -> ApiResult<HttpResponse> {
    let draft = payload.to_draft()?;
    let created = state
        .test_cases
        .create_test_case(caller.user_id(), draft)
        .await?;
    Ok(HttpResponse::Created().json(TestCaseResponse::from(&created)))
}

/// List the caller's test cases under a project.
///
/// A malformed project id cannot match anything, so it yields an empty list.
#[utoipa::path(
    get,
    path = "/api/testcases/project/{projectId}",
    params(("projectId" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Test cases created by the caller", body = [TestCaseResponse]),
        (status = 401, description = "Not authorized", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["testcases"],
    operation_id = "listTestCasesByProject"
)]
#[get("/project/{project_id}")]
pub async fn list_test_cases(
    caller: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<TestCaseResponse>>> {
    let Ok(project_id) = ProjectId::new(path.as_str()) else {
        debug!("malformed project id in listing");
        return Ok(web::Json(Vec::new()));
    };
    let test_cases = state
        .test_cases_query
        .list_test_cases(caller.user_id(), &project_id)
        .await?;
    Ok(web::Json(test_cases.iter().map(TestCaseResponse::from).collect()))
}

/// Register the test case routes under `/api/testcases`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/testcases")
            .service(create_test_case)
            .service(list_test_cases),
    );
}

#[cfg(test)]
#[path = "test_cases_tests.rs"]
mod tests;
