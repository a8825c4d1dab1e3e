//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror the serialised shape of their domain counterparts
//! and are registered under the domain type's name.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The session token is missing, invalid or expired, or the login
    /// credentials did not match.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The resource does not exist or belongs to someone else.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request collides with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing service is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message, suitable for showing to users.
    #[schema(example = "title must not be empty")]
    message: String,
    /// Request trace identifier, echoed in the `trace-id` header.
    #[schema(rename = "traceId", example = "0c6f1b0e-5c55-4b8e-9a38-2f0c8f3c2c11")]
    trace_id: Option<String>,
    /// Supplementary details such as the offending field.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::TestCaseStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::TestCaseStatus)]
pub enum TestCaseStatusSchema {
    #[schema(rename = "Passed")]
    Passed,
    #[schema(rename = "Failed")]
    Failed,
    #[schema(rename = "Blocked")]
    Blocked,
    /// Default for new test cases.
    #[schema(rename = "Not Run")]
    NotRun,
}
