//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! request/response DTOs, and schema wrappers for domain types
//! ([`ErrorSchema`], [`ErrorCodeSchema`], [`TestCaseStatusSchema`]) so the
//! domain stays free of utoipa. Authenticated routes accept either a bearer
//! token or the `token` cookie.
//!
//! The generated document backs Swagger UI (debug builds) and is printed by
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::projects::{CreateProjectRequest, ProjectResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, TestCaseStatusSchema};
use crate::inbound::http::test_cases::{CreateTestCaseRequest, TestCaseResponse};
use crate::inbound::http::users::{LoginRequest, RegisterRequest, SessionResponse};
use utoipa::openapi::security::{
    ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme,
};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session security schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token returned by register or login."))
                    .build(),
            ),
        );
        components.add_security_scheme(
            "TokenCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "token",
                "HttpOnly cookie set by register or login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Casebook API",
        description = "Accounts, projects and owner-scoped test cases."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = []), ("TokenCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::projects::create_project,
        crate::inbound::http::projects::list_projects,
        crate::inbound::http::projects::get_project,
        crate::inbound::http::test_cases::create_test_case,
        crate::inbound::http::test_cases::list_test_cases,
        crate::inbound::http::health::root,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        TestCaseStatusSchema,
        RegisterRequest,
        LoginRequest,
        SessionResponse,
        CreateProjectRequest,
        ProjectResponse,
        CreateTestCaseRequest,
        TestCaseResponse,
    )),
    tags(
        (name = "users", description = "Registration and sessions"),
        (name = "projects", description = "Projects owned by the caller"),
        (name = "testcases", description = "Test cases within the caller's projects"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document's structure.

    use super::*;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/users/register",
            "/api/users/login",
            "/api/users/logout",
            "/api/projects",
            "/api/projects/{id}",
            "/api/testcases",
            "/api/testcases/project/{projectId}",
            "/",
            "/health/ready",
            "/health/live",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn security_schemes_are_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("BearerToken"));
        assert!(components.security_schemes.contains_key("TokenCookie"));
    }
}
