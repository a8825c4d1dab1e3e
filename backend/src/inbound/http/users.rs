//! Account API handlers.
//!
//! ```text
//! POST /api/users/register {"name":"Alice","email":"alice@example.com","password":"pw123"}
//! POST /api/users/login {"email":"alice@example.com","password":"pw123"}
//! POST /api/users/logout
//! ```
//!
//! Register and login answer with the user and a session token, and also
//! set the token as an `HttpOnly` cookie for browser clients.

use actix_web::{HttpResponse, HttpResponseBuilder, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroize;

use crate::domain::{AuthenticatedUser, CredentialsValidationError, LoginCredentials, Registration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::no_store_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::credentials_error;

/// Registration request body for `POST /api/users/register`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    #[schema(example = "Alice")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "pw123")]
    pub password: String,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = CredentialsValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        let RegisterRequest {
            name,
            email,
            mut password,
        } = value;
        let registration = Self::try_from_parts(&name, &email, &password);
        password.zeroize();
        registration
    }
}

/// Login request body for `POST /api/users/login`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "pw123")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = CredentialsValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        let LoginRequest {
            email,
            mut password,
        } = value;
        let credentials = Self::try_from_parts(&email, &password);
        password.zeroize();
        credentials
    }
}

/// Signed-in user together with the session token.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct SessionResponse {
    /// Stable user identifier.
    #[serde(rename = "_id")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Bearer token; also set as the `token` cookie.
    pub token: String,
}

impl From<&AuthenticatedUser> for SessionResponse {
    fn from(value: &AuthenticatedUser) -> Self {
        Self {
            id: value.user.id().to_string(),
            name: value.user.name().to_string(),
            email: value.user.email().to_string(),
            token: value.session.token.as_str().to_owned(),
        }
    }
}

fn signed_in_response(
    mut builder: HttpResponseBuilder,
    state: &HttpState,
    signed_in: &AuthenticatedUser,
) -> HttpResponse {
    builder
        .cookie(state.cookies.issue(&signed_in.session))
        .insert_header(no_store_header())
        .json(SessionResponse::from(signed_in))
}

/// Create an account and sign the new user in.
#[utoipa::path(
    post,
    path = "/api/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = SessionResponse,
            headers(("Set-Cookie" = String, description = "Session token cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from(payload.into_inner()).map_err(credentials_error)?;
    let signed_in = state.accounts.register(&registration).await?;
    Ok(signed_in_response(
        HttpResponse::Created(),
        &state,
        &signed_in,
    ))
}

/// Check credentials and establish a session.
///
/// Unknown emails and wrong passwords produce the same `401` so callers
/// cannot probe which accounts exist.
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = SessionResponse,
            headers(("Set-Cookie" = String, description = "Session token cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner()).map_err(credentials_error)?;
    let signed_in = state.accounts.login(&credentials).await?;
    Ok(signed_in_response(HttpResponse::Ok(), &state, &signed_in))
}

/// Clear the session cookie.
///
/// Tokens are stateless, so a copy of the token held elsewhere stays valid
/// until it expires.
#[utoipa::path(
    post,
    path = "/api/users/logout",
    responses(
        (status = 204, description = "Cookie cleared",
            headers(("Set-Cookie" = String, description = "Expired session token cookie")))
    ),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::NoContent()
        .cookie(state.cookies.expired())
        .insert_header(no_store_header())
        .finish()
}

/// Register the account routes under `/api/users`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .service(register)
            .service(login)
            .service(logout),
    );
}

#[cfg(test)]
mod tests;
