//! Tests for account API handlers.

use super::*;
use crate::domain::account_service::{INVALID_CREDENTIALS, USER_EXISTS};
use crate::domain::ports::MockAccountService;
use crate::domain::{EmailAddress, Error, IssuedSession, SessionToken, User, UserId, UserName};
use crate::inbound::http::error::json_config;
use crate::inbound::http::session::TOKEN_COOKIE;
use crate::inbound::http::test_utils::{state_with_accounts, test_app_data};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::{Value, json};

const USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn signed_in_alice() -> AuthenticatedUser {
    let created_at = Utc
        .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp");
    AuthenticatedUser {
        user: User::new(
            UserId::new(USER_ID).expect("fixture id"),
            UserName::new("Alice").expect("name"),
            EmailAddress::new("alice@example.com").expect("email"),
            created_at,
        ),
        session: IssuedSession {
            token: SessionToken::new("issued.session.token"),
            expires_at: created_at + chrono::TimeDelta::hours(1),
        },
    }
}

async fn post_json(accounts: MockAccountService, uri: &str, body: Value) -> actix_web::dev::ServiceResponse {
    let app = actix_test::init_service(
        App::new()
            .app_data(test_app_data(state_with_accounts(accounts)))
            .app_data(json_config())
            .configure(configure),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(&body)
        .to_request();
    actix_test::call_service(&app, request).await
}

#[rstest]
#[actix_web::test]
async fn register_returns_created_user_with_token_and_cookie() {
    let mut accounts = MockAccountService::new();
    accounts
        .expect_register()
        .withf(|registration| {
            registration.name().as_ref() == "Alice"
                && registration.email().as_ref() == "alice@example.com"
                && registration.password() == "pw123"
        })
        .times(1)
        .returning(|_| Ok(signed_in_alice()));

    let response = post_json(
        accounts,
        "/api/users/register",
        json!({"name": "Alice", "email": "alice@example.com", "password": "pw123"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == TOKEN_COOKIE)
        .expect("token cookie set");
    assert_eq!(cookie.value(), "issued.session.token");
    assert_eq!(cookie.http_only(), Some(true));
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({
            "_id": USER_ID,
            "name": "Alice",
            "email": "alice@example.com",
            "token": "issued.session.token",
        })
    );
}

#[rstest]
#[case(json!({"name": "  ", "email": "alice@example.com", "password": "pw123"}), "name")]
#[case(json!({"name": "Alice", "password": "pw123"}), "email")]
#[case(json!({"name": "Alice", "email": "alice@example.com", "password": ""}), "password")]
#[actix_web::test]
async fn register_rejects_incomplete_payloads(#[case] body: Value, #[case] field: &str) {
    let mut accounts = MockAccountService::new();
    accounts.expect_register().never();

    let response = post_json(accounts, "/api/users/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["details"]["field"], field);
    assert_eq!(value["details"]["code"], "empty_field");
}

#[rstest]
#[actix_web::test]
async fn register_reports_duplicate_email_as_conflict() {
    let mut accounts = MockAccountService::new();
    accounts
        .expect_register()
        .returning(|_| Err(Error::conflict(USER_EXISTS)));

    let response = post_json(
        accounts,
        "/api/users/register",
        json!({"name": "Alice", "email": "alice@example.com", "password": "pw123"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["message"], USER_EXISTS);
}

#[rstest]
#[actix_web::test]
async fn login_returns_session_on_success() {
    let mut accounts = MockAccountService::new();
    accounts
        .expect_login()
        .withf(|credentials| {
            credentials.email().as_ref() == "alice@example.com" && credentials.password() == "pw123"
        })
        .returning(|_| Ok(signed_in_alice()));

    let response = post_json(
        accounts,
        "/api/users/login",
        json!({"email": "alice@example.com", "password": "pw123"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("cache-control")
            .and_then(|value| value.to_str().ok()),
        Some("no-store")
    );
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["token"], "issued.session.token");
    assert_eq!(body["_id"], USER_ID);
}

#[rstest]
#[actix_web::test]
async fn login_rejects_bad_credentials_without_cookie() {
    let mut accounts = MockAccountService::new();
    accounts
        .expect_login()
        .returning(|_| Err(Error::unauthorized(INVALID_CREDENTIALS)));

    let response = post_json(
        accounts,
        "/api/users/login",
        json!({"email": "alice@example.com", "password": "wrong"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.response().cookies().next().is_none());
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["message"], INVALID_CREDENTIALS);
}

#[rstest]
#[actix_web::test]
async fn login_rejects_malformed_json() {
    let mut accounts = MockAccountService::new();
    accounts.expect_login().never();
    let app = actix_test::init_service(
        App::new()
            .app_data(test_app_data(state_with_accounts(accounts)))
            .app_data(json_config())
            .configure(configure),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri("/api/users/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\":")
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["details"]["code"], "invalid_json");
}

#[rstest]
#[actix_web::test]
async fn logout_expires_the_cookie() {
    let response = post_json(MockAccountService::new(), "/api/users/logout", json!({})).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookie = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == TOKEN_COOKIE)
        .expect("removal cookie set");
    assert_eq!(cookie.value(), "");
    assert_eq!(
        cookie.max_age(),
        Some(actix_web::cookie::time::Duration::ZERO)
    );
}
