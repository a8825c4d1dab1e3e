//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::cookie::SameSite;
use actix_web::http::header::AUTHORIZATION;
use actix_web::web;
use chrono::TimeDelta;

use crate::domain::account_service::NOT_AUTHORIZED;
use crate::domain::ports::{
    MockAccountService, MockProjectsCommand, MockProjectsQuery, MockTestCasesCommand,
    MockTestCasesQuery,
};
use crate::domain::{Error, UserId};
use crate::inbound::http::session::SessionCookies;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Token the mock account service in [`accounts_accepting`] recognises.
pub const TEST_TOKEN: &str = "test.session.token";

/// Mocks for every use-case port; unset expectations panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub accounts: MockAccountService,
    pub projects: MockProjectsCommand,
    pub projects_query: MockProjectsQuery,
    pub test_cases: MockTestCasesCommand,
    pub test_cases_query: MockTestCasesQuery,
}

/// Cookie attributes for local HTTP tests: not `Secure`, one hour.
pub fn test_cookies() -> SessionCookies {
    SessionCookies::new(false, SameSite::Lax, TimeDelta::hours(1))
}

pub fn state_from_mocks(ports: MockPorts) -> HttpState {
    HttpState::new(
        HttpStatePorts {
            accounts: Arc::new(ports.accounts),
            projects: Arc::new(ports.projects),
            projects_query: Arc::new(ports.projects_query),
            test_cases: Arc::new(ports.test_cases),
            test_cases_query: Arc::new(ports.test_cases_query),
        },
        test_cookies(),
    )
}

pub fn state_with_accounts(accounts: MockAccountService) -> HttpState {
    state_from_mocks(MockPorts {
        accounts,
        ..MockPorts::default()
    })
}

pub fn test_app_data(state: HttpState) -> web::Data<HttpState> {
    web::Data::new(state)
}

/// Account service resolving [`TEST_TOKEN`] to `user` and rejecting
/// anything else.
pub fn accounts_accepting(user: UserId) -> MockAccountService {
    let mut accounts = MockAccountService::new();
    accounts.expect_resolve_session().returning(move |token| {
        if token.as_str() == TEST_TOKEN {
            Ok(user)
        } else {
            Err(Error::unauthorized(NOT_AUTHORIZED))
        }
    });
    accounts
}

/// `Authorization` header presenting [`TEST_TOKEN`].
pub fn bearer_header() -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {TEST_TOKEN}"))
}
