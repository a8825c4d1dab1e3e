//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountService, ProjectsCommand, ProjectsQuery, TestCasesCommand, TestCasesQuery,
};
use crate::inbound::http::session::SessionCookies;

/// Parameter object bundling the use-case ports handlers call.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountService>,
    pub projects: Arc<dyn ProjectsCommand>,
    pub projects_query: Arc<dyn ProjectsQuery>,
    pub test_cases: Arc<dyn TestCasesCommand>,
    pub test_cases_query: Arc<dyn TestCasesQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub projects: Arc<dyn ProjectsCommand>,
    pub projects_query: Arc<dyn ProjectsQuery>,
    pub test_cases: Arc<dyn TestCasesCommand>,
    pub test_cases_query: Arc<dyn TestCasesQuery>,
    pub cookies: SessionCookies,
}

impl HttpState {
    /// Construct state from the port bundle and `token` cookie attributes.
    pub fn new(ports: HttpStatePorts, cookies: SessionCookies) -> Self {
        let HttpStatePorts {
            accounts,
            projects,
            projects_query,
            test_cases,
            test_cases_query,
        } = ports;
        Self {
            accounts,
            projects,
            projects_query,
            test_cases,
            test_cases_query,
            cookies,
        }
    }
}
