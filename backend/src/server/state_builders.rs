//! Builders wiring repositories, security adapters and services into
//! [`HttpState`].

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::warn;

use crate::domain::ports::{
    PasswordHashError, ProjectRepository, TestCaseRepository, UserRepository,
};
use crate::domain::{AccountServiceImpl, ProjectsService, TestCasesService};
use crate::inbound::http::session::SessionCookies;
use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{
    InMemoryProjectRepository, InMemoryTestCaseRepository, InMemoryUserRepository,
};
use crate::outbound::persistence::{
    DbPool, DieselProjectRepository, DieselTestCaseRepository, DieselUserRepository,
};
use crate::outbound::security::{Argon2PasswordHasher, JwtSessionTokens};

use super::ServerConfig;

/// Repository adapters backing one server instance.
struct Stores<U, P, T> {
    users: Arc<U>,
    projects: Arc<P>,
    test_cases: Arc<T>,
}

impl Stores<DieselUserRepository, DieselProjectRepository, DieselTestCaseRepository> {
    fn diesel(pool: &DbPool) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            projects: Arc::new(DieselProjectRepository::new(pool.clone())),
            test_cases: Arc::new(DieselTestCaseRepository::new(pool.clone())),
        }
    }
}

impl Stores<InMemoryUserRepository, InMemoryProjectRepository, InMemoryTestCaseRepository> {
    fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            projects: Arc::new(InMemoryProjectRepository::new()),
            test_cases: Arc::new(InMemoryTestCaseRepository::new()),
        }
    }
}

/// Compose the use-case services over `stores`.
///
/// Projects and test cases share one project repository so ownership checks
/// on test case creation see the same records listings do.
fn build_ports<U, P, T>(
    stores: Stores<U, P, T>,
    session: &SessionSettings,
    clock: Arc<dyn Clock>,
) -> Result<HttpStatePorts, PasswordHashError>
where
    U: UserRepository + 'static,
    P: ProjectRepository + 'static,
    T: TestCaseRepository + 'static,
{
    let Stores {
        users,
        projects,
        test_cases,
    } = stores;
    let tokens = Arc::new(JwtSessionTokens::new(
        session.signing_key.as_bytes(),
        session.ttl,
    ));
    let accounts = Arc::new(AccountServiceImpl::new(
        users,
        Arc::new(Argon2PasswordHasher::new()),
        tokens,
        clock.clone(),
    )?);
    let projects_service = Arc::new(ProjectsService::new(projects.clone(), clock.clone()));
    let test_cases_service = Arc::new(TestCasesService::new(test_cases, projects, clock));

    Ok(HttpStatePorts {
        accounts,
        projects: projects_service.clone(),
        projects_query: projects_service,
        test_cases: test_cases_service.clone(),
        test_cases_query: test_cases_service,
    })
}

/// Build the shared HTTP state for `config`.
///
/// Uses Diesel repositories when a pool is attached, otherwise process-local
/// stores whose contents vanish on restart.
///
/// # Errors
/// Returns [`PasswordHashError`] when the account service cannot be built.
pub(super) fn build_http_state(
    config: &ServerConfig,
) -> Result<web::Data<HttpState>, PasswordHashError> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let ports = match &config.db_pool {
        Some(pool) => build_ports(Stores::diesel(pool), &config.session, clock),
        None => {
            warn!("no database configured; records are kept in memory only");
            build_ports(Stores::in_memory(), &config.session, clock)
        }
    }?;
    Ok(web::Data::new(HttpState::new(
        ports,
        SessionCookies::from_settings(&config.session),
    )))
}
