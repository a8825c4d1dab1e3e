//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`], [`SessionTokens`]) are
//! implemented by outbound adapters. Driving ports ([`AccountService`],
//! [`ProjectsCommand`], [`ProjectsQuery`], [`TestCasesCommand`],
//! [`TestCasesQuery`]) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod password_hasher;
mod project_repository;
mod projects;
mod session_tokens;
mod test_case_repository;
mod test_cases;
mod user_repository;

pub use account_service::AccountService;
#[cfg(test)]
pub use account_service::MockAccountService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::{ProjectRepository, ProjectRepositoryError};
#[cfg(test)]
pub use projects::{MockProjectsCommand, MockProjectsQuery};
pub use projects::{ProjectsCommand, ProjectsQuery};
#[cfg(test)]
pub use session_tokens::MockSessionTokens;
pub use session_tokens::{SessionTokenError, SessionTokens};
#[cfg(test)]
pub use test_case_repository::MockTestCaseRepository;
pub use test_case_repository::{TestCaseRepository, TestCaseRepositoryError};
#[cfg(test)]
pub use test_cases::{MockTestCasesCommand, MockTestCasesQuery};
pub use test_cases::{TestCasesCommand, TestCasesQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
