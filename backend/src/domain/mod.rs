//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed records (users, projects, test cases),
//! the error taxonomy shared by every adapter, the ports adapters implement,
//! and the services implementing the account, project and test case
//! use-cases. Nothing here knows about HTTP or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure with a stable code.
//! - User, Project, TestCase and their drafts and identifiers.
//! - AccountServiceImpl, ProjectsService, TestCasesService.

pub mod account_service;
pub mod auth;
pub mod error;
pub(crate) mod identifier;
pub mod ports;
pub mod project;
pub mod projects_service;
pub mod test_case;
pub mod test_cases_service;
pub mod text;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountServiceImpl;
pub use self::auth::{
    AuthenticatedUser, CredentialsValidationError, IssuedSession, LoginCredentials, Registration,
    SessionToken,
};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::identifier::IdentifierError;
pub use self::project::{NewProject, Project, ProjectId, ProjectName, ProjectValidationError};
pub use self::projects_service::ProjectsService;
pub use self::test_case::{
    NewTestCase, StoredTestCase, TestCase, TestCaseFields, TestCaseId, TestCaseStatus,
    TestCaseTitle, TestCaseValidationError,
};
pub use self::test_cases_service::TestCasesService;
pub use self::trace_id::TraceId;
pub use self::user::{
    EmailAddress, PasswordHash, User, UserAccount, UserId, UserName, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use casebook::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::unauthorized("not authorized"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
