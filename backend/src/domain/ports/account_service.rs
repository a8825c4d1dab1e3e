//! Driving port for registration, login and session resolution.
//!
//! Inbound adapters call it to authenticate callers without knowing (or
//! importing) the credential store, the password hasher or the token format.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, Error, LoginCredentials, Registration, SessionToken, UserId};

/// Domain use-case port for account authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account and sign the new user in.
    ///
    /// Fails with a conflict when the email is already registered.
    async fn register(&self, registration: &Registration) -> Result<AuthenticatedUser, Error>;

    /// Check credentials and sign the user in.
    ///
    /// Unknown emails and wrong passwords fail with the same unauthorised
    /// error.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthenticatedUser, Error>;

    /// Resolve a presented session token to the user it was issued for.
    ///
    /// Tokens for accounts that no longer exist are unauthorised.
    async fn resolve_session(&self, token: &SessionToken) -> Result<UserId, Error>;
}
