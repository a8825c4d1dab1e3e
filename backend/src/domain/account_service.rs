//! Account domain service: registration, login and session resolution.
//!
//! Password hashing runs on the blocking thread pool so argon2's deliberate
//! cost never stalls the request executor.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccountService, PasswordHashError, PasswordHasher, SessionTokenError, SessionTokens,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    AuthenticatedUser, Error, LoginCredentials, PasswordHash, Registration, SessionToken, User,
    UserAccount, UserId,
};

/// Message returned for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";
/// Message returned when a presented session cannot be used.
pub const NOT_AUTHORIZED: &str = "not authorized";
/// Message returned when registering an email that already has an account.
pub const USER_EXISTS: &str = "User already exists";

const DUMMY_PASSWORD: &str = "casebook-timing-equaliser";

/// Account service implementing the [`AccountService`] driving port.
pub struct AccountServiceImpl<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
    dummy_hash: PasswordHash,
}

impl<U, H: PasswordHasher, T> AccountServiceImpl<U, H, T> {
    /// Create a new service over the credential store, hasher and token
    /// issuer.
    ///
    /// The hash compared against on unknown-email logins is computed here,
    /// so the first such login costs the same as every later one.
    ///
    /// # Errors
    /// Returns [`PasswordHashError`] when that hash cannot be computed.
    pub fn new(
        users: Arc<U>,
        hasher: Arc<H>,
        tokens: Arc<T>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, PasswordHashError> {
        let dummy_hash = hasher.hash(DUMMY_PASSWORD)?;
        Ok(Self {
            users,
            hasher,
            tokens,
            clock,
            dummy_hash,
        })
    }
}

async fn run_blocking<F, R>(task: F) -> Result<R, Error>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| Error::internal(format!("blocking task failed: {err}")))
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => Error::conflict(USER_EXISTS),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

fn map_token_error(error: SessionTokenError) -> Error {
    match error {
        SessionTokenError::Signing { message } => {
            Error::internal(format!("session token signing failed: {message}"))
        }
        SessionTokenError::Invalid { .. } | SessionTokenError::Expired => {
            Error::unauthorized(NOT_AUTHORIZED)
        }
    }
}

impl<U, H, T> AccountServiceImpl<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: SessionTokens,
{
    async fn hash_password(&self, password: &str) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        run_blocking(move || hasher.hash(password.as_str()))
            .await?
            .map_err(map_hash_error)
    }

    async fn verify_password(&self, password: &str, hash: PasswordHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        run_blocking(move || hasher.verify(password.as_str(), &hash))
            .await?
            .map_err(map_hash_error)
    }

    fn sign_in(&self, user: User) -> Result<AuthenticatedUser, Error> {
        let session = self
            .tokens
            .issue(user.id(), self.clock.utc())
            .map_err(map_token_error)?;
        Ok(AuthenticatedUser { user, session })
    }
}

#[async_trait]
impl<U, H, T> AccountService for AccountServiceImpl<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: SessionTokens,
{
    async fn register(&self, registration: &Registration) -> Result<AuthenticatedUser, Error> {
        let existing = self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            debug!("registration rejected: email already registered");
            return Err(Error::conflict(USER_EXISTS));
        }

        let password_hash = self.hash_password(registration.password()).await?;
        let user = User::new(
            UserId::random(),
            registration.name().clone(),
            registration.email().clone(),
            self.clock.utc(),
        );
        let account = UserAccount::new(user, password_hash);
        self.users
            .insert(&account)
            .await
            .map_err(map_user_error)?;

        let user = account.into_user();
        info!(user_id = %user.id(), "user registered");
        self.sign_in(user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthenticatedUser, Error> {
        let account = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?;

        let Some(account) = account else {
            // Spend the same hashing effort as a real comparison.
            let dummy = self.dummy_hash.clone();
            let _ = self.verify_password(credentials.password(), dummy).await?;
            debug!("login rejected: unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .verify_password(credentials.password(), account.password_hash().clone())
            .await?;
        if !matches {
            debug!(user_id = %account.user().id(), "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let user = account.into_user();
        info!(user_id = %user.id(), "user logged in");
        self.sign_in(user)
    }

    async fn resolve_session(&self, token: &SessionToken) -> Result<UserId, Error> {
        let user_id = self
            .tokens
            .verify(token, self.clock.utc())
            .map_err(|err| {
                debug!(reason = %err, "session rejected");
                map_token_error(err)
            })?;

        let user = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(map_user_error)?;
        if user.is_none() {
            debug!(%user_id, "session rejected: account no longer exists");
            return Err(Error::unauthorized(NOT_AUTHORIZED));
        }
        Ok(user_id)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
