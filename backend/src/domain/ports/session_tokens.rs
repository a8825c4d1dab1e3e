//! Port for issuing and verifying stateless session tokens.

use chrono::{DateTime, Utc};

use crate::domain::{IssuedSession, SessionToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session token adapters.
    pub enum SessionTokenError {
        /// Token is malformed, badly signed or names no valid user.
        Invalid { message: String } => "session token rejected: {message}",
        /// Token was valid but its lifetime has passed.
        Expired => "session token expired",
        /// Token could not be signed.
        Signing { message: String } => "session token signing failed: {message}",
    }
}

/// Capability to mint and check session tokens.
///
/// Validity depends only on signature and expiry; nothing is stored server
/// side, so tokens cannot be revoked before they expire.
#[cfg_attr(test, mockall::automock)]
pub trait SessionTokens: Send + Sync {
    /// Mint a token for `user` valid from `now`.
    fn issue(&self, user: &UserId, now: DateTime<Utc>) -> Result<IssuedSession, SessionTokenError>;

    /// Resolve `token` to its user when it is authentic and unexpired at
    /// `now`.
    fn verify(&self, token: &SessionToken, now: DateTime<Utc>) -> Result<UserId, SessionTokenError>;
}
