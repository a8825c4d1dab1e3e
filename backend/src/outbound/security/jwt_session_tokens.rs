//! HS256 JWT implementation of the [`SessionTokens`] port.
//!
//! Tokens carry `sub` (user id), `iat`, `exp` and a random `jti`. Expiry is
//! checked against the caller-supplied instant rather than the system clock
//! so the domain clock stays authoritative.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{SessionTokenError, SessionTokens};
use crate::domain::{IssuedSession, SessionToken, UserId};

/// Shortest signing secret accepted in release builds.
pub const MIN_SIGNING_KEY_LEN: usize = 32;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
    jti: String,
}

/// Issues and verifies HMAC-SHA256 signed session tokens.
#[derive(Clone)]
pub struct JwtSessionTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
}

impl JwtSessionTokens {
    /// Build an issuer from a shared secret and token lifetime.
    pub fn new(secret: &[u8], ttl: TimeDelta) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Lifetime applied to newly issued tokens.
    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }
}

impl SessionTokens for JwtSessionTokens {
    fn issue(&self, user: &UserId, now: DateTime<Utc>) -> Result<IssuedSession, SessionTokenError> {
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: user.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| SessionTokenError::signing(err.to_string()))?;
        Ok(IssuedSession {
            token: SessionToken::new(token),
            expires_at,
        })
    }

    fn verify(&self, token: &SessionToken, now: DateTime<Utc>) -> Result<UserId, SessionTokenError> {
        let data = jsonwebtoken::decode::<Claims>(token.as_str(), &self.decoding_key, &self.validation)
            .map_err(|err| SessionTokenError::invalid(err.to_string()))?;
        if data.claims.exp <= now.timestamp() {
            return Err(SessionTokenError::expired());
        }
        UserId::new(&data.claims.sub).map_err(|err| SessionTokenError::invalid(err.to_string()))
    }
}
