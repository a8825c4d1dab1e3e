//! Security adapters: argon2 password hashing and JWT session tokens.

mod argon2_hasher;
mod jwt_session_tokens;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt_session_tokens::{JwtSessionTokens, MIN_SIGNING_KEY_LEN};
