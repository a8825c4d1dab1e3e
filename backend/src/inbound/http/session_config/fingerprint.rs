//! Signing key fingerprinting for operational visibility.
//!
//! Operators can confirm which token signing key is active from the startup
//! log without the key material ever being written out.

use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Truncated SHA-256 fingerprint of `key`: the first 8 digest bytes as 16
/// lowercase hex characters.
///
/// # Examples
///
/// ```rust
/// use casebook::inbound::http::session_config::key_fingerprint;
///
/// let fp = key_fingerprint(&[b'k'; 32]);
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(key: &[u8]) -> String {
    let digest = Sha256::digest(key);
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
