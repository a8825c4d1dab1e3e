//! Shared cache-control policies for HTTP handlers.

/// Responses carrying session tokens or liveness state must never be cached.
pub const NO_STORE: &str = "no-store";

/// Build the cache-control header tuple forbidding any caching.
pub const fn no_store_header() -> (&'static str, &'static str) {
    ("Cache-Control", NO_STORE)
}
