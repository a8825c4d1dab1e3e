//! Application settings and the server configuration object built from them.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use actix_web::http::Uri;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::session_config::SessionSettings;
use crate::outbound::persistence::DbPool;

const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";

/// A configured CORS origin that browsers could never send.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("allowed origin {value:?} must be an http(s) origin such as https://app.example.com")]
pub struct InvalidOrigin {
    pub value: String,
}

/// Check that `origin` is a single `scheme://host[:port]` browser origin.
///
/// Wildcards, paths and query strings are rejected because credentialed CORS
/// needs an exact origin.
///
/// # Errors
/// Returns [`InvalidOrigin`] naming the rejected value.
///
/// # Examples
/// ```
/// use casebook::server::validate_origin;
///
/// assert!(validate_origin("https://app.example.com:8443").is_ok());
/// assert!(validate_origin("*").is_err());
/// ```
pub fn validate_origin(origin: &str) -> Result<(), InvalidOrigin> {
    let invalid = || InvalidOrigin {
        value: origin.to_owned(),
    };
    let uri: Uri = origin.parse().map_err(|_| invalid())?;
    let http_scheme = matches!(uri.scheme_str(), Some("http" | "https"));
    let bare_host = uri.host().is_some_and(|host| !host.is_empty())
        && uri.path() == "/"
        && uri.query().is_none()
        && !origin.ends_with('/');
    if http_scheme && bare_host {
        Ok(())
    } else {
        Err(invalid())
    }
}

/// Process-level settings loaded from `CASEBOOK_*` variables and flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CASEBOOK")]
pub struct AppSettings {
    /// TCP port to listen on.
    #[ortho_config(default = 5000)]
    pub port: u16,
    /// Interface to bind; defaults to every IPv4 interface.
    pub bind_host: Option<String>,
    /// PostgreSQL connection string. Without it records live in memory.
    pub database_url: Option<String>,
    /// Browser origin allowed to call the API with credentials.
    pub allowed_origin: Option<String>,
}

impl AppSettings {
    pub fn bind_host(&self) -> &str {
        self.bind_host.as_deref().unwrap_or(DEFAULT_BIND_HOST)
    }

    /// The CORS origin, validated.
    ///
    /// # Errors
    /// Returns [`InvalidOrigin`] when the configured value is not an exact
    /// http(s) origin.
    pub fn allowed_origin(&self) -> Result<&str, InvalidOrigin> {
        let origin = self
            .allowed_origin
            .as_deref()
            .unwrap_or(DEFAULT_ALLOWED_ORIGIN);
        validate_origin(origin)?;
        Ok(origin)
    }

    /// Resolve the configured host and port to a socket address.
    ///
    /// # Errors
    /// Returns an I/O error when the host does not resolve.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        (self.bind_host(), self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::other(format!("bind host {} did not resolve", self.bind_host()))
            })
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) allowed_origin: String,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        session: SessionSettings,
        bind_addr: SocketAddr,
        allowed_origin: impl Into<String>,
    ) -> Self {
        Self {
            session,
            bind_addr,
            allowed_origin: allowed_origin.into(),
            db_pool: None,
        }
    }

    /// Attach a database connection pool; repositories then use PostgreSQL
    /// instead of process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
