//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, InvalidOrigin, ServerConfig, validate_origin};

use state_builders::build_http_state;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::PasswordHashError;
use crate::inbound::http::error::json_config;
use crate::inbound::http::health::{HealthState, live, ready, root};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{projects, test_cases, users};
use crate::outbound::persistence::{
    DbPool, MigrationError, PoolConfig, PoolError, run_pending_migrations,
};

const CORS_MAX_AGE_SECS: usize = 3600;

/// Errors raised while preparing the database before the server binds.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseSetupError {
    #[error(transparent)]
    Migration(#[from] MigrationError),
    #[error("migration task failed: {0}")]
    MigrationTask(String),
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Apply pending migrations, then open the connection pool.
///
/// # Errors
/// Returns [`DatabaseSetupError`] when migrations fail or the pool cannot be
/// built.
pub async fn prepare_database(database_url: &str) -> Result<DbPool, DatabaseSetupError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .map_err(|err| DatabaseSetupError::MigrationTask(err.to_string()))??;
    info!(applied, "database schema up to date");
    Ok(DbPool::new(PoolConfig::new(database_url)).await?)
}

/// Shared pieces every worker's [`App`] is built from.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub allowed_origin: String,
}

impl AppDependencies {
    /// Wire repositories and services for `config`.
    ///
    /// # Errors
    /// Returns [`PasswordHashError`] when the account service cannot hash
    /// its login timing password.
    pub fn from_config(
        health_state: web::Data<HealthState>,
        config: &ServerConfig,
    ) -> Result<Self, PasswordHashError> {
        Ok(Self {
            health_state,
            http_state: build_http_state(config)?,
            allowed_origin: config.allowed_origin.clone(),
        })
    }
}

fn cors(allowed_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(allowed_origin)
        .allowed_methods(["GET", "POST"])
        .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .supports_credentials()
        .max_age(CORS_MAX_AGE_SECS)
}

/// Assemble the application: routes, JSON limits, tracing and CORS.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        allowed_origin,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .wrap(cors(&allowed_origin))
        .configure(users::configure)
        .configure(projects::configure)
        .configure(test_cases::configure)
        .service(root)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// The readiness probe flips to ready once the listener is bound.
///
/// # Errors
/// Returns [`std::io::ErrorKind::InvalidInput`] when the CORS origin is not
/// an exact http(s) origin. Account service setup failures and socket
/// binding errors are returned as [`std::io::Error`].
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    validate_origin(&config.allowed_origin)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
    let deps = AppDependencies::from_config(health_state.clone(), &config)
        .map_err(std::io::Error::other)?;
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}
