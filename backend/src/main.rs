//! Backend entry-point: loads settings, prepares storage and serves the API.

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use casebook::inbound::http::health::HealthState;
use casebook::inbound::http::session_config::{BuildMode, session_settings_from_env};
use casebook::server::{AppSettings, ServerConfig, create_server, prepare_database};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    let bind_addr = settings.bind_addr().wrap_err("invalid bind address")?;
    let allowed_origin = settings
        .allowed_origin()
        .wrap_err("invalid CASEBOOK_ALLOWED_ORIGIN")?;

    let mut config = ServerConfig::new(session, bind_addr, allowed_origin);
    match settings.database_url.as_deref() {
        Some(url) => {
            let pool = prepare_database(url)
                .await
                .wrap_err("database setup failed")?;
            config = config.with_db_pool(pool);
        }
        None => info!("CASEBOOK_DATABASE_URL not set; using in-memory storage"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await.wrap_err("server terminated with an error")
}
