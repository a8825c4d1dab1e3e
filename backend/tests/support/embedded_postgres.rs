//! Database lifecycle helpers for embedded PostgreSQL.
//!
//! Databases are dropped and created through `postgres` so no Diesel
//! transaction wraps `DROP DATABASE`. Schemas come from the crate's embedded
//! migrations, the same ones the server applies on startup.

use casebook::outbound::persistence::run_pending_migrations;
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};

use super::format_postgres_error;

const MAINTENANCE_DB: &str = "postgres";

/// Drop `name` if it exists and create it empty.
pub fn reset_database(cluster: &TestCluster, name: &str) -> Result<(), String> {
    let url = cluster.connection().database_url(MAINTENANCE_DB);
    let mut client = Client::connect(&url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!(r#"DROP DATABASE IF EXISTS "{name}""#))
        .map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!(r#"CREATE DATABASE "{name}""#))
        .map_err(|err| format_postgres_error(&err))?;
    Ok(())
}

/// Apply every pending migration to the database at `url`.
pub fn migrate_schema(url: &str) -> Result<(), String> {
    run_pending_migrations(url)
        .map(|_| ())
        .map_err(|err| err.to_string())
}
