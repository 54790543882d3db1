//! Persistence for survey responses.
//!
//! Owns the PostgreSQL pool, the `responses` table DDL, the SQL layer, and
//! the [`store::ResponseStore`] port that the HTTP layer depends on.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod config;
pub mod guard;
pub mod maintenance;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod store;

pub use config::{ConfigError, DatabaseConfig};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from the database configuration.
///
/// The pool connects lazily: no connection is attempted until the first
/// query, so an unreachable database does not prevent start-up. A query
/// that cannot get a connection fails after `acquire_timeout_secs`.
pub fn create_pool(config: &DatabaseConfig) -> Result<DbPool, ConfigError> {
    let options = config.connect_options()?;
    Ok(PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_lazy_with(options))
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
