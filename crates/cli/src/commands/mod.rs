//! CLI subcommands.

pub mod check;
pub mod migrate;
pub mod seed;

use customer_rest_api::config::{ConfigError, DatabaseConfig};
use customer_rest_api::db::{self, RepositoryError};
use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Store error: {0}")]
    Store(#[from] RepositoryError),
}

/// Load database settings from the environment and open a pool.
async fn connect() -> Result<PgPool, CommandError> {
    let config = DatabaseConfig::from_env()?;

    tracing::info!(host = %config.host, database = %config.database, "Connecting to database...");
    let pool = db::create_pool(&config).await?;
    Ok(pool)
}
