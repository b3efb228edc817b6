//! Database access for the `customer` table.
//!
//! # Table: `customer`
//!
//! - `customer_id` - UUID primary key, generated by the store
//! - `first_name`, `last_name`, `email` - `NOT NULL` text
//! - `last_update` - maintained by a `BEFORE UPDATE` trigger, used for list ordering
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p customer-rest-cli -- migrate
//! ```

pub mod customers;
#[cfg(test)]
pub mod memory;

use std::time::Duration;

use async_trait::async_trait;
use customer_rest_core::{CustomerId, Page};
use sqlx::PgPool;
use sqlx::error::ErrorKind;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::config::DatabaseConfig;
use crate::models::customer::{Customer, CustomerPayload};

pub use customers::PgCustomerStore;

/// SQLSTATE class for data exceptions (bad casts, out-of-range values).
const DATA_EXCEPTION_CLASS: &str = "22";

/// Errors that can occur during repository operations.
///
/// Each variant is one class of store outcome; the HTTP layer decides how
/// each class is reported.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No row matched.
    #[error("not found")]
    NotFound,

    /// The store rejected a parameter value.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Constraint violation (e.g., `NOT NULL`).
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Any other database error from sqlx.
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl RepositoryError {
    /// Whether the failure was caused by the request rather than the store.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound | Self::InvalidInput(_) | Self::Constraint(_)
        )
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let message = db_err.message().to_owned();
            match db_err.kind() {
                ErrorKind::NotNullViolation
                | ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::CheckViolation => return Self::Constraint(message),
                _ => {}
            }
            if db_err
                .code()
                .is_some_and(|code| code.starts_with(DATA_EXCEPTION_CLASS))
            {
                return Self::InvalidInput(message);
            }
        }

        match err {
            sqlx::Error::RowNotFound => Self::NotFound,
            e @ (sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed) => Self::Unavailable(e.to_string()),
            other => Self::Database(other),
        }
    }
}

/// Store operations behind the HTTP handlers.
///
/// Every method is exactly one parameterized statement against the store.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Insert a customer and return the store-generated ID.
    async fn create(&self, payload: &CustomerPayload) -> Result<CustomerId, RepositoryError>;

    /// Fetch a customer by ID.
    async fn get(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError>;

    /// Overwrite a customer's mutable fields, returning the updated row.
    async fn update(
        &self,
        id: CustomerId,
        payload: &CustomerPayload,
    ) -> Result<Option<Customer>, RepositoryError>;

    /// Delete a customer, returning the deleted ID if a row matched.
    async fn delete(&self, id: CustomerId) -> Result<Option<CustomerId>, RepositoryError>;

    /// List customers, most recently updated first.
    async fn list(&self, page: Page) -> Result<Vec<Customer>, RepositoryError>;

    /// Round trip to the store without touching the table.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established or the CA
/// certificate cannot be loaded.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(config.connect_options())
        .await
}
