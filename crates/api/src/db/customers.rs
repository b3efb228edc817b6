//! `PostgreSQL` implementation of [`CustomerStore`].
//!
//! Queries are built at runtime with `query_as`/`query_scalar` and positional
//! binds, so the crate builds without a live database.

use async_trait::async_trait;
use customer_rest_core::{CustomerId, Page};
use sqlx::PgPool;
use tracing::instrument;

use super::{CustomerStore, RepositoryError};
use crate::models::customer::{Customer, CustomerPayload};

/// Repository for the `customer` table.
#[derive(Clone)]
pub struct PgCustomerStore {
    pool: PgPool,
}

impl PgCustomerStore {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    #[instrument(skip_all)]
    async fn create(&self, payload: &CustomerPayload) -> Result<CustomerId, RepositoryError> {
        let id = sqlx::query_scalar::<_, CustomerId>(
            r"
            INSERT INTO customer (first_name, last_name, email)
            VALUES ($1, $2, $3)
            RETURNING customer_id
            ",
        )
        .bind(payload.first_name.as_deref())
        .bind(payload.last_name.as_deref())
        .bind(payload.email.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn get(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(
            r"
            SELECT customer_id, first_name, last_name, email, last_update
            FROM customer
            WHERE customer_id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn update(
        &self,
        id: CustomerId,
        payload: &CustomerPayload,
    ) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(
            r"
            UPDATE customer
            SET first_name = $2, last_name = $3, email = $4
            WHERE customer_id = $1
            RETURNING customer_id, first_name, last_name, email, last_update
            ",
        )
        .bind(id)
        .bind(payload.first_name.as_deref())
        .bind(payload.last_name.as_deref())
        .bind(payload.email.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn delete(&self, id: CustomerId) -> Result<Option<CustomerId>, RepositoryError> {
        let deleted = sqlx::query_scalar::<_, CustomerId>(
            r"
            DELETE FROM customer
            WHERE customer_id = $1
            RETURNING customer_id
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn list(&self, page: Page) -> Result<Vec<Customer>, RepositoryError> {
        // customer_id breaks ties so repeated pages are stable
        let customers = sqlx::query_as::<_, Customer>(
            r"
            SELECT customer_id, first_name, last_name, email, last_update
            FROM customer
            ORDER BY last_update DESC, customer_id
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
