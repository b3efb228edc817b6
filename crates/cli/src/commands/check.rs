//! Connectivity check command.

use customer_rest_api::db::{CustomerStore, PgCustomerStore};

use super::{CommandError, connect};

/// Connect with the server's settings and ping the store.
///
/// # Errors
///
/// Returns an error if the store cannot be reached.
pub async fn run() -> Result<(), CommandError> {
    let store = PgCustomerStore::new(connect().await?);
    store.ping().await?;

    tracing::info!("Store is reachable");
    Ok(())
}
