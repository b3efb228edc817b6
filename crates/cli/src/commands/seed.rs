//! Seed the customer table with sample rows.
//!
//! Rows are inserted through [`PgCustomerStore`], the same code path the
//! server's create handler uses.

use customer_rest_api::db::{CustomerStore, PgCustomerStore};
use customer_rest_api::models::CustomerPayload;

use super::{CommandError, connect};

const FIRST_NAMES: &[&str] = &["Ada", "Grace", "Katherine", "Margaret", "Barbara", "Frances"];
const LAST_NAMES: &[&str] = &["Lovelace", "Hopper", "Johnson", "Hamilton", "Liskov", "Allen"];

/// Build the `n`th sample customer.
fn sample(n: usize) -> CustomerPayload {
    let first = FIRST_NAMES.get(n % FIRST_NAMES.len()).copied().unwrap_or("Ada");
    let last = LAST_NAMES
        .get((n / FIRST_NAMES.len()) % LAST_NAMES.len())
        .copied()
        .unwrap_or("Lovelace");

    CustomerPayload {
        first_name: Some(first.to_owned()),
        last_name: Some(last.to_owned()),
        email: Some(format!(
            "{}.{}.{n}@example.com",
            first.to_lowercase(),
            last.to_lowercase()
        )),
    }
}

/// Insert `count` sample customers.
///
/// # Errors
///
/// Returns an error if the store rejects an insert; rows inserted before the
/// failure are kept.
pub async fn run(count: usize) -> Result<(), CommandError> {
    let store = PgCustomerStore::new(connect().await?);

    for n in 0..count {
        let id = store.create(&sample(n)).await?;
        tracing::debug!(%id, "seeded customer");
    }

    tracing::info!(count, "Seeding complete");
    Ok(())
}
