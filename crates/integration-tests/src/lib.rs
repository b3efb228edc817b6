//! Black-box tests for the customer REST API.
//!
//! # Running Tests
//!
//! ```bash
//! # Create the table and start the server
//! cargo run -p customer-rest-cli -- migrate
//! cargo run -p customer-rest-api
//!
//! # Run the ignored HTTP tests against it
//! CUSTOMER_API_URL=http://localhost:3000 cargo test -p customer-rest-integration-tests -- --ignored
//! ```
//!
//! The tests only assume behavior shared by both error modes unless they say
//! otherwise.

use serde::Deserialize;
use serde_json::{Value, json};

pub use customer_rest_core::CustomerId;

/// Base URL of the server under test.
///
/// Read from `CUSTOMER_API_URL`, defaulting to `http://localhost:3000`.
#[must_use]
pub fn base_url() -> String {
    std::env::var("CUSTOMER_API_URL")
        .map(|url| url.trim_end_matches('/').to_owned())
        .unwrap_or_else(|_| "http://localhost:3000".to_owned())
}

/// URL of the customer collection.
#[must_use]
pub fn customers_url() -> String {
    format!("{}/api/customers", base_url())
}

/// URL of a single customer.
#[must_use]
pub fn customer_url(id: impl std::fmt::Display) -> String {
    format!("{}/api/customers/{id}", base_url())
}

/// Response body of a successful create.
#[derive(Debug, Deserialize)]
pub struct Created {
    pub customer_id: CustomerId,
}

/// A customer row as the server serializes it.
#[derive(Debug, Deserialize)]
pub struct CustomerRow {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub last_update: String,
}

/// JSON body for create and update requests.
#[must_use]
pub fn customer_body(first_name: &str, last_name: &str, email: &str) -> Value {
    json!({
        "first_name": first_name,
        "last_name": last_name,
        "email": email,
    })
}

/// An email address no other test run will use.
#[must_use]
pub fn unique_email(tag: &str) -> String {
    format!("{tag}.{}@example.com", uuid::Uuid::new_v4().simple())
}
