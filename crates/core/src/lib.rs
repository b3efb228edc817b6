//! Customer REST core - Shared types library.
//!
//! Types used by both the API server and the CLI:
//! - [`CustomerId`] - UUID primary key of a customer row
//! - [`Email`] - validated email address (used by strict request validation)
//! - [`Page`] - `limit`/`offset` window for list queries
//!
//! The core crate has no I/O. Database encoding for [`CustomerId`] is behind
//! the `postgres` feature.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
