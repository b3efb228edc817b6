//! Customer REST API library.
//!
//! The server binary and the CLI share configuration, the store and the
//! route table through this crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
