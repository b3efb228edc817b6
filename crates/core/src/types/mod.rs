//! Core types for the customer API.

pub mod email;
pub mod id;
pub mod page;

pub use email::{Email, EmailError};
pub use id::{CustomerId, CustomerIdError};
pub use page::{Page, PageError};
