//! Request and response models.

pub mod customer;

pub use customer::{
    CreatedCustomer, Customer, CustomerBody, CustomerPayload, ListQuery, NewCustomer,
};
