//! Merchant catalog management.

pub mod service;

pub use service::{ProductInput, ProductService};
