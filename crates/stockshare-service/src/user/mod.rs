//! Merchant accounts and sessions.

pub mod service;

pub use service::{AccountService, AuthSession};
