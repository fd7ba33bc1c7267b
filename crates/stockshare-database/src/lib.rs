//! # stockshare-database
//!
//! Persistence for StockShare. The [`store`] module defines the traits the
//! services depend on; [`repositories`] implements them over PostgreSQL and
//! [`memory`] over process-local maps.

pub mod connection;
pub mod error;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{ProductStore, ShareTokenStore, Stores, UserStore};
