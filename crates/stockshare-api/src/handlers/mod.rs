//! Route handlers organized by domain.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod health;
pub mod product;
pub mod public;
pub mod share;
