//! # stockshare-core
//!
//! Core crate for StockShare. Holds the configuration schema, the
//! injectable clock, and the unified error system shared by every other
//! crate in the workspace.
//!
//! This crate has **no** internal dependencies on other StockShare crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
