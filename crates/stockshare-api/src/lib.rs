//! # stockshare-api
//!
//! HTTP API layer for StockShare built on Axum.
//!
//! Provides the merchant and public endpoints, middleware (CORS, request
//! logging, compression), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiErrorResponse};
pub use state::AppState;
