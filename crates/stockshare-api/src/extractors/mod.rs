//! Custom Axum extractors.

pub mod auth;
pub mod base_url;
pub mod json;

pub use auth::AuthUser;
pub use base_url::BaseUrl;
pub use json::ValidatedJson;
