//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod media;
pub mod share;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseConfig, StoreProvider};
pub use self::logging::{LogFormat, LoggingConfig};
pub use self::media::MediaConfig;
pub use self::share::{MAX_TTL_LIMIT_MINUTES, ShareConfig};

use crate::error::AppError;

/// Environment variable prefix for overrides, e.g. `STOCKSHARE__SERVER__PORT`.
pub const ENV_PREFIX: &str = "STOCKSHARE";

/// Root application configuration.
///
/// Every section has defaults, so an empty configuration is valid apart
/// from the database URL required by the PostgreSQL provider.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` with the `config/{env}.toml` overlay and
    /// environment variables prefixed with `STOCKSHARE__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("auth.allowed_email_domains")
                    .with_list_parse_key("server.cors.allowed_origins")
                    .try_parsing(true),
            );

        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, AppError> {
        let config = builder
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject combinations that would make the running service misbehave.
    pub fn validate(&self) -> Result<(), AppError> {
        let share = &self.share;
        if share.min_ttl_minutes < 1 {
            return Err(AppError::configuration(
                "share.min_ttl_minutes must be at least 1",
            ));
        }
        if share.max_ttl_minutes < share.min_ttl_minutes {
            return Err(AppError::configuration(
                "share.max_ttl_minutes must not be below share.min_ttl_minutes",
            ));
        }
        if share.max_ttl_minutes > MAX_TTL_LIMIT_MINUTES {
            return Err(AppError::configuration(format!(
                "share.max_ttl_minutes must not exceed {MAX_TTL_LIMIT_MINUTES}"
            )));
        }
        if !(share.min_ttl_minutes..=share.max_ttl_minutes).contains(&share.default_ttl_minutes) {
            return Err(AppError::configuration(
                "share.default_ttl_minutes must lie within the min/max bounds",
            ));
        }
        if self.auth.jwt_ttl_hours < 1 {
            return Err(AppError::configuration(
                "auth.jwt_ttl_hours must be at least 1",
            ));
        }
        if self.database.provider == StoreProvider::Postgres && self.database.url.trim().is_empty()
        {
            return Err(AppError::configuration(
                "database.url is required for the postgres provider",
            ));
        }
        Ok(())
    }
}
