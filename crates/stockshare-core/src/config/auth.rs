//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Placeholder shipped in `config/default.toml`; startup warns when it is still in use.
pub const PLACEHOLDER_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Session credential and signup policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session token lifetime in hours.
    #[serde(default = "default_jwt_ttl")]
    pub jwt_ttl_hours: i64,
    /// Minimum password length accepted at signup.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Email domains allowed to sign up. Empty allows any domain.
    #[serde(default)]
    pub allowed_email_domains: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_ttl_hours: default_jwt_ttl(),
            password_min_length: default_password_min(),
            allowed_email_domains: Vec::new(),
        }
    }
}

impl AuthConfig {
    /// Whether the signing secret is missing or still the shipped placeholder.
    pub fn uses_placeholder_secret(&self) -> bool {
        self.jwt_secret.trim().is_empty() || self.jwt_secret == PLACEHOLDER_JWT_SECRET
    }
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}

fn default_jwt_ttl() -> i64 {
    12
}

fn default_password_min() -> usize {
    6
}
