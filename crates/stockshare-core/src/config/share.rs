//! Share link configuration.

use serde::{Deserialize, Serialize};

/// Upper bound accepted for `max_ttl_minutes` (one week).
pub const MAX_TTL_LIMIT_MINUTES: i64 = 10_080;

/// Share token lifetime bounds and public URL settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Lifetime used when the caller gives none (or a non-positive one).
    #[serde(default = "default_ttl")]
    pub default_ttl_minutes: i64,
    /// Shortest lifetime a caller may request.
    #[serde(default = "default_min_ttl")]
    pub min_ttl_minutes: i64,
    /// Longest lifetime a caller may request.
    #[serde(default = "default_max_ttl")]
    pub max_ttl_minutes: i64,
    /// Interval of the background sweep of expired tokens. 0 disables it.
    #[serde(default)]
    pub sweep_interval_seconds: u64,
    /// Path prefix of the customer-facing catalog page.
    #[serde(default = "default_customer_path")]
    pub customer_path: String,
    /// Fixed origin for share URLs, e.g. `https://shop.example.com`.
    /// When unset the origin is derived from the request headers.
    #[serde(default)]
    pub public_base_url: Option<String>,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            default_ttl_minutes: default_ttl(),
            min_ttl_minutes: default_min_ttl(),
            max_ttl_minutes: default_max_ttl(),
            sweep_interval_seconds: 0,
            customer_path: default_customer_path(),
            public_base_url: None,
        }
    }
}

fn default_ttl() -> i64 {
    5
}

fn default_min_ttl() -> i64 {
    1
}

fn default_max_ttl() -> i64 {
    60
}

fn default_customer_path() -> String {
    "/customer".to_string()
}
