//! Share token lifetime policy.

use chrono::Duration;

use stockshare_core::config::ShareConfig;

/// Turns a requested lifetime into the one actually granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    pub default_minutes: i64,
    pub min_minutes: i64,
    pub max_minutes: i64,
}

impl TtlPolicy {
    pub fn new(config: &ShareConfig) -> Self {
        Self {
            default_minutes: config.default_ttl_minutes,
            min_minutes: config.min_ttl_minutes,
            max_minutes: config.max_ttl_minutes,
        }
    }

    /// Absent or non-positive requests get the default; others are clamped.
    pub fn minutes_for(&self, requested: Option<i64>) -> i64 {
        match requested {
            Some(minutes) if minutes > 0 => minutes.clamp(self.min_minutes, self.max_minutes),
            _ => self.default_minutes,
        }
    }

    pub fn duration_for(&self, requested: Option<i64>) -> Duration {
        Duration::minutes(self.minutes_for(requested))
    }
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self::new(&ShareConfig::default())
    }
}
