//! Share token entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A bearer capability granting read access to one owner's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ShareToken {
    /// Opaque random value; primary key.
    pub token: String,
    /// The merchant whose catalog the token exposes.
    pub owner_id: Uuid,
    /// The token is unusable at or after this instant.
    pub expires_at: DateTime<Utc>,
    /// Cleared when superseded or swept.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl ShareToken {
    /// Whether the token grants access at `now`.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at > now
    }

    /// Active flag still set although the token has expired.
    pub fn needs_sweep_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at <= now
    }
}

/// Data required to insert a freshly issued token.
#[derive(Debug, Clone)]
pub struct NewShareToken {
    pub token: String,
    pub owner_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
