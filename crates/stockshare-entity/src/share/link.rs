//! Share link value object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a merchant receives after issuing a share token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLink {
    /// The share token.
    pub token: String,
    /// Instant after which the link stops resolving.
    pub expires_at: DateTime<Utc>,
    /// Customer-facing URL embedding the token.
    pub url: String,
}
