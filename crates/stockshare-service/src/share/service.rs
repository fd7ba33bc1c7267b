//! Share token issuance and resolution.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use stockshare_core::error::{AppError, ErrorKind};
use stockshare_core::result::AppResult;
use stockshare_core::traits::TimeSource;
use stockshare_database::ShareTokenStore;
use stockshare_entity::share::{NewShareToken, ShareToken};

use super::link::{LinkService, TokenGenerator};
use super::policy::TtlPolicy;

/// Attempts at inserting a freshly generated token before giving up.
const ISSUE_ATTEMPTS: usize = 2;

/// Outcome of resolving an anonymous token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The token is active and unexpired.
    Granted { owner_id: Uuid },
    /// The token is unknown, superseded, or expired. `swept` reports whether
    /// this resolution cleared a stale active flag.
    Denied { swept: bool },
}

impl Resolution {
    pub fn owner_id(&self) -> Option<Uuid> {
        match self {
            Self::Granted { owner_id } => Some(*owner_id),
            Self::Denied { .. } => None,
        }
    }
}

/// Issues share tokens (one active per owner) and resolves them.
#[derive(Debug, Clone)]
pub struct ShareService {
    tokens: Arc<dyn ShareTokenStore>,
    generator: Arc<dyn TokenGenerator>,
    ttl: TtlPolicy,
    clock: Arc<dyn TimeSource>,
}

impl ShareService {
    pub fn new(
        tokens: Arc<dyn ShareTokenStore>,
        generator: Arc<dyn TokenGenerator>,
        ttl: TtlPolicy,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            tokens,
            generator,
            ttl,
            clock,
        }
    }

    /// Issue a new token for `owner_id`, superseding any active one.
    ///
    /// `ttl_minutes` is clamped by the [`TtlPolicy`]. A value collision is
    /// retried once with a fresh token and then reported as `Internal`.
    pub async fn issue(&self, owner_id: Uuid, ttl_minutes: Option<i64>) -> AppResult<ShareToken> {
        let lifetime = self.ttl.duration_for(ttl_minutes);

        for attempt in 1..=ISSUE_ATTEMPTS {
            let now = self.clock.now();
            let data = NewShareToken {
                token: self.generator.generate(),
                owner_id,
                expires_at: now + lifetime,
                created_at: now,
            };

            match self.tokens.issue(&data).await {
                Ok(record) => {
                    info!(
                        owner_id = %owner_id,
                        expires_at = %record.expires_at,
                        ttl_minutes = lifetime.num_minutes(),
                        "Share link issued"
                    );
                    return Ok(record);
                }
                Err(e) if e.is(ErrorKind::Conflict) => {
                    warn!(owner_id = %owner_id, attempt, "Share token collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Could not allocate a unique share token",
        ))
    }

    /// The owner's current usable token, if any.
    pub async fn get_active(&self, owner_id: Uuid) -> AppResult<Option<ShareToken>> {
        self.tokens
            .find_active_for_owner(owner_id, self.clock.now())
            .await
    }

    /// Resolve an anonymous token.
    ///
    /// Looks the token up and, when it is expired but still flagged active,
    /// clears the flag before answering. Malformed input never reaches the
    /// store. A failed sweep is logged and does not change the answer.
    pub async fn resolve(&self, token: &str) -> AppResult<Resolution> {
        if !LinkService::is_plausible_token(token) {
            return Ok(Resolution::Denied { swept: false });
        }

        let now = self.clock.now();
        let Some(record) = self.tokens.find_by_token(token).await? else {
            return Ok(Resolution::Denied { swept: false });
        };

        if record.is_usable_at(now) {
            return Ok(Resolution::Granted {
                owner_id: record.owner_id,
            });
        }

        let swept = if record.needs_sweep_at(now) {
            match self.tokens.deactivate(&record.token).await {
                Ok(flipped) => {
                    debug!(owner_id = %record.owner_id, "Swept expired share token on access");
                    flipped
                }
                Err(e) => {
                    warn!(error = %e, "Failed to sweep expired share token");
                    false
                }
            }
        } else {
            false
        };

        Ok(Resolution::Denied { swept })
    }
}
