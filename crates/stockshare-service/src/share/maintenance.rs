//! Share token upkeep: eager sweeping, purging, and history.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{error, info};
use uuid::Uuid;

use stockshare_core::result::AppResult;
use stockshare_core::traits::TimeSource;
use stockshare_database::ShareTokenStore;
use stockshare_entity::share::ShareToken;

/// Operator-facing share token maintenance.
#[derive(Debug, Clone)]
pub struct ShareMaintenance {
    tokens: Arc<dyn ShareTokenStore>,
    clock: Arc<dyn TimeSource>,
}

impl ShareMaintenance {
    pub fn new(tokens: Arc<dyn ShareTokenStore>, clock: Arc<dyn TimeSource>) -> Self {
        Self { tokens, clock }
    }

    /// Clear the active flag of every token expired by now.
    pub async fn sweep_expired(&self) -> AppResult<u64> {
        let swept = self.tokens.deactivate_expired(self.clock.now()).await?;
        if swept > 0 {
            info!(swept, "Expired share tokens swept");
        }
        Ok(swept)
    }

    /// Delete inactive tokens that expired before `cutoff`.
    pub async fn purge_inactive(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let purged = self.tokens.purge_inactive(cutoff).await?;
        info!(purged, cutoff = %cutoff, "Inactive share tokens purged");
        Ok(purged)
    }

    /// Every token ever issued to `owner_id`, newest first.
    pub async fn history(&self, owner_id: Uuid) -> AppResult<Vec<ShareToken>> {
        self.tokens.list_for_owner(owner_id).await
    }

    /// Sweep on a fixed interval until `shutdown` flips to `true`.
    pub async fn run_sweeper(self, every: StdDuration, mut shutdown: watch::Receiver<bool>) {
        info!(interval_secs = every.as_secs(), "Share token sweeper started");
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.sweep_expired().await {
                        error!(error = %e, "Share token sweep failed");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Share token sweeper stopped");
    }
}
