//! Share token repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use stockshare_core::error::AppError;
use stockshare_core::result::AppResult;
use stockshare_entity::share::{NewShareToken, ShareToken};

use crate::error::classify;
use crate::store::ShareTokenStore;

/// PostgreSQL-backed [`ShareTokenStore`].
#[derive(Debug, Clone)]
pub struct ShareTokenRepository {
    pool: PgPool,
}

impl ShareTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShareTokenStore for ShareTokenRepository {
    async fn issue(&self, data: &NewShareToken) -> AppResult<ShareToken> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| classify("Failed to begin share token transaction", e))?;

        // Row lock on the owner serializes concurrent issuance for one merchant.
        let owner: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(data.owner_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| classify("Failed to lock share token owner", e))?;
        if owner.is_none() {
            return Err(AppError::unauthorized("Account no longer exists"));
        }

        let token = sqlx::query_as::<_, ShareToken>(
            "INSERT INTO share_tokens (token, owner_id, expires_at, is_active, created_at) \
             VALUES ($1, $2, $3, TRUE, $4) \
             RETURNING token, owner_id, expires_at, is_active, created_at",
        )
        .bind(&data.token)
        .bind(data.owner_id)
        .bind(data.expires_at)
        .bind(data.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| classify("Failed to insert share token", e))?;

        sqlx::query(
            "UPDATE share_tokens SET is_active = FALSE \
             WHERE owner_id = $1 AND token <> $2 AND is_active",
        )
        .bind(data.owner_id)
        .bind(&data.token)
        .execute(&mut *tx)
        .await
        .map_err(|e| classify("Failed to deactivate previous share tokens", e))?;

        tx.commit()
            .await
            .map_err(|e| classify("Failed to commit share token", e))?;

        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<ShareToken>> {
        sqlx::query_as::<_, ShareToken>(
            "SELECT token, owner_id, expires_at, is_active, created_at \
             FROM share_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify("Failed to find share token", e))
    }

    async fn find_active_for_owner(
        &self,
        owner_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ShareToken>> {
        sqlx::query_as::<_, ShareToken>(
            "SELECT token, owner_id, expires_at, is_active, created_at \
             FROM share_tokens \
             WHERE owner_id = $1 AND is_active AND expires_at > $2 \
             ORDER BY expires_at DESC LIMIT 1",
        )
        .bind(owner_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify("Failed to find active share token", e))
    }

    async fn deactivate(&self, token: &str) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE share_tokens SET is_active = FALSE WHERE token = $1 AND is_active")
                .bind(token)
                .execute(&self.pool)
                .await
                .map_err(|e| classify("Failed to deactivate share token", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn deactivate_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE share_tokens SET is_active = FALSE WHERE is_active AND expires_at <= $1",
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| classify("Failed to sweep expired share tokens", e))?;
        Ok(result.rows_affected())
    }

    async fn purge_inactive(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM share_tokens WHERE NOT is_active AND expires_at < $1")
                .bind(cutoff)
                .execute(&self.pool)
                .await
                .map_err(|e| classify("Failed to purge share tokens", e))?;
        Ok(result.rows_affected())
    }

    async fn list_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<ShareToken>> {
        sqlx::query_as::<_, ShareToken>(
            "SELECT token, owner_id, expires_at, is_active, created_at \
             FROM share_tokens WHERE owner_id = $1 ORDER BY created_at DESC, expires_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify("Failed to list share tokens", e))
    }
}
