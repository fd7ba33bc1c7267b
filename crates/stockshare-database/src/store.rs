//! Store traits and the bundle the application is wired with.
//!
//! Services hold `Arc<dyn …Store>` handles, so the PostgreSQL repositories
//! and the in-memory store are interchangeable at startup.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use stockshare_core::config::{DatabaseConfig, StoreProvider};
use stockshare_core::result::AppResult;
use stockshare_entity::product::{NewProduct, Product, ProductOrder, ProductPatch};
use stockshare_entity::share::{NewShareToken, ShareToken};
use stockshare_entity::user::{CreateUser, User};

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::repositories::{ProductRepository, ShareTokenRepository, UserRepository};

/// Merchant accounts.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a user. A taken email is a `Conflict`.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Look up by the already normalized (lower-cased) email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
}

/// Per-owner product catalogs.
#[async_trait]
pub trait ProductStore: Send + Sync + std::fmt::Debug + 'static {
    async fn list_by_owner(&self, owner_id: Uuid, order: ProductOrder) -> AppResult<Vec<Product>>;

    /// Insert a product. A taken `(owner_id, id)` is a `Conflict`.
    async fn create(&self, owner_id: Uuid, data: &NewProduct) -> AppResult<Product>;

    /// Apply a sparse patch. A missing row is `NotFound`.
    async fn update(&self, owner_id: Uuid, id: &str, patch: &ProductPatch) -> AppResult<Product>;

    /// Returns whether a row was removed.
    async fn delete(&self, owner_id: Uuid, id: &str) -> AppResult<bool>;
}

/// Share tokens.
#[async_trait]
pub trait ShareTokenStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert `data` as the owner's only active token.
    ///
    /// Inserting and deactivating every other active token of the owner
    /// happen atomically. A taken token value is a `Conflict`; an unknown
    /// owner is `Unauthorized`.
    async fn issue(&self, data: &NewShareToken) -> AppResult<ShareToken>;

    async fn find_by_token(&self, token: &str) -> AppResult<Option<ShareToken>>;

    /// The latest-expiring active token of the owner that is still valid at `now`.
    async fn find_active_for_owner(
        &self,
        owner_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ShareToken>>;

    /// Clear the active flag of one token. Returns whether the flag was set.
    async fn deactivate(&self, token: &str) -> AppResult<bool>;

    /// Clear the active flag of every token expired at `now`.
    async fn deactivate_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;

    /// Delete inactive tokens that expired before `cutoff`.
    async fn purge_inactive(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;

    /// Every token of the owner, newest first.
    async fn list_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<ShareToken>>;
}

/// The store handles the application runs against.
#[derive(Debug, Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub products: Arc<dyn ProductStore>,
    pub share_tokens: Arc<dyn ShareTokenStore>,
    backend: Backend,
}

#[derive(Debug, Clone)]
enum Backend {
    Postgres(DatabasePool),
    Memory(MemoryStore),
}

impl Stores {
    /// Open the provider named in the configuration.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            StoreProvider::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                Ok(Self::postgres(pool))
            }
            StoreProvider::Memory => {
                info!("Using in-memory store; data is lost on restart");
                Ok(Self::memory(MemoryStore::new()))
            }
        }
    }

    /// Stores backed by PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pg.clone())),
            products: Arc::new(ProductRepository::new(pg.clone())),
            share_tokens: Arc::new(ShareTokenRepository::new(pg)),
            backend: Backend::Postgres(pool),
        }
    }

    /// Stores backed by one shared in-memory state.
    pub fn memory(store: MemoryStore) -> Self {
        let shared = Arc::new(store.clone());
        Self {
            users: shared.clone(),
            products: shared.clone(),
            share_tokens: shared,
            backend: Backend::Memory(store),
        }
    }

    /// The PostgreSQL pool, when running against PostgreSQL.
    pub fn pool(&self) -> Option<&DatabasePool> {
        match &self.backend {
            Backend::Postgres(pool) => Some(pool),
            Backend::Memory(_) => None,
        }
    }

    /// Name of the backing provider, for logs and the health endpoint.
    pub fn provider_name(&self) -> &'static str {
        match &self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory(_) => "memory",
        }
    }

    /// Whether the backing store currently answers.
    pub async fn health_check(&self) -> bool {
        match &self.backend {
            Backend::Postgres(pool) => pool.health_check().await.unwrap_or(false),
            Backend::Memory(store) => store.is_available(),
        }
    }

    /// Release pooled connections.
    pub async fn close(&self) {
        if let Backend::Postgres(pool) = &self.backend {
            pool.close().await;
        }
    }
}
