//! Process-local store used by tests and `provider = "memory"` runs.
//!
//! One [`MemoryStore`] implements all three store traits over a single
//! `RwLock`-guarded state, so multi-record operations such as token
//! issuance run under one write guard.

mod state;

use std::collections::hash_map::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use stockshare_core::error::AppError;
use stockshare_core::result::AppResult;
use stockshare_entity::product::{NewProduct, Product, ProductOrder, ProductPatch};
use stockshare_entity::share::{NewShareToken, ShareToken};
use stockshare_entity::user::{CreateUser, User};

use crate::store::{ProductStore, ShareTokenStore, UserStore};

use self::state::MemoryState;

/// In-memory implementation of every store trait.
///
/// Clones share the same state.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
    available: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState::default())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Simulate losing (or regaining) the backing store.
    ///
    /// While unavailable every operation fails with `ServiceUnavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn ensure_available(&self) -> AppResult<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(AppError::service_unavailable("Database is unavailable"))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        self.ensure_available()?;
        let mut state = self.state.write().await;

        if state.users_by_email.contains_key(&data.email) {
            return Err(AppError::conflict("An account with this email already exists"));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            created_at: Utc::now(),
        };
        state.users_by_email.insert(user.email.clone(), user.id);
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.ensure_available()?;
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.ensure_available()?;
        let state = self.state.read().await;
        Ok(state
            .users_by_email
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list_by_owner(&self, owner_id: Uuid, order: ProductOrder) -> AppResult<Vec<Product>> {
        self.ensure_available()?;
        let state = self.state.read().await;
        let mut products: Vec<Product> = state
            .products
            .get(&owner_id)
            .map(|catalog| catalog.values().cloned().collect())
            .unwrap_or_default();

        // The catalog map is keyed by id, so `ById` is already in order.
        if order == ProductOrder::ByName {
            products.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        }
        Ok(products)
    }

    async fn create(&self, owner_id: Uuid, data: &NewProduct) -> AppResult<Product> {
        self.ensure_available()?;
        let mut state = self.state.write().await;

        if !state.users.contains_key(&owner_id) {
            return Err(AppError::unauthorized("Account no longer exists"));
        }

        let catalog = state.products.entry(owner_id).or_default();
        if catalog.contains_key(&data.id) {
            return Err(AppError::conflict(format!(
                "Product '{}' already exists",
                data.id
            )));
        }

        let now = Utc::now();
        let product = Product {
            owner_id,
            id: data.id.clone(),
            name: data.name.clone(),
            category: data.category.clone(),
            stock: data.stock,
            unit: data.unit.clone(),
            reorder_point: data.reorder_point,
            price: data.price,
            image_url: data.image_url.clone(),
            created_at: now,
            updated_at: now,
        };
        catalog.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    async fn update(&self, owner_id: Uuid, id: &str, patch: &ProductPatch) -> AppResult<Product> {
        self.ensure_available()?;
        let mut state = self.state.write().await;

        let product = state
            .products
            .get_mut(&owner_id)
            .and_then(|catalog| catalog.get_mut(id))
            .ok_or_else(|| AppError::not_found(format!("Product '{id}' not found")))?;

        if let Some(name) = &patch.name {
            product.name = name.clone();
        }
        if let Some(category) = &patch.category {
            product.category = category.clone();
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }
        if let Some(unit) = &patch.unit {
            product.unit = unit.clone();
        }
        if let Some(reorder_point) = patch.reorder_point {
            product.reorder_point = reorder_point;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(image_url) = &patch.image_url {
            product.image_url = image_url.clone();
        }
        product.updated_at = Utc::now();

        Ok(product.clone())
    }

    async fn delete(&self, owner_id: Uuid, id: &str) -> AppResult<bool> {
        self.ensure_available()?;
        let mut state = self.state.write().await;
        Ok(state
            .products
            .get_mut(&owner_id)
            .and_then(|catalog| catalog.remove(id))
            .is_some())
    }
}

#[async_trait]
impl ShareTokenStore for MemoryStore {
    async fn issue(&self, data: &NewShareToken) -> AppResult<ShareToken> {
        self.ensure_available()?;
        let mut state = self.state.write().await;

        if !state.users.contains_key(&data.owner_id) {
            return Err(AppError::unauthorized("Account no longer exists"));
        }

        let record = ShareToken {
            token: data.token.clone(),
            owner_id: data.owner_id,
            expires_at: data.expires_at,
            is_active: true,
            created_at: data.created_at,
        };
        match state.share_tokens.entry(data.token.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict("Share token already exists"));
            }
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
            }
        }

        for other in state.share_tokens.values_mut() {
            if other.owner_id == data.owner_id && other.token != data.token {
                other.is_active = false;
            }
        }
        Ok(record)
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<ShareToken>> {
        self.ensure_available()?;
        Ok(self.state.read().await.share_tokens.get(token).cloned())
    }

    async fn find_active_for_owner(
        &self,
        owner_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ShareToken>> {
        self.ensure_available()?;
        let state = self.state.read().await;
        Ok(state
            .share_tokens
            .values()
            .filter(|t| t.owner_id == owner_id && t.is_usable_at(now))
            .max_by_key(|t| t.expires_at)
            .cloned())
    }

    async fn deactivate(&self, token: &str) -> AppResult<bool> {
        self.ensure_available()?;
        let mut state = self.state.write().await;
        match state.share_tokens.get_mut(token) {
            Some(record) if record.is_active => {
                record.is_active = false;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn deactivate_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        self.ensure_available()?;
        let mut state = self.state.write().await;
        let mut swept = 0;
        for record in state.share_tokens.values_mut() {
            if record.needs_sweep_at(now) {
                record.is_active = false;
                swept += 1;
            }
        }
        Ok(swept)
    }

    async fn purge_inactive(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        self.ensure_available()?;
        let mut state = self.state.write().await;
        let before = state.share_tokens.len();
        state
            .share_tokens
            .retain(|_, record| record.is_active || record.expires_at >= cutoff);
        Ok((before - state.share_tokens.len()) as u64)
    }

    async fn list_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<ShareToken>> {
        self.ensure_available()?;
        let state = self.state.read().await;
        let mut tokens: Vec<ShareToken> = state
            .share_tokens
            .values()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect();
        tokens.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.expires_at.cmp(&a.expires_at))
        });
        Ok(tokens)
    }
}
