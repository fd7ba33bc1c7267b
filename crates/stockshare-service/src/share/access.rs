//! Anonymous access to a merchant catalog through a share token.

use std::sync::Arc;

use tracing::debug;

use stockshare_core::error::AppError;
use stockshare_core::result::AppResult;
use stockshare_database::ProductStore;
use stockshare_entity::product::{Product, ProductOrder};

use super::service::ShareService;

/// The one message every failed resolution produces.
pub const SHARE_NOT_FOUND: &str = "Share link not found or expired";

/// Serves the public, read-only catalog behind a share link.
#[derive(Debug, Clone)]
pub struct CatalogAccessService {
    shares: Arc<ShareService>,
    products: Arc<dyn ProductStore>,
}

impl CatalogAccessService {
    pub fn new(shares: Arc<ShareService>, products: Arc<dyn ProductStore>) -> Self {
        Self { shares, products }
    }

    /// Products of the token's owner ordered by name.
    ///
    /// Unknown, superseded, and expired tokens all yield the same
    /// `NotFound` error.
    pub async fn catalog(&self, token: &str) -> AppResult<Vec<Product>> {
        let resolution = self.shares.resolve(token).await?;
        let Some(owner_id) = resolution.owner_id() else {
            debug!(?resolution, "Share link rejected");
            return Err(AppError::not_found(SHARE_NOT_FOUND));
        };

        self.products
            .list_by_owner(owner_id, ProductOrder::ByName)
            .await
    }
}
