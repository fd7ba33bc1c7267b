//! Dashboard for the authenticated merchant.

use std::sync::Arc;

use stockshare_core::result::AppResult;
use stockshare_database::ProductStore;
use stockshare_entity::product::ProductOrder;

use super::aggregator::{DashboardSummary, summarize};
use crate::context::RequestContext;

#[derive(Debug, Clone)]
pub struct DashboardService {
    products: Arc<dyn ProductStore>,
}

impl DashboardService {
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    pub async fn summary(&self, ctx: &RequestContext) -> AppResult<DashboardSummary> {
        let products = self
            .products
            .list_by_owner(ctx.user_id, ProductOrder::ById)
            .await?;
        Ok(summarize(&products))
    }
}
