//! Product CRUD scoped to the authenticated merchant.

use std::sync::Arc;

use tracing::info;

use stockshare_core::error::AppError;
use stockshare_core::result::AppResult;
use stockshare_database::ProductStore;
use stockshare_entity::product::{NewProduct, Product, ProductOrder, ProductPatch};

use crate::context::RequestContext;

/// Product fields as submitted for creation; every field but the image is required.
#[derive(Debug, Clone, Default)]
pub struct ProductInput {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub stock: Option<i32>,
    pub unit: Option<String>,
    pub reorder_point: Option<i32>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
}

/// Manages the current merchant's products.
#[derive(Debug, Clone)]
pub struct ProductService {
    products: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    /// All products of the merchant ordered by id.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Product>> {
        self.products
            .list_by_owner(ctx.user_id, ProductOrder::ById)
            .await
    }

    pub async fn create(&self, ctx: &RequestContext, input: ProductInput) -> AppResult<Product> {
        let data = Self::validate_new(input)?;
        let product = self.products.create(ctx.user_id, &data).await?;

        info!(user_id = %ctx.user_id, product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Apply a sparse update. Omitted fields keep their values.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        patch: ProductPatch,
    ) -> AppResult<Product> {
        let patch = Self::validate_patch(patch)?;
        let product = self.products.update(ctx.user_id, id, &patch).await?;

        info!(user_id = %ctx.user_id, product_id = %id, "Product updated");
        Ok(product)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> AppResult<()> {
        if !self.products.delete(ctx.user_id, id).await? {
            return Err(AppError::not_found("Product not found"));
        }

        info!(user_id = %ctx.user_id, product_id = %id, "Product deleted");
        Ok(())
    }

    fn validate_new(input: ProductInput) -> AppResult<NewProduct> {
        let missing: Vec<&str> = [
            ("id", input.id.is_none()),
            ("name", input.name.is_none()),
            ("category", input.category.is_none()),
            ("stock", input.stock.is_none()),
            ("unit", input.unit.is_none()),
            ("reorderPoint", input.reorder_point.is_none()),
            ("price", input.price.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        let (
            Some(id),
            Some(name),
            Some(category),
            Some(stock),
            Some(unit),
            Some(reorder_point),
            Some(price),
        ) = (
            input.id,
            input.name,
            input.category,
            input.stock,
            input.unit,
            input.reorder_point,
            input.price,
        )
        else {
            return Err(AppError::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        };

        let data = NewProduct {
            id: id.trim().to_string(),
            name: name.trim().to_string(),
            category: category.trim().to_string(),
            stock,
            unit: unit.trim().to_string(),
            reorder_point,
            price,
            image_url: input
                .image_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
        };

        if [&data.id, &data.name, &data.category, &data.unit]
            .iter()
            .any(|value| value.is_empty())
        {
            return Err(AppError::validation(
                "ID, name, category, and unit must not be empty",
            ));
        }
        check_price(data.price)?;

        Ok(data)
    }

    fn validate_patch(patch: ProductPatch) -> AppResult<ProductPatch> {
        if patch.is_empty() {
            return Err(AppError::validation("No fields provided to update"));
        }

        let trimmed = |value: Option<String>| value.map(|v| v.trim().to_string());
        let patch = ProductPatch {
            name: trimmed(patch.name),
            category: trimmed(patch.category),
            unit: trimmed(patch.unit),
            image_url: patch.image_url.map(|url| {
                url.map(|u| u.trim().to_string())
                    .filter(|u| !u.is_empty())
            }),
            ..patch
        };

        if [&patch.name, &patch.category, &patch.unit]
            .iter()
            .any(|value| value.as_deref().is_some_and(str::is_empty))
        {
            return Err(AppError::validation(
                "Name, category, and unit must not be empty",
            ));
        }
        if let Some(price) = patch.price {
            check_price(price)?;
        }

        Ok(patch)
    }
}

fn check_price(price: f64) -> AppResult<()> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(AppError::validation("Price must be a non-negative number"))
    }
}
