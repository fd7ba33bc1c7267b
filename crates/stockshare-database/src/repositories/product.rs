//! Product repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use stockshare_core::error::{AppError, ErrorKind};
use stockshare_core::result::AppResult;
use stockshare_entity::product::{NewProduct, Product, ProductOrder, ProductPatch};

use crate::error::{classify, is_foreign_key_violation};
use crate::store::ProductStore;

/// PostgreSQL-backed [`ProductStore`].
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn list_by_owner(&self, owner_id: Uuid, order: ProductOrder) -> AppResult<Vec<Product>> {
        let sql = match order {
            ProductOrder::ById => "SELECT * FROM products WHERE owner_id = $1 ORDER BY id",
            ProductOrder::ByName => "SELECT * FROM products WHERE owner_id = $1 ORDER BY name, id",
        };
        sqlx::query_as::<_, Product>(sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| classify("Failed to list products", e))
    }

    async fn create(&self, owner_id: Uuid, data: &NewProduct) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            "INSERT INTO products (owner_id, id, name, category, stock, unit, reorder_point, price, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(owner_id)
        .bind(&data.id)
        .bind(&data.name)
        .bind(&data.category)
        .bind(data.stock)
        .bind(&data.unit)
        .bind(data.reorder_point)
        .bind(data.price)
        .bind(&data.image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                return AppError::unauthorized("Account no longer exists");
            }
            match classify("Failed to create product", e) {
                err if err.is(ErrorKind::Conflict) => {
                    AppError::conflict(format!("Product '{}' already exists", data.id))
                }
                err => err,
            }
        })
    }

    async fn update(&self, owner_id: Uuid, id: &str, patch: &ProductPatch) -> AppResult<Product> {
        let (set_image, image_url) = match &patch.image_url {
            Some(value) => (true, value.clone()),
            None => (false, None),
        };

        sqlx::query_as::<_, Product>(
            "UPDATE products SET \
                name = COALESCE($3, name), \
                category = COALESCE($4, category), \
                stock = COALESCE($5, stock), \
                unit = COALESCE($6, unit), \
                reorder_point = COALESCE($7, reorder_point), \
                price = COALESCE($8, price), \
                image_url = CASE WHEN $9 THEN $10 ELSE image_url END, \
                updated_at = NOW() \
             WHERE owner_id = $1 AND id = $2 RETURNING *",
        )
        .bind(owner_id)
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.category)
        .bind(patch.stock)
        .bind(&patch.unit)
        .bind(patch.reorder_point)
        .bind(patch.price)
        .bind(set_image)
        .bind(image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify("Failed to update product", e))?
        .ok_or_else(|| AppError::not_found(format!("Product '{id}' not found")))
    }

    async fn delete(&self, owner_id: Uuid, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| classify("Failed to delete product", e))?;
        Ok(result.rows_affected() > 0)
    }
}
