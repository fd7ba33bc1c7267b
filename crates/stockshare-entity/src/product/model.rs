//! Product entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A catalog entry owned by one merchant.
///
/// `id` is chosen by the merchant and is only unique within the owner's
/// catalog. The owner and timestamps stay server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(skip)]
    pub owner_id: Uuid,
    pub id: String,
    pub name: String,
    pub category: String,
    pub stock: i32,
    pub unit: String,
    pub reorder_point: i32,
    pub price: f64,
    pub image_url: Option<String>,
    #[serde(skip, default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(skip, default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether stock has fallen to or below the reorder point.
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.reorder_point
    }

    /// Stock multiplied by unit price.
    pub fn stock_value(&self) -> f64 {
        f64::from(self.stock) * self.price
    }
}

/// Data required to create a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub id: String,
    pub name: String,
    pub category: String,
    pub stock: i32,
    pub unit: String,
    pub reorder_point: i32,
    pub price: f64,
    pub image_url: Option<String>,
}

/// Sort order for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductOrder {
    /// Merchant view.
    ById,
    /// Public catalog view.
    ByName,
}
