//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use stockshare_entity::product::ProductPatch;
use stockshare_service::ProductInput;

use super::lenient;

/// Signup request body.
///
/// Missing fields deserialize as empty strings so the account service can
/// answer with its own "required" message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SignupRequest {
    #[validate(length(max = 320, message = "Email is too long"))]
    pub email: String,
    #[validate(length(max = 1024, message = "Password is too long"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(length(max = 320, message = "Email is too long"))]
    pub email: String,
    #[validate(length(max = 1024, message = "Password is too long"))]
    pub password: String,
}

/// Create product request.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(max = 128, message = "ID must be at most 128 characters"))]
    pub id: Option<String>,
    #[validate(length(max = 256, message = "Name must be at most 256 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 128, message = "Category must be at most 128 characters"))]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_i32")]
    pub stock: Option<i32>,
    #[validate(length(max = 64, message = "Unit must be at most 64 characters"))]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_i32")]
    pub reorder_point: Option<i32>,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub price: Option<f64>,
    #[validate(length(max = 2048, message = "Image URL is too long"))]
    pub image_url: Option<String>,
}

impl From<CreateProductRequest> for ProductInput {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
            category: req.category,
            stock: req.stock,
            unit: req.unit,
            reorder_point: req.reorder_point,
            price: req.price,
            image_url: req.image_url,
        }
    }
}

/// Update product request. Omitted fields stay unchanged; an empty or
/// `null` `imageUrl` removes the image.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(length(max = 256, message = "Name must be at most 256 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 128, message = "Category must be at most 128 characters"))]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_i32")]
    pub stock: Option<i32>,
    #[validate(length(max = 64, message = "Unit must be at most 64 characters"))]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_i32")]
    pub reorder_point: Option<i32>,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::double_option")]
    pub image_url: Option<Option<String>>,
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(req: UpdateProductRequest) -> Self {
        Self {
            name: req.name,
            category: req.category,
            stock: req.stock,
            unit: req.unit,
            reorder_point: req.reorder_point,
            price: req.price,
            image_url: req.image_url,
        }
    }
}

/// Create share link request. An empty body uses the default lifetime.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareLinkRequest {
    #[serde(default, deserialize_with = "lenient::option_minutes")]
    pub duration_minutes: Option<i64>,
}
