//! Product CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use stockshare_entity::product::Product;

use crate::dto::request::{CreateProductRequest, UpdateProductRequest};
use crate::dto::response::ProductListResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProductListResponse>, ApiError> {
    let products = state.product_service.list(&auth).await?;
    Ok(Json(ProductListResponse { products }))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.product_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .product_service
        .update(&auth, &id, req.into())
        .await?;
    Ok(Json(product))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.product_service.delete(&auth, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
