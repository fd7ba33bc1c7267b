//! Anonymous catalog access through a share link.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::response::ProductListResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/public/products/{token}
///
/// Unknown, superseded, and expired tokens are indistinguishable: all of
/// them get the same 404 body.
pub async fn shared_catalog(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ProductListResponse>, ApiError> {
    let products = state.catalog_access.catalog(&token).await?;
    Ok(Json(ProductListResponse { products }))
}
