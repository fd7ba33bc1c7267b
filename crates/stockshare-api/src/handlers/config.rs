//! Public client configuration handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::PublicConfigResponse;
use crate::state::AppState;

/// GET /api/config
pub async fn public_config(State(state): State<AppState>) -> Json<PublicConfigResponse> {
    Json(PublicConfigResponse::from(&state.config.media))
}
