//! Dashboard summary handler.

use axum::Json;
use axum::extract::State;

use stockshare_service::DashboardSummary;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/dashboard
pub async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<DashboardSummary>, ApiError> {
    let summary = state.dashboard_service.summary(&auth).await?;
    Ok(Json(summary))
}
