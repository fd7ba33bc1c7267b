//! Share link handlers for the authenticated merchant.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;

use stockshare_core::error::AppError;

use crate::dto::request::CreateShareLinkRequest;
use crate::dto::response::ShareLinkEnvelope;
use crate::error::ApiError;
use crate::extractors::{AuthUser, BaseUrl};
use crate::state::AppState;

/// POST /api/share-links
///
/// The body is optional; an empty one issues a link with the default
/// lifetime.
pub async fn create_share_link(
    State(state): State<AppState>,
    auth: AuthUser,
    base_url: BaseUrl,
    body: Bytes,
) -> Result<(StatusCode, Json<ShareLinkEnvelope>), ApiError> {
    let req = parse_body(&body)?;

    let record = state
        .share_service
        .issue(auth.user_id, req.duration_minutes)
        .await?;
    let link = state.link_service.share_link(&record, base_url.as_str());

    Ok((
        StatusCode::CREATED,
        Json(ShareLinkEnvelope {
            share_link: Some(link),
        }),
    ))
}

/// GET /api/share-links/current
pub async fn current_share_link(
    State(state): State<AppState>,
    auth: AuthUser,
    base_url: BaseUrl,
) -> Result<Json<ShareLinkEnvelope>, ApiError> {
    let share_link = state
        .share_service
        .get_active(auth.user_id)
        .await?
        .map(|record| state.link_service.share_link(&record, base_url.as_str()));

    Ok(Json(ShareLinkEnvelope { share_link }))
}

fn parse_body(body: &[u8]) -> Result<CreateShareLinkRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CreateShareLinkRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))
}
