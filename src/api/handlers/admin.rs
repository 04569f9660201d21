//! Admin verification endpoint.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{VerifyRequest, VerifyResponse};
use crate::app_state::AppState;
use crate::auth::require_admin;
use crate::domain::ListingId;
use crate::error::{ErrorResponse, HubError};

/// `POST /api/admin/verify` — Set a listing's verify status.
///
/// Preconditions are checked in a fixed order, each with its own failure
/// mode: bearer present (401), token valid (401), admin claim (403), body
/// shape (400). The body is therefore taken as raw text and parsed only
/// after authorization passes.
///
/// # Errors
///
/// Returns [`HubError::Unauthenticated`], [`HubError::Forbidden`], or
/// [`HubError::Validation`] per the order above.
#[utoipa::path(
    post,
    path = "/api/admin/verify",
    tag = "Admin",
    summary = "Verify or reject a listing",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "New verify status", body = VerifyResponse),
        (status = 400, description = "Invalid body or unknown listing", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
    )
)]
pub async fn verify_listing(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<impl IntoResponse, HubError> {
    let admin = require_admin(state.auth.as_ref(), &headers).await?;

    let request: VerifyRequest = serde_json::from_str(&body)
        .map_err(|e| HubError::validation("body", format!("expected id + action: {e}")))?;

    let listing_id = ListingId::from_uuid(request.id);
    let status = state
        .moderation
        .set_verification(listing_id, request.action)
        .await?;

    tracing::info!(admin_id = %admin.id, listing_id = %listing_id, %status, "admin moderation");
    Ok(Json(VerifyResponse::new(listing_id, status)))
}

/// Admin routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/admin/verify", post(verify_listing))
}
