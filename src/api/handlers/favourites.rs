//! Favourite membership check.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{FavouriteCheckParams, FavouriteCheckResponse};
use crate::app_state::AppState;
use crate::auth::require_user;
use crate::domain::ListingId;
use crate::error::{ErrorResponse, HubError};

/// `GET /api/favourites/check` — Whether the signed-in user has favourited
/// a listing.
///
/// # Errors
///
/// Returns [`HubError::Unauthenticated`] without a valid bearer token.
#[utoipa::path(
    get,
    path = "/api/favourites/check",
    tag = "Favourites",
    summary = "Check favourite membership",
    params(FavouriteCheckParams),
    responses(
        (status = 200, description = "Membership flag", body = FavouriteCheckResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn check_favourite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<FavouriteCheckParams>,
) -> Result<impl IntoResponse, HubError> {
    let user = require_user(state.auth.as_ref(), &headers).await?;
    let favourited = state
        .listings
        .is_favourite(user.id, ListingId::from_uuid(params.listing_id))
        .await?;
    Ok(Json(FavouriteCheckResponse::new(favourited)))
}

/// Favourite routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/favourites/check", get(check_favourite))
}
