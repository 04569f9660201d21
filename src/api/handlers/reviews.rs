//! Review handlers: list and create.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{CreateReviewRequest, ReviewResponse, ReviewsQuery, ReviewsResponse};
use crate::app_state::AppState;
use crate::auth::require_user;
use crate::domain::ListingId;
use crate::error::{ErrorResponse, HubError};

/// `GET /api/reviews` — List reviews for a listing.
///
/// # Errors
///
/// Returns [`HubError::NotFound`] for an unknown listing.
#[utoipa::path(
    get,
    path = "/api/reviews",
    tag = "Reviews",
    summary = "List reviews for a listing",
    params(ReviewsQuery),
    responses(
        (status = 200, description = "Reviews, newest first", body = ReviewsResponse),
        (status = 404, description = "Listing not found", body = ErrorResponse),
    )
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(query): Query<ReviewsQuery>,
) -> Result<impl IntoResponse, HubError> {
    let reviews = state
        .listings
        .reviews_for(ListingId::from_uuid(query.listing_id))
        .await?;
    Ok(Json(ReviewsResponse::new(reviews)))
}

/// `POST /api/reviews` — Create a review as the authenticated user.
///
/// The body is taken as raw text and parsed only after the credential check,
/// so a malformed body never leaks past an invalid token.
///
/// # Errors
///
/// Returns [`HubError::Unauthenticated`] without a valid bearer token,
/// [`HubError::Validation`] for a malformed body or out-of-range rating, and
/// [`HubError::NotFound`] for an unknown listing.
#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = "Reviews",
    summary = "Create a review",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Stored review", body = ReviewResponse),
        (status = 400, description = "Invalid rating", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Listing not found", body = ErrorResponse),
    )
)]
pub async fn create_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<impl IntoResponse, HubError> {
    let author = require_user(state.auth.as_ref(), &headers).await?;

    let request: CreateReviewRequest = serde_json::from_str(&body)
        .map_err(|e| HubError::validation("body", format!("expected listing_id + rating: {e}")))?;

    let review = state
        .listings
        .create_review(
            ListingId::from_uuid(request.listing_id),
            &author,
            request.rating,
            request.comment,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ReviewResponse::new(review))))
}

/// Review routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reviews", get(list_reviews).post(create_review))
}
