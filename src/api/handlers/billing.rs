//! Billing handlers: checkout creation and cancellation.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{CancelResponse, CheckoutResponse};
use crate::app_state::AppState;
use crate::auth::require_user;
use crate::error::{ErrorResponse, HubError};

/// `POST /api/stripe/create-checkout` — Start a subscription checkout.
///
/// # Errors
///
/// Returns [`HubError::Unauthenticated`] without a valid bearer token and
/// [`HubError::Upstream`] when the payment provider call fails.
#[utoipa::path(
    post,
    path = "/api/stripe/create-checkout",
    tag = "Billing",
    summary = "Create a checkout session",
    responses(
        (status = 200, description = "Hosted checkout session", body = CheckoutResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 503, description = "Payment provider unavailable", body = ErrorResponse),
    )
)]
pub async fn create_checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HubError> {
    let user = require_user(state.auth.as_ref(), &headers).await?;
    let session = state.billing.create_checkout(&user).await?;
    Ok(Json(CheckoutResponse::new(session.id, session.url)))
}

/// `POST /api/stripe/cancel-subscription` — Cancel at period end.
///
/// # Errors
///
/// Returns [`HubError::Validation`] when the user has no subscription on
/// file and [`HubError::Upstream`] when the payment provider call fails.
#[utoipa::path(
    post,
    path = "/api/stripe/cancel-subscription",
    tag = "Billing",
    summary = "Cancel the subscription at period end",
    responses(
        (status = 200, description = "Scheduled cancellation", body = CancelResponse),
        (status = 400, description = "No subscription on file", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 503, description = "Payment provider unavailable", body = ErrorResponse),
    )
)]
pub async fn cancel_subscription(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HubError> {
    let user = require_user(state.auth.as_ref(), &headers).await?;
    let outcome = state.billing.cancel_subscription(&user).await?;
    Ok(Json(CancelResponse::new(outcome.cancel_at)))
}

/// Billing routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stripe/create-checkout", post(create_checkout))
        .route("/stripe/cancel-subscription", post(cancel_subscription))
}
