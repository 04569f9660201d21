//! Payment provider webhook receiver.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::WebhookAck;
use crate::app_state::AppState;
use crate::error::{ErrorResponse, HubError};

/// Header carrying the provider's payload signature.
const SIGNATURE_HEADER: &str = "stripe-signature";

/// `POST /api/stripe/webhook` — Apply a signed subscription event.
///
/// The body is consumed as raw text because the signature covers the exact
/// payload; re-serializing a parsed value would break verification.
///
/// # Errors
///
/// Returns [`HubError::Signature`] when the header is missing or does not
/// match the payload, and [`HubError::Database`] when the profile update
/// fails (a 500 makes the provider redeliver).
#[utoipa::path(
    post,
    path = "/api/stripe/webhook",
    tag = "Billing",
    summary = "Receive a provider webhook",
    request_body(
        content = String,
        content_type = "application/json",
        description = "Raw provider event payload"
    ),
    responses(
        (status = 200, description = "Event applied or ignored", body = WebhookAck),
        (status = 400, description = "Signature verification failed", body = ErrorResponse),
        (status = 500, description = "Store failure; provider should retry", body = ErrorResponse),
    )
)]
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<impl IntoResponse, HubError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| HubError::Signature("missing signature header".to_string()))?;

    state.billing.handle_webhook(body.as_bytes(), signature).await?;
    Ok(Json(WebhookAck::new()))
}

/// Webhook routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/stripe/webhook", post(stripe_webhook))
}
