//! Billing and webhook DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Response body for `POST /api/stripe/create-checkout`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    /// Always `true`.
    pub success: bool,
    /// Provider session id.
    pub session_id: String,
    /// Hosted payment page to redirect the client to.
    pub url: String,
}

impl CheckoutResponse {
    /// Wraps a created session in the success envelope.
    #[must_use]
    pub const fn new(session_id: String, url: String) -> Self {
        Self {
            success: true,
            session_id,
            url,
        }
    }
}

/// Response body for `POST /api/stripe/cancel-subscription`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CancelResponse {
    /// Always `true`.
    pub success: bool,
    /// When the subscription will end, if the provider reported it.
    pub cancel_at: Option<DateTime<Utc>>,
}

impl CancelResponse {
    /// Wraps a scheduled cancellation in the success envelope.
    #[must_use]
    pub const fn new(cancel_at: Option<DateTime<Utc>>) -> Self {
        Self {
            success: true,
            cancel_at,
        }
    }
}

/// Acknowledgement body for the webhook receiver.
#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookAck {
    /// Always `true`.
    pub success: bool,
    /// Echo that the delivery was accepted.
    pub received: bool,
}

impl WebhookAck {
    /// The standard acknowledgement.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            success: true,
            received: true,
        }
    }
}

impl Default for WebhookAck {
    fn default() -> Self {
        Self::new()
    }
}
