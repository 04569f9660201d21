//! Payment provider integration.
//!
//! Three concerns live here, each behind its own seam:
//!
//! - [`signature`]: HMAC verification of inbound webhook payloads.
//! - [`events`]: parsing provider events into the closed set the billing
//!   service reacts to.
//! - [`stripe`]: the outbound HTTP gateway for checkout and cancellation.

pub mod events;
pub mod signature;
pub mod stripe;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::HubError;

pub use events::SubscriptionEvent;
pub use signature::verify_signature;
pub use stripe::StripeGateway;

/// A freshly created hosted checkout session.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    /// Provider session id.
    pub id: String,
    /// Hosted payment page the client is redirected to.
    pub url: String,
}

/// Result of scheduling a cancellation at period end.
#[derive(Debug, Clone)]
pub struct CancelOutcome {
    /// When the subscription will actually end.
    pub cancel_at: Option<DateTime<Utc>>,
}

/// Outbound calls to the payment provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync + std::fmt::Debug {
    /// Creates a subscription checkout session for the given user.
    ///
    /// The user id travels in the session's client reference so the webhook
    /// can attribute the completed checkout.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Upstream`] when the provider call fails.
    async fn create_checkout_session(
        &self,
        user_id: uuid::Uuid,
        email: &str,
    ) -> Result<CheckoutSession, HubError>;

    /// Schedules the customer's active subscription to cancel at period end.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] when the customer has no active
    /// subscription and [`HubError::Upstream`] when the provider call fails.
    async fn cancel_at_period_end(&self, customer_id: &str) -> Result<CancelOutcome, HubError>;
}
