//! Subscription billing: checkout, cancellation, and the webhook flow.
//!
//! The webhook path is the only writer of the profile's supporter fields.
//! Every mutation is a deterministic "set field to X", so the provider's
//! at-least-once delivery is safe by construction: replaying an event leaves
//! the profile in the same final state.

use std::sync::Arc;

use crate::auth::AuthUser;
use crate::domain::SubscriptionStatus;
use crate::error::HubError;
use crate::payments::{CancelOutcome, CheckoutSession, PaymentGateway, SubscriptionEvent};
use crate::persistence::HubStore;

/// Coordinator for checkout, cancellation, and webhook state transitions.
#[derive(Debug, Clone)]
pub struct BillingService {
    store: Arc<dyn HubStore>,
    gateway: Arc<dyn PaymentGateway>,
    webhook_secret: String,
}

impl BillingService {
    /// Creates a new `BillingService`.
    #[must_use]
    pub fn new(
        store: Arc<dyn HubStore>,
        gateway: Arc<dyn PaymentGateway>,
        webhook_secret: String,
    ) -> Self {
        Self {
            store,
            gateway,
            webhook_secret,
        }
    }

    /// Starts a hosted checkout session for the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Upstream`] when the provider call fails.
    pub async fn create_checkout(&self, user: &AuthUser) -> Result<CheckoutSession, HubError> {
        self.gateway
            .create_checkout_session(user.id, &user.email)
            .await
    }

    /// Schedules the user's subscription to cancel at period end and records
    /// the pending cancellation on the profile.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] when the user has no subscription on
    /// file (or the provider reports none active) and [`HubError::Upstream`]
    /// when the provider call fails.
    pub async fn cancel_subscription(&self, user: &AuthUser) -> Result<CancelOutcome, HubError> {
        let profile = self
            .store
            .get_profile(user.id)
            .await?
            .ok_or_else(|| HubError::validation("user", "no profile on file"))?;
        let customer_id = profile
            .stripe_customer_id
            .ok_or_else(|| HubError::validation("user", "no subscription on file"))?;

        // A stored customer with nothing active at the provider is a bad
        // request, not a missing resource.
        let outcome = match self.gateway.cancel_at_period_end(&customer_id).await {
            Ok(outcome) => outcome,
            Err(HubError::NotFound(message)) => {
                return Err(HubError::validation("user", message));
            }
            Err(other) => return Err(other),
        };

        // The webhook will confirm this transition too; recording it now
        // keeps the profile honest if that delivery is delayed.
        self.store
            .record_subscription_cancellation(
                &customer_id,
                SubscriptionStatus::Canceled,
                outcome.cancel_at,
                outcome.cancel_at,
                false,
            )
            .await?;

        Ok(outcome)
    }

    /// Verifies and applies one provider webhook delivery.
    ///
    /// Signature verification happens before the body is parsed or any state
    /// is touched; a mismatch rejects the delivery outright. Handled events
    /// apply idempotent profile mutations; everything else is acknowledged
    /// and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Signature`] on authenticity failure (provider will
    /// not see a retryable status) and [`HubError::Database`] on store
    /// failure (surfaced as 500 so the provider redelivers).
    pub async fn handle_webhook(
        &self,
        body: &[u8],
        signature_header: &str,
    ) -> Result<(), HubError> {
        crate::payments::verify_signature(&self.webhook_secret, body, signature_header)?;

        match SubscriptionEvent::parse(body)? {
            SubscriptionEvent::CheckoutCompleted {
                event_id,
                user_id,
                customer_id,
            } => {
                self.store.mark_supporter(user_id, &customer_id).await?;
                tracing::info!(%event_id, %user_id, "checkout completed; supporter enabled");
                Ok(())
            }
            SubscriptionEvent::SubscriptionCanceled {
                event_id,
                customer_id,
                canceled_at,
                period_end,
                ended,
            } => {
                let result = self
                    .store
                    .record_subscription_cancellation(
                        &customer_id,
                        SubscriptionStatus::Canceled,
                        canceled_at,
                        period_end,
                        ended,
                    )
                    .await;
                match result {
                    Ok(()) => {
                        tracing::info!(%event_id, customer_id, ended, "subscription canceled");
                        Ok(())
                    }
                    // No profile holds this customer reference; retrying
                    // cannot fix that, so acknowledge the delivery.
                    Err(HubError::NotFound(_)) => {
                        tracing::warn!(%event_id, customer_id, "cancellation for unknown customer");
                        Ok(())
                    }
                    Err(other) => Err(other),
                }
            }
            SubscriptionEvent::Ignored(event_type) => {
                tracing::debug!(event_type, "webhook event ignored");
                Ok(())
            }
        }
    }
}
