//! Outbound Stripe API gateway.

use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;
use uuid::Uuid;

use super::{CancelOutcome, CheckoutSession, PaymentGateway};
use crate::error::HubError;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// HTTP client for the Stripe REST API, authenticated with the secret key.
#[derive(Debug, Clone)]
pub struct StripeGateway {
    http: reqwest::Client,
    api_base: String,
    secret_key: String,
    price_id: String,
    success_url: String,
    cancel_url: String,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct SubscriptionObject {
    id: String,
    #[serde(default)]
    current_period_end: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct SubscriptionList {
    #[serde(default)]
    data: Vec<SubscriptionObject>,
}

impl StripeGateway {
    /// Creates a gateway using the given client and account configuration.
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        secret_key: String,
        price_id: String,
        success_url: String,
        cancel_url: String,
    ) -> Self {
        Self {
            http,
            api_base: STRIPE_API_BASE.to_string(),
            secret_key,
            price_id,
            success_url,
            cancel_url,
        }
    }

    /// Overrides the API base URL (test servers).
    #[must_use]
    pub fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base;
        self
    }

    async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<reqwest::Response, HubError> {
        let response = self
            .http
            .post(format!("{}{path}", self.api_base))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(form)
            .send()
            .await
            .map_err(|e| HubError::Upstream(format!("payment provider unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(HubError::Upstream(format!(
                "payment provider returned {}",
                response.status()
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_checkout_session(
        &self,
        user_id: Uuid,
        email: &str,
    ) -> Result<CheckoutSession, HubError> {
        let user_ref = user_id.to_string();
        let form = [
            ("mode", "subscription"),
            ("line_items[0][price]", self.price_id.as_str()),
            ("line_items[0][quantity]", "1"),
            ("success_url", self.success_url.as_str()),
            ("cancel_url", self.cancel_url.as_str()),
            ("client_reference_id", user_ref.as_str()),
            ("customer_email", email),
        ];

        let session: SessionResponse = self
            .post_form("/checkout/sessions", &form)
            .await?
            .json()
            .await
            .map_err(|e| HubError::Upstream(format!("malformed session response: {e}")))?;

        tracing::info!(session_id = %session.id, user_id = %user_ref, "checkout session created");
        Ok(CheckoutSession {
            id: session.id,
            url: session.url,
        })
    }

    async fn cancel_at_period_end(&self, customer_id: &str) -> Result<CancelOutcome, HubError> {
        // Two steps: resolve the customer's active subscription, then flag it.
        let list: SubscriptionList = self
            .http
            .get(format!("{}/subscriptions", self.api_base))
            .basic_auth(&self.secret_key, None::<&str>)
            .query(&[("customer", customer_id), ("status", "active"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| HubError::Upstream(format!("payment provider unreachable: {e}")))?
            .json()
            .await
            .map_err(|e| HubError::Upstream(format!("malformed subscription list: {e}")))?;

        let Some(subscription) = list.data.into_iter().next() else {
            return Err(HubError::NotFound(format!(
                "no active subscription for customer {customer_id}"
            )));
        };

        let updated: SubscriptionObject = self
            .post_form(
                &format!("/subscriptions/{}", subscription.id),
                &[("cancel_at_period_end", "true")],
            )
            .await?
            .json()
            .await
            .map_err(|e| HubError::Upstream(format!("malformed subscription response: {e}")))?;

        tracing::info!(
            subscription_id = %updated.id,
            customer_id,
            "subscription set to cancel at period end"
        );
        Ok(CancelOutcome {
            cancel_at: updated
                .current_period_end
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        })
    }
}
