//! Parsing provider webhook payloads into billing events.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::HubError;

/// The closed set of webhook events the billing service reacts to.
///
/// Everything else parses to [`SubscriptionEvent::Ignored`] and is
/// acknowledged without side effects, since the provider delivers the full
/// event firehose to every endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum SubscriptionEvent {
    /// A checkout session finished; the user becomes a supporter.
    CheckoutCompleted {
        /// Provider event id (for idempotency-aware logging).
        event_id: String,
        /// Auth user id carried in the session's client reference.
        user_id: Uuid,
        /// Provider customer reference to store on the profile.
        customer_id: String,
    },
    /// A subscription was canceled or ran out.
    SubscriptionCanceled {
        /// Provider event id.
        event_id: String,
        /// Customer whose profile must be updated.
        customer_id: String,
        /// When the cancellation took or takes effect.
        canceled_at: Option<DateTime<Utc>>,
        /// End of the final billing period.
        period_end: Option<DateTime<Utc>>,
        /// `true` when the subscription has actually ended (deleted event),
        /// `false` when cancellation is merely scheduled for period end.
        ended: bool,
    },
    /// An event type this service does not act on.
    Ignored(String),
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    data: RawData,
}

#[derive(Debug, Deserialize)]
struct RawData {
    object: serde_json::Value,
}

fn unix_ts(value: Option<&serde_json::Value>) -> Option<DateTime<Utc>> {
    value
        .and_then(serde_json::Value::as_i64)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

impl SubscriptionEvent {
    /// Parses a raw (already signature-verified) webhook body.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] when the body is not a well-formed
    /// provider event, or when a handled event type is missing the fields
    /// this service depends on.
    pub fn parse(body: &[u8]) -> Result<Self, HubError> {
        let raw: RawEvent = serde_json::from_slice(body)
            .map_err(|e| HubError::validation("body", format!("malformed event: {e}")))?;
        let object = &raw.data.object;

        match raw.event_type.as_str() {
            "checkout.session.completed" => {
                let user_id = object
                    .get("client_reference_id")
                    .and_then(|v| v.as_str())
                    .and_then(|s| Uuid::parse_str(s).ok())
                    .ok_or_else(|| {
                        HubError::validation(
                            "client_reference_id",
                            "missing or not a user id",
                        )
                    })?;
                let customer_id = object
                    .get("customer")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| HubError::validation("customer", "missing customer id"))?
                    .to_string();
                Ok(Self::CheckoutCompleted {
                    event_id: raw.id,
                    user_id,
                    customer_id,
                })
            }
            "customer.subscription.deleted" => {
                let customer_id = object
                    .get("customer")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| HubError::validation("customer", "missing customer id"))?
                    .to_string();
                Ok(Self::SubscriptionCanceled {
                    event_id: raw.id,
                    customer_id,
                    canceled_at: unix_ts(object.get("canceled_at")),
                    period_end: unix_ts(object.get("current_period_end")),
                    ended: true,
                })
            }
            // An update that schedules cancellation is treated the same as a
            // cancellation: the profile records status + timestamps.
            "customer.subscription.updated" => {
                let scheduled = object
                    .get("cancel_at_period_end")
                    .and_then(serde_json::Value::as_bool)
                    .unwrap_or(false);
                if !scheduled {
                    return Ok(Self::Ignored(raw.event_type));
                }
                let customer_id = object
                    .get("customer")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| HubError::validation("customer", "missing customer id"))?
                    .to_string();
                Ok(Self::SubscriptionCanceled {
                    event_id: raw.id,
                    customer_id,
                    canceled_at: unix_ts(object.get("cancel_at")),
                    period_end: unix_ts(object.get("current_period_end")),
                    ended: false,
                })
            }
            other => Ok(Self::Ignored(other.to_string())),
        }
    }
}
