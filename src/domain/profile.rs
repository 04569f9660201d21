//! User profile entity and subscription state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle state of a supporter subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    /// Paid and current.
    Active,
    /// Canceled (immediately or at period end).
    Canceled,
}

impl SubscriptionStatus {
    /// Stable string form used in storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Canceled => "canceled",
        }
    }

    /// Parses the storage form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "canceled" => Some(Self::Canceled),
            _ => None,
        }
    }
}

/// One profile per authenticated user, keyed by the auth user id.
///
/// The supporter flag and customer reference are mutated exclusively by the
/// subscription webhook flow; `is_supporter == true` implies a stored
/// `stripe_customer_id` once a checkout has completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Auth user id (primary key).
    pub id: Uuid,
    /// Public display name.
    pub display_name: String,
    /// Free-text bio.
    pub bio: Option<String>,
    /// Interest tags.
    pub interests: Vec<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Whether the user has an active paid subscription.
    pub is_supporter: bool,
    /// Payment-provider customer reference.
    pub stripe_customer_id: Option<String>,
    /// Current subscription state, if any subscription ever existed.
    pub subscription_status: Option<SubscriptionStatus>,
    /// When the subscription is scheduled to cancel.
    pub cancel_at: Option<DateTime<Utc>>,
    /// End of the current billing period.
    pub current_period_end: Option<DateTime<Utc>>,
}

impl Profile {
    /// A minimal profile row for a user first seen through a webhook event.
    #[must_use]
    pub fn minimal(id: Uuid) -> Self {
        Self {
            id,
            display_name: String::new(),
            bio: None,
            interests: Vec::new(),
            avatar_url: None,
            is_supporter: false,
            stripe_customer_id: None,
            subscription_status: None,
            cancel_at: None,
            current_period_end: None,
        }
    }
}
