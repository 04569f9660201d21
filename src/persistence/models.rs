//! Row models mapping store rows onto domain entities.
//!
//! Enum-like columns are stored as text and parsed on the way out; a row
//! carrying an unknown discriminator is a data error, not a panic.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::{
    GeoPoint, Listing, ListingId, ListingType, Profile, Review, SubscriptionStatus, VerifyStatus,
};
use crate::error::HubError;

/// A row from the `listings` table.
#[derive(Debug, Clone, FromRow)]
pub struct ListingRow {
    /// Primary key.
    pub id: Uuid,
    /// Kind discriminator (`event` / `hub`).
    pub ltype: String,
    /// Display title.
    pub title: String,
    /// City name.
    pub city: String,
    /// Country name.
    pub country: String,
    /// Latitude, present only together with `lng`.
    pub lat: Option<f64>,
    /// Longitude, present only together with `lat`.
    pub lng: Option<f64>,
    /// First day of the event.
    pub starts_on: Option<NaiveDate>,
    /// Last day of the event.
    pub ends_on: Option<NaiveDate>,
    /// Moderation status (`pending` / `verified` / `rejected`).
    pub verify: String,
    /// Ordered photo URLs.
    pub photo_urls: Vec<String>,
    /// Social / external links.
    pub social_links: Vec<String>,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
    /// Auth user id of the submitter.
    pub owner_id: Uuid,
}

impl ListingRow {
    /// Converts the row into a domain [`Listing`].
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Database`] when a discriminator column holds an
    /// unknown value or the coordinate pair is half-present.
    pub fn into_listing(self) -> Result<Listing, HubError> {
        let ltype = ListingType::parse(&self.ltype)
            .ok_or_else(|| HubError::Database(format!("unknown listing type: {}", self.ltype)))?;
        let verify = VerifyStatus::parse(&self.verify)
            .ok_or_else(|| HubError::Database(format!("unknown verify status: {}", self.verify)))?;
        let point = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            (None, None) => None,
            _ => {
                return Err(HubError::Database(format!(
                    "listing {} has a half-present coordinate pair",
                    self.id
                )));
            }
        };

        Ok(Listing {
            id: ListingId::from_uuid(self.id),
            ltype,
            title: self.title,
            city: self.city,
            country: self.country,
            point,
            starts_on: self.starts_on,
            ends_on: self.ends_on,
            verify,
            photo_urls: self.photo_urls,
            social_links: self.social_links,
            created_at: self.created_at,
            owner_id: self.owner_id,
        })
    }
}

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow)]
pub struct ReviewRow {
    /// Primary key.
    pub id: Uuid,
    /// Listing the review belongs to.
    pub listing_id: Uuid,
    /// Author's auth user id.
    pub author_id: Uuid,
    /// Display name captured at submission time.
    pub author_name: String,
    /// Star rating 1–5.
    pub rating: i16,
    /// Free-text comment.
    pub comment: String,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: row.id,
            listing_id: ListingId::from_uuid(row.listing_id),
            author_id: row.author_id,
            author_name: row.author_name,
            rating: row.rating,
            comment: row.comment,
            created_at: row.created_at,
        }
    }
}

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
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
    /// Supporter flag.
    pub is_supporter: bool,
    /// Payment-provider customer reference.
    pub stripe_customer_id: Option<String>,
    /// Subscription state discriminator.
    pub subscription_status: Option<String>,
    /// Scheduled cancellation time.
    pub cancel_at: Option<DateTime<Utc>>,
    /// End of the current billing period.
    pub current_period_end: Option<DateTime<Utc>>,
}

impl ProfileRow {
    /// Converts the row into a domain [`Profile`].
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Database`] when the subscription status column
    /// holds an unknown value.
    pub fn into_profile(self) -> Result<Profile, HubError> {
        let subscription_status = match self.subscription_status {
            None => None,
            Some(raw) => Some(SubscriptionStatus::parse(&raw).ok_or_else(|| {
                HubError::Database(format!("unknown subscription status: {raw}"))
            })?),
        };

        Ok(Profile {
            id: self.id,
            display_name: self.display_name,
            bio: self.bio,
            interests: self.interests,
            avatar_url: self.avatar_url,
            is_supporter: self.is_supporter,
            stripe_customer_id: self.stripe_customer_id,
            subscription_status,
            cancel_at: self.cancel_at,
            current_period_end: self.current_period_end,
        })
    }
}
