//! Listing-related DTOs for search, fetch, and owner updates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{GeoPoint, Listing, ListingId, ListingType, VerifyStatus};

/// Raw query parameters for `GET /api/listings`.
///
/// Everything arrives as optional text and is validated and coerced in one
/// pass so a malformed parameter produces a per-field error rather than a
/// generic extractor rejection.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Listing kind: `event` or `hub`.
    pub ltype: Option<String>,
    /// Start of the required-overlap window (ISO-8601 date).
    pub from: Option<String>,
    /// End of the required-overlap window (ISO-8601 date).
    pub to: Option<String>,
    /// Verified filter: `true` or `false`. Omitted shows verified + pending.
    pub verified: Option<String>,
    /// Case-insensitive substring match on city or country.
    pub location: Option<String>,
    /// Radius center as `lng,lat`.
    pub near: Option<String>,
    /// Radius in kilometers, 0.1–5000.
    pub radius_km: Option<String>,
}

/// One listing in a response body.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListingDto {
    /// Unique identifier.
    pub id: ListingId,
    /// Event or hub.
    pub ltype: ListingType,
    /// Display title.
    pub title: String,
    /// City name.
    pub city: String,
    /// Country name.
    pub country: String,
    /// Geographic point, if stored.
    pub point: Option<GeoPoint>,
    /// First day of the event.
    pub starts_on: Option<NaiveDate>,
    /// Last day of the event.
    pub ends_on: Option<NaiveDate>,
    /// Moderation status.
    pub verify: VerifyStatus,
    /// Ordered photo URLs.
    pub photo_urls: Vec<String>,
    /// Social / external links.
    pub social_links: Vec<String>,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
    /// Auth user id of the submitter.
    pub owner_id: Uuid,
}

impl From<Listing> for ListingDto {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.id,
            ltype: listing.ltype,
            title: listing.title,
            city: listing.city,
            country: listing.country,
            point: listing.point,
            starts_on: listing.starts_on,
            ends_on: listing.ends_on,
            verify: listing.verify,
            photo_urls: listing.photo_urls,
            social_links: listing.social_links,
            created_at: listing.created_at,
            owner_id: listing.owner_id,
        }
    }
}

/// Response body for `GET /api/listings`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    /// Always `true`.
    pub success: bool,
    /// Number of matches.
    pub count: usize,
    /// Matching listings, newest first.
    pub listings: Vec<ListingDto>,
}

impl SearchResponse {
    /// Wraps search results in the success envelope.
    #[must_use]
    pub fn new(listings: Vec<Listing>) -> Self {
        let listings: Vec<ListingDto> = listings.into_iter().map(ListingDto::from).collect();
        Self {
            success: true,
            count: listings.len(),
            listings,
        }
    }
}

/// Response body for single-listing endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListingResponse {
    /// Always `true`.
    pub success: bool,
    /// The listing.
    pub listing: ListingDto,
}

impl ListingResponse {
    /// Wraps one listing in the success envelope.
    #[must_use]
    pub fn new(listing: Listing) -> Self {
        Self {
            success: true,
            listing: listing.into(),
        }
    }
}
