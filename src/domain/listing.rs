//! Listing entity: a bookable event or a persistent hub.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::geo::GeoPoint;

/// Unique identifier for a listing.
///
/// Wraps a UUID v4. Generated at submission time and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Uuid)]
pub struct ListingId(Uuid);

impl ListingId {
    /// Creates a new random `ListingId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `ListingId` from an existing [`Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ListingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ListingId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ListingId> for Uuid {
    fn from(id: ListingId) -> Self {
        id.0
    }
}

/// Listing kind discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    /// A dated, bookable event.
    Event,
    /// A persistent hub without a fixed date range.
    Hub,
}

impl ListingType {
    /// Stable string form used in query parameters and storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Hub => "hub",
        }
    }

    /// Parses the query-parameter / storage form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "event" => Some(Self::Event),
            "hub" => Some(Self::Hub),
            _ => None,
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tri-state moderation flag on a listing.
///
/// Every listing starts at `Pending`; only the admin verification workflow
/// moves it to `Verified` or `Rejected`, and neither terminal state returns
/// to `Pending` in that flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VerifyStatus {
    /// Awaiting moderation; visible in public search.
    Pending,
    /// Approved by an admin; visible in public search.
    Verified,
    /// Declined by an admin; hidden from public search.
    Rejected,
}

impl VerifyStatus {
    /// Stable string form used in storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }

    /// Parses the storage form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "verified" => Some(Self::Verified),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for VerifyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moderation action requested by an admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VerifyAction {
    /// Approve the listing.
    Verify,
    /// Decline the listing.
    Reject,
}

impl VerifyAction {
    /// The status this action transitions a listing to.
    #[must_use]
    pub const fn target_status(&self) -> VerifyStatus {
        match self {
            Self::Verify => VerifyStatus::Verified,
            Self::Reject => VerifyStatus::Rejected,
        }
    }
}

/// A bookable event or persistent hub shown in search results.
///
/// The geographic point is all-or-nothing: a listing either has both
/// coordinates or no point at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
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
    /// Geographic point, if the submitter provided one.
    pub point: Option<GeoPoint>,
    /// First day of the event (hubs usually have none).
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

/// Owner-editable listing fields for `PATCH /api/listings/{id}`.
///
/// `None` means "leave unchanged". The verify status is deliberately absent;
/// it is mutated only through the admin workflow.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ListingPatch {
    /// New title.
    pub title: Option<String>,
    /// New city.
    pub city: Option<String>,
    /// New country.
    pub country: Option<String>,
    /// New geographic point.
    pub point: Option<GeoPoint>,
    /// New first day.
    pub starts_on: Option<NaiveDate>,
    /// New last day.
    pub ends_on: Option<NaiveDate>,
    /// Replacement photo URL list.
    pub photo_urls: Option<Vec<String>>,
    /// Replacement social link list.
    pub social_links: Option<Vec<String>>,
}

impl ListingPatch {
    /// Whether the patch changes anything at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.city.is_none()
            && self.country.is_none()
            && self.point.is_none()
            && self.starts_on.is_none()
            && self.ends_on.is_none()
            && self.photo_urls.is_none()
            && self.social_links.is_none()
    }
}
