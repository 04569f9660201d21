//! Review entity, attached to exactly one listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::listing::ListingId;

/// Valid rating range, inclusive.
pub const RATING_RANGE: std::ops::RangeInclusive<i16> = 1..=5;

/// A user review of a listing.
///
/// Visibility follows the listing: reviews surface only while the listing's
/// verify status is `verified` or `pending` (enforced by the store's access
/// policy, read at query time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Unique identifier.
    pub id: Uuid,
    /// Listing this review belongs to.
    pub listing_id: ListingId,
    /// Auth user id of the author.
    pub author_id: Uuid,
    /// Display name captured at submission time.
    pub author_name: String,
    /// Star rating in [`RATING_RANGE`].
    pub rating: i16,
    /// Free-text comment.
    pub comment: String,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a review.
#[derive(Debug, Clone)]
pub struct NewReview {
    /// Listing being reviewed.
    pub listing_id: ListingId,
    /// Auth user id of the author.
    pub author_id: Uuid,
    /// Display name captured at submission time.
    pub author_name: String,
    /// Star rating in [`RATING_RANGE`].
    pub rating: i16,
    /// Free-text comment.
    pub comment: String,
}
