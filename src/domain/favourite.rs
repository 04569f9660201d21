//! Favourite: a join entity between a user and a listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::listing::ListingId;

/// A user's bookmark of a listing, unique per `(user, listing)` pair.
///
/// Uniqueness is enforced by the store's constraint, not by the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favourite {
    /// Auth user id.
    pub user_id: Uuid,
    /// Bookmarked listing.
    pub listing_id: ListingId,
    /// When the bookmark was created.
    pub created_at: DateTime<Utc>,
}
