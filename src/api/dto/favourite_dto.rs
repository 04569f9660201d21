//! Favourite DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Query parameters for `GET /api/favourites/check`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct FavouriteCheckParams {
    /// Listing to check.
    pub listing_id: Uuid,
}

/// Response body for `GET /api/favourites/check`.
#[derive(Debug, Serialize, ToSchema)]
pub struct FavouriteCheckResponse {
    /// Always `true`.
    pub success: bool,
    /// Whether the signed-in user has favourited the listing.
    pub favourited: bool,
}

impl FavouriteCheckResponse {
    /// Wraps a membership check in the success envelope.
    #[must_use]
    pub const fn new(favourited: bool) -> Self {
        Self {
            success: true,
            favourited,
        }
    }
}
