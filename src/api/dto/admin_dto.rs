//! Admin verification DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{ListingId, VerifyAction, VerifyStatus};

/// Request body for `POST /api/admin/verify`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct VerifyRequest {
    /// Listing to moderate.
    pub id: Uuid,
    /// `verify` or `reject`.
    pub action: VerifyAction,
}

/// Response body for `POST /api/admin/verify`.
#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    /// Always `true`.
    pub success: bool,
    /// The moderated listing.
    pub id: ListingId,
    /// The status the listing now carries.
    pub status: VerifyStatus,
}

impl VerifyResponse {
    /// Wraps a completed transition in the success envelope.
    #[must_use]
    pub const fn new(id: ListingId, status: VerifyStatus) -> Self {
        Self {
            success: true,
            id,
            status,
        }
    }
}
