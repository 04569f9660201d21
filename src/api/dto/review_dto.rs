//! Review DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{ListingId, Review};

/// Query parameters for `GET /api/reviews`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ReviewsQuery {
    /// Listing whose reviews to return.
    pub listing_id: Uuid,
}

/// Request body for `POST /api/reviews`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    /// Listing being reviewed.
    pub listing_id: Uuid,
    /// Star rating 1–5.
    pub rating: i16,
    /// Free-text comment.
    #[serde(default)]
    pub comment: String,
}

/// One review in a response body.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewDto {
    /// Unique identifier.
    pub id: Uuid,
    /// Listing the review belongs to.
    pub listing_id: ListingId,
    /// Display name of the author.
    pub author_name: String,
    /// Star rating 1–5.
    pub rating: i16,
    /// Free-text comment.
    pub comment: String,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewDto {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            listing_id: review.listing_id,
            author_name: review.author_name,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

/// Response body for `GET /api/reviews`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewsResponse {
    /// Always `true`.
    pub success: bool,
    /// Reviews, newest first.
    pub reviews: Vec<ReviewDto>,
}

impl ReviewsResponse {
    /// Wraps a review list in the success envelope.
    #[must_use]
    pub fn new(reviews: Vec<Review>) -> Self {
        Self {
            success: true,
            reviews: reviews.into_iter().map(ReviewDto::from).collect(),
        }
    }
}

/// Response body for `POST /api/reviews`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    /// Always `true`.
    pub success: bool,
    /// The stored review.
    pub review: ReviewDto,
}

impl ReviewResponse {
    /// Wraps one review in the success envelope.
    #[must_use]
    pub fn new(review: Review) -> Self {
        Self {
            success: true,
            review: review.into(),
        }
    }
}
