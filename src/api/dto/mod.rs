//! Wire DTOs, grouped by resource.

pub mod admin_dto;
pub mod billing_dto;
pub mod favourite_dto;
pub mod listing_dto;
pub mod review_dto;

pub use admin_dto::{VerifyRequest, VerifyResponse};
pub use billing_dto::{CancelResponse, CheckoutResponse, WebhookAck};
pub use favourite_dto::{FavouriteCheckParams, FavouriteCheckResponse};
pub use listing_dto::{ListingDto, ListingResponse, SearchParams, SearchResponse};
pub use review_dto::{CreateReviewRequest, ReviewDto, ReviewResponse, ReviewsQuery, ReviewsResponse};
