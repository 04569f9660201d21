//! Domain layer: entities, value types, and pure geo math.
//!
//! Nothing in this module touches the network or the store; services and
//! handlers compose these types with the persistence and provider layers.

pub mod favourite;
pub mod filter;
pub mod geo;
pub mod listing;
pub mod profile;
pub mod review;
pub mod role;

pub use favourite::Favourite;
pub use filter::{ListingFilter, RADIUS_KM_RANGE};
pub use geo::{GeoPoint, haversine_km};
pub use listing::{Listing, ListingId, ListingPatch, ListingType, VerifyAction, VerifyStatus};
pub use profile::{Profile, SubscriptionStatus};
pub use review::{NewReview, RATING_RANGE, Review};
pub use role::Role;
