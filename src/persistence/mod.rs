//! Persistence layer: the [`HubStore`] trait and its PostgreSQL
//! implementation.
//!
//! All entities are owned by the relational store; the application holds no
//! authoritative in-process copy and every read re-fetches. Services depend
//! only on the trait so tests can run against the in-memory fake.

pub mod models;
pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    Listing, ListingFilter, ListingId, ListingPatch, NewReview, Profile, Review,
    SubscriptionStatus, VerifyStatus,
};
use crate::error::HubError;

pub use postgres::PostgresStore;

/// Storage operations used by the services.
///
/// Mutations are single-row and rely on the store's own constraints
/// (primary keys, the `(user_id, listing_id)` uniqueness on favourites,
/// upserts) rather than application-level locking.
#[async_trait]
pub trait HubStore: Send + Sync + std::fmt::Debug {
    /// Returns listings matching every server-side filter, newest first.
    ///
    /// The geo radius pair on the filter is ignored here; it is applied as a
    /// post-filter stage by the listing service.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Database`] on store failure.
    async fn search_listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>, HubError>;

    /// Fetches one listing by id.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Database`] on store failure.
    async fn get_listing(&self, id: ListingId) -> Result<Option<Listing>, HubError>;

    /// Applies an owner patch and returns the updated listing.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] for an unknown id and
    /// [`HubError::Database`] on store failure.
    async fn update_listing(
        &self,
        id: ListingId,
        patch: &ListingPatch,
    ) -> Result<Listing, HubError>;

    /// Sets the verify status of a listing.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] for an unknown id and
    /// [`HubError::Database`] on store failure.
    async fn set_verify_status(&self, id: ListingId, status: VerifyStatus)
    -> Result<(), HubError>;

    /// Lists reviews for one listing, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Database`] on store failure.
    async fn reviews_for_listing(&self, listing_id: ListingId) -> Result<Vec<Review>, HubError>;

    /// Inserts a review and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Database`] on store failure (including a broken
    /// listing reference).
    async fn insert_review(&self, review: &NewReview) -> Result<Review, HubError>;

    /// Whether the user has favourited the listing.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Database`] on store failure.
    async fn is_favourite(&self, user_id: Uuid, listing_id: ListingId) -> Result<bool, HubError>;

    /// Fetches a profile by auth user id.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Database`] on store failure.
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, HubError>;

    /// Marks a user as a supporter with the given customer reference.
    ///
    /// Upsert semantics: creates a minimal profile row when none exists yet,
    /// and is safe to apply twice with the same inputs (at-least-once webhook
    /// delivery).
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Database`] on store failure.
    async fn mark_supporter(&self, user_id: Uuid, customer_id: &str) -> Result<(), HubError>;

    /// Records a subscription cancellation on the profile holding the given
    /// customer reference.
    ///
    /// When `ended` is true the supporter flag is cleared; a scheduled
    /// cancellation keeps it set until the final deletion event arrives.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] when no profile holds the customer
    /// reference and [`HubError::Database`] on store failure.
    async fn record_subscription_cancellation(
        &self,
        customer_id: &str,
        status: SubscriptionStatus,
        cancel_at: Option<DateTime<Utc>>,
        period_end: Option<DateTime<Utc>>,
        ended: bool,
    ) -> Result<(), HubError>;
}
