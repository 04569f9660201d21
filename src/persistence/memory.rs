//! In-memory [`HubStore`] fake for service-level tests.
//!
//! Mirrors the server-side filter semantics of [`super::PostgresStore`]
//! closely enough for the search, moderation, and billing tests to run
//! without a database.

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use async_trait::async_trait;

use super::HubStore;
use crate::domain::{
    Listing, ListingFilter, ListingId, ListingPatch, NewReview, Profile, Review,
    SubscriptionStatus, VerifyStatus,
};
use crate::error::HubError;

/// Vec-backed store fake.
#[derive(Debug, Default)]
pub struct MemStore {
    /// Seeded and mutated listings.
    pub listings: Mutex<Vec<Listing>>,
    /// Inserted reviews.
    pub reviews: Mutex<Vec<Review>>,
    /// `(user, listing)` favourite pairs.
    pub favourites: Mutex<Vec<(Uuid, ListingId)>>,
    /// Profile rows keyed by their `id` field.
    pub profiles: Mutex<Vec<Profile>>,
    /// When set, every call fails with a database error.
    pub fail: Mutex<bool>,
}

impl MemStore {
    /// Creates an empty fake.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fake pre-seeded with listings.
    #[must_use]
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        Self {
            listings: Mutex::new(listings),
            ..Self::default()
        }
    }

    async fn check_failure(&self) -> Result<(), HubError> {
        if *self.fail.lock().await {
            return Err(HubError::Database("injected store failure".to_string()));
        }
        Ok(())
    }

    fn matches(filter: &ListingFilter, listing: &Listing) -> bool {
        if !filter.statuses.contains(&listing.verify) {
            return false;
        }
        if let Some(ltype) = filter.ltype {
            if listing.ltype != ltype {
                return false;
            }
        }
        if let Some(from) = filter.overlaps_from {
            match listing.ends_on {
                Some(ends) if ends >= from => {}
                _ => return false,
            }
        }
        if let Some(to) = filter.overlaps_to {
            match listing.starts_on {
                Some(starts) if starts <= to => {}
                _ => return false,
            }
        }
        if let Some(location) = &filter.location {
            let needle = location.to_lowercase();
            let city = listing.city.to_lowercase();
            let country = listing.country.to_lowercase();
            if !city.contains(&needle) && !country.contains(&needle) {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl HubStore for MemStore {
    async fn search_listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>, HubError> {
        self.check_failure().await?;
        let mut matched: Vec<Listing> = self
            .listings
            .lock()
            .await
            .iter()
            .filter(|l| Self::matches(filter, l))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn get_listing(&self, id: ListingId) -> Result<Option<Listing>, HubError> {
        self.check_failure().await?;
        Ok(self
            .listings
            .lock()
            .await
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }

    async fn update_listing(
        &self,
        id: ListingId,
        patch: &ListingPatch,
    ) -> Result<Listing, HubError> {
        self.check_failure().await?;
        let mut listings = self.listings.lock().await;
        let listing = listings
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| HubError::NotFound(format!("listing {id}")))?;

        if let Some(title) = &patch.title {
            listing.title.clone_from(title);
        }
        if let Some(city) = &patch.city {
            listing.city.clone_from(city);
        }
        if let Some(country) = &patch.country {
            listing.country.clone_from(country);
        }
        if let Some(point) = patch.point {
            listing.point = Some(point);
        }
        if let Some(starts_on) = patch.starts_on {
            listing.starts_on = Some(starts_on);
        }
        if let Some(ends_on) = patch.ends_on {
            listing.ends_on = Some(ends_on);
        }
        if let Some(photo_urls) = &patch.photo_urls {
            listing.photo_urls.clone_from(photo_urls);
        }
        if let Some(social_links) = &patch.social_links {
            listing.social_links.clone_from(social_links);
        }
        Ok(listing.clone())
    }

    async fn set_verify_status(
        &self,
        id: ListingId,
        status: VerifyStatus,
    ) -> Result<(), HubError> {
        self.check_failure().await?;
        let mut listings = self.listings.lock().await;
        let listing = listings
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| HubError::NotFound(format!("listing {id}")))?;
        listing.verify = status;
        Ok(())
    }

    async fn reviews_for_listing(&self, listing_id: ListingId) -> Result<Vec<Review>, HubError> {
        self.check_failure().await?;
        let mut matched: Vec<Review> = self
            .reviews
            .lock()
            .await
            .iter()
            .filter(|r| r.listing_id == listing_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn insert_review(&self, review: &NewReview) -> Result<Review, HubError> {
        self.check_failure().await?;
        let stored = Review {
            id: Uuid::new_v4(),
            listing_id: review.listing_id,
            author_id: review.author_id,
            author_name: review.author_name.clone(),
            rating: review.rating,
            comment: review.comment.clone(),
            created_at: Utc::now(),
        };
        self.reviews.lock().await.push(stored.clone());
        Ok(stored)
    }

    async fn is_favourite(&self, user_id: Uuid, listing_id: ListingId) -> Result<bool, HubError> {
        self.check_failure().await?;
        Ok(self
            .favourites
            .lock()
            .await
            .contains(&(user_id, listing_id)))
    }

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, HubError> {
        self.check_failure().await?;
        Ok(self
            .profiles
            .lock()
            .await
            .iter()
            .find(|p| p.id == user_id)
            .cloned())
    }

    async fn mark_supporter(&self, user_id: Uuid, customer_id: &str) -> Result<(), HubError> {
        self.check_failure().await?;
        let mut profiles = self.profiles.lock().await;
        let profile = match profiles.iter_mut().find(|p| p.id == user_id) {
            Some(existing) => existing,
            None => {
                profiles.push(Profile::minimal(user_id));
                match profiles.last_mut() {
                    Some(created) => created,
                    None => return Err(HubError::Internal("push failed".to_string())),
                }
            }
        };
        profile.is_supporter = true;
        profile.stripe_customer_id = Some(customer_id.to_string());
        profile.subscription_status = Some(SubscriptionStatus::Active);
        profile.cancel_at = None;
        profile.current_period_end = None;
        Ok(())
    }

    async fn record_subscription_cancellation(
        &self,
        customer_id: &str,
        status: SubscriptionStatus,
        cancel_at: Option<DateTime<Utc>>,
        period_end: Option<DateTime<Utc>>,
        ended: bool,
    ) -> Result<(), HubError> {
        self.check_failure().await?;
        let mut profiles = self.profiles.lock().await;
        let profile = profiles
            .iter_mut()
            .find(|p| p.stripe_customer_id.as_deref() == Some(customer_id))
            .ok_or_else(|| HubError::NotFound(format!("no profile for customer {customer_id}")))?;
        profile.subscription_status = Some(status);
        profile.cancel_at = cancel_at;
        profile.current_period_end = period_end;
        if ended {
            profile.is_supporter = false;
        }
        Ok(())
    }
}
