//! Listing query engine and listing-adjacent operations.
//!
//! The search pipeline has two stages: the store applies every filter it can
//! express server-side, then [`filter_within_radius`] discards rows outside
//! the requested great-circle radius. The radius stage runs client-side
//! because the hosted store cannot express the distance predicate.

use std::sync::Arc;

use uuid::Uuid;

use crate::auth::AuthUser;
use crate::domain::{
    GeoPoint, Listing, ListingFilter, ListingId, ListingPatch, NewReview, RATING_RANGE, Review,
    haversine_km,
};
use crate::error::HubError;
use crate::persistence::HubStore;

/// Pure post-filter stage: keeps listings within `radius_km` of `center`.
///
/// Listings without stored coordinates are always excluded once a radius
/// search is in effect. Input order is preserved.
#[must_use]
pub fn filter_within_radius(listings: Vec<Listing>, center: GeoPoint, radius_km: f64) -> Vec<Listing> {
    listings
        .into_iter()
        .filter(|listing| match listing.point {
            Some(point) => haversine_km(center, point) <= radius_km,
            None => false,
        })
        .collect()
}

/// Coordinator for listing search, fetch, owner updates, reviews, and
/// favourite checks.
#[derive(Debug, Clone)]
pub struct ListingService {
    store: Arc<dyn HubStore>,
}

impl ListingService {
    /// Creates a new `ListingService`.
    #[must_use]
    pub fn new(store: Arc<dyn HubStore>) -> Self {
        Self { store }
    }

    /// Runs a validated search filter: store query, radius post-filter,
    /// newest-first ordering. An empty result is a success.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Database`] on store failure.
    pub async fn search(&self, filter: &ListingFilter) -> Result<Vec<Listing>, HubError> {
        let mut listings = self.store.search_listings(filter).await?;

        if let Some((center, radius_km)) = filter.radius_stage() {
            listings = filter_within_radius(listings, center, radius_km);
        }

        // The store already orders by creation time; re-sorting keeps the
        // contract independent of any one store implementation.
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        tracing::debug!(results = listings.len(), "listing search completed");
        Ok(listings)
    }

    /// Fetches one listing.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] for an unknown id.
    pub async fn get(&self, id: ListingId) -> Result<Listing, HubError> {
        self.store
            .get_listing(id)
            .await?
            .ok_or_else(|| HubError::NotFound(format!("listing {id}")))
    }

    /// Applies an owner patch to a listing.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] for an unknown id,
    /// [`HubError::Forbidden`] when `user_id` does not own the listing, and
    /// [`HubError::Validation`] for an empty patch or an inverted date range.
    pub async fn update(
        &self,
        id: ListingId,
        user_id: Uuid,
        patch: &ListingPatch,
    ) -> Result<Listing, HubError> {
        if patch.is_empty() {
            return Err(HubError::validation("body", "no fields to update"));
        }

        let listing = self.get(id).await?;
        if listing.owner_id != user_id {
            return Err(HubError::Forbidden(
                "only the owner may update a listing".to_string(),
            ));
        }

        // Validate the date range the listing would end up with.
        let starts_on = patch.starts_on.or(listing.starts_on);
        let ends_on = patch.ends_on.or(listing.ends_on);
        if let (Some(starts), Some(ends)) = (starts_on, ends_on) {
            if starts > ends {
                return Err(HubError::validation("ends_on", "date range is inverted"));
            }
        }

        let updated = self.store.update_listing(id, patch).await?;
        tracing::info!(listing_id = %id, "listing updated by owner");
        Ok(updated)
    }

    /// Lists reviews for a listing, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] for an unknown listing.
    pub async fn reviews_for(&self, listing_id: ListingId) -> Result<Vec<Review>, HubError> {
        // Listing existence gives a clean 404 instead of a silent empty list.
        self.get(listing_id).await?;
        self.store.reviews_for_listing(listing_id).await
    }

    /// Creates a review authored by the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] for an out-of-range rating and
    /// [`HubError::NotFound`] for an unknown listing.
    pub async fn create_review(
        &self,
        listing_id: ListingId,
        author: &AuthUser,
        rating: i16,
        comment: String,
    ) -> Result<Review, HubError> {
        if !RATING_RANGE.contains(&rating) {
            return Err(HubError::validation(
                "rating",
                format!(
                    "must be between {} and {}",
                    RATING_RANGE.start(),
                    RATING_RANGE.end()
                ),
            ));
        }
        self.get(listing_id).await?;

        let review = self
            .store
            .insert_review(&NewReview {
                listing_id,
                author_id: author.id,
                author_name: author.display_name(),
                rating,
                comment,
            })
            .await?;
        tracing::info!(listing_id = %listing_id, review_id = %review.id, "review created");
        Ok(review)
    }

    /// Whether the user has favourited the listing.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Database`] on store failure.
    pub async fn is_favourite(
        &self,
        user_id: Uuid,
        listing_id: ListingId,
    ) -> Result<bool, HubError> {
        self.store.is_favourite(user_id, listing_id).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, Utc};
    use serde_json::json;

    use crate::domain::{ListingType, VerifyStatus};
    use crate::persistence::memory::MemStore;

    fn listing(title: &str, point: Option<GeoPoint>, age_hours: i64) -> Listing {
        Listing {
            id: ListingId::new(),
            ltype: ListingType::Event,
            title: title.to_string(),
            city: "Oaxaca".to_string(),
            country: "Mexico".to_string(),
            point,
            starts_on: NaiveDate::from_ymd_opt(2026, 9, 1),
            ends_on: NaiveDate::from_ymd_opt(2026, 9, 3),
            verify: VerifyStatus::Verified,
            photo_urls: vec![],
            social_links: vec![],
            created_at: Utc::now() - Duration::hours(age_hours),
            owner_id: Uuid::new_v4(),
        }
    }

    fn author() -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            email: "ada@example.org".to_string(),
            metadata: json!({}),
        }
    }

    // Mexico City; ~380 km from the Oaxaca point, ~11,000 km from (0, 0).
    const CENTER: GeoPoint = GeoPoint::new(19.4326, -99.1332);

    #[test]
    fn radius_filter_keeps_near_and_drops_far() {
        let near = listing("near", Some(GeoPoint::new(17.0732, -96.7266)), 1);
        let far = listing("far", Some(GeoPoint::new(0.0, 0.0)), 2);
        let kept = filter_within_radius(vec![near.clone(), far], CENTER, 2000.0);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept.first().map(|l| l.id), Some(near.id));
    }

    #[test]
    fn radius_filter_drops_listings_without_coordinates() {
        let pointless = listing("no point", None, 1);
        let kept = filter_within_radius(vec![pointless], CENTER, 5000.0);
        assert!(kept.is_empty());
    }

    #[tokio::test]
    async fn search_applies_radius_stage_and_sorts_newest_first() {
        let near_old = listing("near old", Some(GeoPoint::new(17.0732, -96.7266)), 48);
        let near_new = listing("near new", Some(GeoPoint::new(19.3, -99.2)), 1);
        let far = listing("far", Some(GeoPoint::new(0.0, 0.0)), 3);
        let service = ListingService::new(Arc::new(MemStore::with_listings(vec![
            near_old.clone(),
            far,
            near_new.clone(),
        ])));

        let filter = ListingFilter {
            near: Some(CENTER),
            radius_km: Some(2000.0),
            ..ListingFilter::default()
        };
        let Ok(results) = service.search(&filter).await else {
            panic!("search failed");
        };
        let ids: Vec<ListingId> = results.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![near_new.id, near_old.id]);
    }

    #[tokio::test]
    async fn search_excludes_rejected_by_default() {
        let mut rejected = listing("rejected", None, 1);
        rejected.verify = VerifyStatus::Rejected;
        let visible = listing("visible", None, 2);
        let service =
            ListingService::new(Arc::new(MemStore::with_listings(vec![rejected, visible])));

        let Ok(results) = service.search(&ListingFilter::default()).await else {
            panic!("search failed");
        };
        assert_eq!(results.len(), 1);
        assert!(results.iter().all(|l| l.verify != VerifyStatus::Rejected));
    }

    #[tokio::test]
    async fn near_without_radius_has_no_effect() {
        let far = listing("far", Some(GeoPoint::new(0.0, 0.0)), 1);
        let service = ListingService::new(Arc::new(MemStore::with_listings(vec![far])));

        let filter = ListingFilter {
            near: Some(CENTER),
            ..ListingFilter::default()
        };
        let Ok(results) = service.search(&filter).await else {
            panic!("search failed");
        };
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn empty_result_is_a_success() {
        let service = ListingService::new(Arc::new(MemStore::new()));
        let Ok(results) = service.search(&ListingFilter::default()).await else {
            panic!("search failed");
        };
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn update_is_owner_gated() {
        let owned = listing("mine", None, 1);
        let owner_id = owned.owner_id;
        let id = owned.id;
        let service = ListingService::new(Arc::new(MemStore::with_listings(vec![owned])));

        let patch = ListingPatch {
            title: Some("Renamed".to_string()),
            ..ListingPatch::default()
        };
        let stranger = Uuid::new_v4();
        assert!(matches!(
            service.update(id, stranger, &patch).await,
            Err(HubError::Forbidden(_))
        ));

        let Ok(updated) = service.update(id, owner_id, &patch).await else {
            panic!("owner update failed");
        };
        assert_eq!(updated.title, "Renamed");
    }

    #[tokio::test]
    async fn update_rejects_empty_patch_and_inverted_range() {
        let owned = listing("mine", None, 1);
        let owner_id = owned.owner_id;
        let id = owned.id;
        let service = ListingService::new(Arc::new(MemStore::with_listings(vec![owned])));

        assert!(matches!(
            service.update(id, owner_id, &ListingPatch::default()).await,
            Err(HubError::Validation { .. })
        ));

        let inverted = ListingPatch {
            starts_on: NaiveDate::from_ymd_opt(2026, 9, 9),
            ends_on: NaiveDate::from_ymd_opt(2026, 9, 1),
            ..ListingPatch::default()
        };
        assert!(matches!(
            service.update(id, owner_id, &inverted).await,
            Err(HubError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn review_rating_is_range_checked() {
        let target = listing("target", None, 1);
        let id = target.id;
        let service = ListingService::new(Arc::new(MemStore::with_listings(vec![target])));

        let result = service
            .create_review(id, &author(), 6, "great".to_string())
            .await;
        assert!(matches!(result, Err(HubError::Validation { .. })));

        let Ok(review) = service
            .create_review(id, &author(), 5, "great".to_string())
            .await
        else {
            panic!("valid review rejected");
        };
        assert_eq!(review.rating, 5);
        assert_eq!(review.author_name, "ada");
    }

    #[tokio::test]
    async fn reviews_for_unknown_listing_is_not_found() {
        let service = ListingService::new(Arc::new(MemStore::new()));
        assert!(matches!(
            service.reviews_for(ListingId::new()).await,
            Err(HubError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn favourite_check_reflects_store() {
        let target = listing("target", None, 1);
        let listing_id = target.id;
        let user_id = Uuid::new_v4();
        let store = Arc::new(MemStore::with_listings(vec![target]));
        store.favourites.lock().await.push((user_id, listing_id));
        let service = ListingService::new(Arc::clone(&store) as Arc<dyn HubStore>);

        let Ok(found) = service.is_favourite(user_id, listing_id).await else {
            panic!("check failed");
        };
        assert!(found);

        let Ok(missing) = service.is_favourite(Uuid::new_v4(), listing_id).await else {
            panic!("check failed");
        };
        assert!(!missing);
    }
}
