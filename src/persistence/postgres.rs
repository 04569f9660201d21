//! PostgreSQL implementation of [`HubStore`] using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use super::HubStore;
use super::models::{ListingRow, ProfileRow, ReviewRow};
use crate::domain::{
    Listing, ListingFilter, ListingId, ListingPatch, NewReview, Profile, Review,
    SubscriptionStatus, VerifyStatus,
};
use crate::error::HubError;

const LISTING_COLUMNS: &str = "id, ltype, title, city, country, lat, lng, starts_on, ends_on, \
     verify, photo_urls, social_links, created_at, owner_id";

/// `sqlx::PgPool`-backed store.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs pending migrations from the `migrations/` directory.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Database`] when a migration fails.
    pub async fn migrate(&self) -> Result<(), HubError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| HubError::Database(format!("migration failed: {e}")))
    }
}

#[async_trait]
impl HubStore for PostgresStore {
    async fn search_listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>, HubError> {
        let statuses: Vec<String> = filter
            .statuses
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();

        let mut query: QueryBuilder<'_, sqlx::Postgres> =
            QueryBuilder::new(format!("SELECT {LISTING_COLUMNS} FROM listings WHERE verify = ANY("));
        query.push_bind(statuses);
        query.push(")");

        if let Some(ltype) = filter.ltype {
            query.push(" AND ltype = ");
            query.push_bind(ltype.as_str());
        }
        // Required-overlap window: the listing's date range must intersect
        // [from, to]. Listings without dates never match a dated search.
        if let Some(from) = filter.overlaps_from {
            query.push(" AND ends_on >= ");
            query.push_bind(from);
        }
        if let Some(to) = filter.overlaps_to {
            query.push(" AND starts_on <= ");
            query.push_bind(to);
        }
        if let Some(location) = &filter.location {
            let pattern = format!("%{location}%");
            query.push(" AND (city ILIKE ");
            query.push_bind(pattern.clone());
            query.push(" OR country ILIKE ");
            query.push_bind(pattern);
            query.push(")");
        }
        query.push(" ORDER BY created_at DESC");

        let rows: Vec<ListingRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(HubError::from)?;

        rows.into_iter().map(ListingRow::into_listing).collect()
    }

    async fn get_listing(&self, id: ListingId) -> Result<Option<Listing>, HubError> {
        let row: Option<ListingRow> = sqlx::query_as(&format!(
            "SELECT {LISTING_COLUMNS} FROM listings WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(HubError::from)?;

        row.map(ListingRow::into_listing).transpose()
    }

    async fn update_listing(
        &self,
        id: ListingId,
        patch: &ListingPatch,
    ) -> Result<Listing, HubError> {
        let (lat, lng) = match patch.point {
            Some(point) => (Some(point.lat), Some(point.lng)),
            None => (None, None),
        };

        let row: Option<ListingRow> = sqlx::query_as(&format!(
            "UPDATE listings SET \
                 title = COALESCE($2, title), \
                 city = COALESCE($3, city), \
                 country = COALESCE($4, country), \
                 lat = COALESCE($5, lat), \
                 lng = COALESCE($6, lng), \
                 starts_on = COALESCE($7, starts_on), \
                 ends_on = COALESCE($8, ends_on), \
                 photo_urls = COALESCE($9, photo_urls), \
                 social_links = COALESCE($10, social_links) \
             WHERE id = $1 RETURNING {LISTING_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(&patch.title)
        .bind(&patch.city)
        .bind(&patch.country)
        .bind(lat)
        .bind(lng)
        .bind(patch.starts_on)
        .bind(patch.ends_on)
        .bind(&patch.photo_urls)
        .bind(&patch.social_links)
        .fetch_optional(&self.pool)
        .await
        .map_err(HubError::from)?;

        row.ok_or_else(|| HubError::NotFound(format!("listing {id}")))?
            .into_listing()
    }

    async fn set_verify_status(
        &self,
        id: ListingId,
        status: VerifyStatus,
    ) -> Result<(), HubError> {
        let result = sqlx::query("UPDATE listings SET verify = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(HubError::from)?;

        if result.rows_affected() == 0 {
            return Err(HubError::NotFound(format!("listing {id}")));
        }
        Ok(())
    }

    async fn reviews_for_listing(&self, listing_id: ListingId) -> Result<Vec<Review>, HubError> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            "SELECT id, listing_id, author_id, author_name, rating, comment, created_at \
             FROM reviews WHERE listing_id = $1 ORDER BY created_at DESC",
        )
        .bind(listing_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(HubError::from)?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn insert_review(&self, review: &NewReview) -> Result<Review, HubError> {
        let row: ReviewRow = sqlx::query_as(
            "INSERT INTO reviews (id, listing_id, author_id, author_name, rating, comment) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, listing_id, author_id, author_name, rating, comment, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(review.listing_id.as_uuid())
        .bind(review.author_id)
        .bind(&review.author_name)
        .bind(review.rating)
        .bind(&review.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(HubError::from)?;

        Ok(row.into())
    }

    async fn is_favourite(&self, user_id: Uuid, listing_id: ListingId) -> Result<bool, HubError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM favourites WHERE user_id = $1 AND listing_id = $2)",
        )
        .bind(user_id)
        .bind(listing_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(HubError::from)?;

        Ok(exists)
    }

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, HubError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            "SELECT id, display_name, bio, interests, avatar_url, is_supporter, \
                    stripe_customer_id, subscription_status, cancel_at, current_period_end \
             FROM profiles WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(HubError::from)?;

        row.map(ProfileRow::into_profile).transpose()
    }

    async fn mark_supporter(&self, user_id: Uuid, customer_id: &str) -> Result<(), HubError> {
        // Upsert: the profile row may not exist yet when the webhook for a
        // brand-new account arrives before the profile flow completes.
        sqlx::query(
            "INSERT INTO profiles (id, display_name, is_supporter, stripe_customer_id, \
                                   subscription_status) \
             VALUES ($1, '', TRUE, $2, 'active') \
             ON CONFLICT (id) DO UPDATE SET \
                 is_supporter = TRUE, \
                 stripe_customer_id = EXCLUDED.stripe_customer_id, \
                 subscription_status = 'active', \
                 cancel_at = NULL, \
                 current_period_end = NULL",
        )
        .bind(user_id)
        .bind(customer_id)
        .execute(&self.pool)
        .await
        .map_err(HubError::from)?;

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
        let result = sqlx::query(
            "UPDATE profiles SET \
                 subscription_status = $2, \
                 cancel_at = $3, \
                 current_period_end = $4, \
                 is_supporter = CASE WHEN $5 THEN FALSE ELSE is_supporter END \
             WHERE stripe_customer_id = $1",
        )
        .bind(customer_id)
        .bind(status.as_str())
        .bind(cancel_at)
        .bind(period_end)
        .bind(ended)
        .execute(&self.pool)
        .await
        .map_err(HubError::from)?;

        if result.rows_affected() == 0 {
            return Err(HubError::NotFound(format!(
                "no profile for customer {customer_id}"
            )));
        }
        Ok(())
    }
}
