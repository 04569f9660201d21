//! Admin verification workflow.
//!
//! State machine on a listing's verify status: `pending → verified` and
//! `pending → rejected`, both triggered explicitly by an admin. Review
//! visibility reads the status at query time, so no event is emitted here.
//!
//! The auth preconditions (bearer present, token valid, admin claim) are
//! enforced by the handler via [`crate::auth::require_admin`] before this
//! service runs; the service owns only the transition itself.

use std::sync::Arc;

use crate::domain::{ListingId, VerifyAction, VerifyStatus};
use crate::error::HubError;
use crate::persistence::HubStore;

/// Coordinator for the admin verification workflow.
#[derive(Debug, Clone)]
pub struct ModerationService {
    store: Arc<dyn HubStore>,
}

impl ModerationService {
    /// Creates a new `ModerationService`.
    #[must_use]
    pub fn new(store: Arc<dyn HubStore>) -> Self {
        Self { store }
    }

    /// Applies a verification action and returns the new status.
    ///
    /// # Errors
    ///
    /// An unknown listing id is reported as [`HubError::Validation`] (the
    /// admin client sent a bad reference, not a missing resource), and store
    /// failures propagate as [`HubError::Database`].
    pub async fn set_verification(
        &self,
        listing_id: ListingId,
        action: VerifyAction,
    ) -> Result<VerifyStatus, HubError> {
        let status = action.target_status();
        match self.store.set_verify_status(listing_id, status).await {
            Ok(()) => {
                tracing::info!(listing_id = %listing_id, status = %status, "verification updated");
                Ok(status)
            }
            Err(HubError::NotFound(_)) => Err(HubError::validation(
                "id",
                format!("unknown listing {listing_id}"),
            )),
            Err(other) => Err(other),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::domain::{Listing, ListingType};
    use crate::persistence::memory::MemStore;

    fn pending_listing() -> Listing {
        Listing {
            id: ListingId::new(),
            ltype: ListingType::Hub,
            title: "Family Hub".to_string(),
            city: "Lisbon".to_string(),
            country: "Portugal".to_string(),
            point: None,
            starts_on: None,
            ends_on: None,
            verify: VerifyStatus::Pending,
            photo_urls: vec![],
            social_links: vec![],
            created_at: Utc::now(),
            owner_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn verify_moves_pending_to_verified() {
        let target = pending_listing();
        let id = target.id;
        let store = Arc::new(MemStore::with_listings(vec![target]));
        let service = ModerationService::new(Arc::clone(&store) as Arc<dyn HubStore>);

        let Ok(status) = service.set_verification(id, VerifyAction::Verify).await else {
            panic!("transition failed");
        };
        assert_eq!(status, VerifyStatus::Verified);

        let listings = store.listings.lock().await;
        assert_eq!(
            listings.first().map(|l| l.verify),
            Some(VerifyStatus::Verified)
        );
    }

    #[tokio::test]
    async fn reject_moves_pending_to_rejected() {
        let target = pending_listing();
        let id = target.id;
        let service = ModerationService::new(Arc::new(MemStore::with_listings(vec![target])));

        let Ok(status) = service.set_verification(id, VerifyAction::Reject).await else {
            panic!("transition failed");
        };
        assert_eq!(status, VerifyStatus::Rejected);
    }

    #[tokio::test]
    async fn unknown_listing_is_invalid_input() {
        let service = ModerationService::new(Arc::new(MemStore::new()));
        let result = service
            .set_verification(ListingId::new(), VerifyAction::Verify)
            .await;
        assert!(matches!(result, Err(HubError::Validation { .. })));
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let store = Arc::new(MemStore::new());
        *store.fail.lock().await = true;
        let service = ModerationService::new(Arc::clone(&store) as Arc<dyn HubStore>);
        let result = service
            .set_verification(ListingId::new(), VerifyAction::Verify)
            .await;
        assert!(matches!(result, Err(HubError::Database(_))));
    }
}
