//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::service::{BillingService, ListingService, ModerationService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// Clients are constructed once at startup and passed in explicitly; there
/// is no module-level singleton.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Listing search, fetch, updates, reviews, favourites.
    pub listings: Arc<ListingService>,
    /// Admin verification workflow.
    pub moderation: Arc<ModerationService>,
    /// Checkout, cancellation, and webhook processing.
    pub billing: Arc<BillingService>,
    /// Bearer token verification.
    pub auth: Arc<dyn AuthProvider>,
}
