//! Service layer: one coordinator per spec'd workflow.
//!
//! Each service is a stateless coordinator over the [`crate::persistence`]
//! store and the provider seams; handlers do HTTP concerns (extraction,
//! auth preconditions, envelopes) and delegate everything else here.

pub mod billing;
pub mod listing;
pub mod moderation;

pub use billing::BillingService;
pub use listing::ListingService;
pub use moderation::ModerationService;
