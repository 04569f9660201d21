//! # wanderlink-hub
//!
//! REST API backend for the WanderLink Hub family-events marketplace.
//!
//! The service fronts a hosted relational store and two external providers
//! (auth, payments). Every operation is a stateless request handler: it
//! validates input, performs at most one or two store calls, and reshapes
//! the result as JSON.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── ListingService / ModerationService / BillingService (service/)
//!     │
//!     ├── AuthProvider (auth/)      ── hosted auth service
//!     ├── PaymentGateway (payments/) ── payment provider + webhooks
//!     │
//!     └── HubStore (persistence/)   ── PostgreSQL
//! ```

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod payments;
pub mod persistence;
pub mod service;
