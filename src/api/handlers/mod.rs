//! REST endpoint handlers organized by resource.

pub mod admin;
pub mod billing;
pub mod favourites;
pub mod listings;
pub mod reviews;
pub mod system;
pub mod webhook;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(listings::routes())
        .merge(admin::routes())
        .merge(reviews::routes())
        .merge(favourites::routes())
        .merge(billing::routes())
        .merge(webhook::routes())
}
