//! Listing handlers: search, fetch, owner update.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::dto::{ListingResponse, SearchParams, SearchResponse};
use crate::app_state::AppState;
use crate::auth::require_user;
use crate::domain::{
    GeoPoint, ListingFilter, ListingId, ListingPatch, ListingType, RADIUS_KM_RANGE,
};
use crate::error::{ErrorResponse, HubError};

/// `GET /api/listings` — Filtered listing search.
///
/// # Errors
///
/// Returns [`HubError::Validation`] for any malformed filter parameter.
#[utoipa::path(
    get,
    path = "/api/listings",
    tag = "Listings",
    summary = "Search listings",
    description = "Returns listings matching every supplied filter, newest first. Radius search requires both `near` and `radiusKm`.",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching listings", body = SearchResponse),
        (status = 400, description = "Malformed filter parameter", body = ErrorResponse),
    )
)]
pub async fn search_listings(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, HubError> {
    let filter = build_filter(&params)?;
    let listings = state.listings.search(&filter).await?;
    Ok(Json(SearchResponse::new(listings)))
}

/// `GET /api/listings/{id}` — Fetch a single listing.
///
/// # Errors
///
/// Returns [`HubError::NotFound`] for an unknown id.
#[utoipa::path(
    get,
    path = "/api/listings/{id}",
    tag = "Listings",
    summary = "Get listing details",
    params(("id" = Uuid, Path, description = "Listing UUID")),
    responses(
        (status = 200, description = "Listing details", body = ListingResponse),
        (status = 404, description = "Listing not found", body = ErrorResponse),
    )
)]
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HubError> {
    let listing = state.listings.get(ListingId::from_uuid(id)).await?;
    Ok(Json(ListingResponse::new(listing)))
}

/// `PATCH /api/listings/{id}` — Owner update of listing fields.
///
/// The body is taken as raw text and parsed only after the credential check,
/// so a malformed body never leaks past an invalid token.
///
/// # Errors
///
/// Returns [`HubError::Unauthenticated`] without a valid bearer token,
/// [`HubError::Validation`] for a malformed body, and [`HubError::Forbidden`]
/// when the caller does not own the listing.
#[utoipa::path(
    patch,
    path = "/api/listings/{id}",
    tag = "Listings",
    summary = "Update a listing",
    description = "Owner-gated partial update. The verify status is never patchable here.",
    params(("id" = Uuid, Path, description = "Listing UUID")),
    request_body = ListingPatch,
    responses(
        (status = 200, description = "Updated listing", body = ListingResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the listing", body = ErrorResponse),
        (status = 404, description = "Listing not found", body = ErrorResponse),
    )
)]
pub async fn update_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    body: String,
) -> Result<impl IntoResponse, HubError> {
    let user = require_user(state.auth.as_ref(), &headers).await?;

    let patch: ListingPatch = serde_json::from_str(&body)
        .map_err(|e| HubError::validation("body", format!("malformed patch: {e}")))?;

    let listing = state
        .listings
        .update(ListingId::from_uuid(id), user.id, &patch)
        .await?;
    Ok(Json(ListingResponse::new(listing)))
}

/// Listing routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/listings", get(search_listings))
        .route("/listings/{id}", get(get_listing).patch(update_listing))
}

// ── Filter Parsing ──────────────────────────────────────────────────────

/// Validates and coerces raw search parameters into a [`ListingFilter`].
///
/// Any malformed parameter fails the whole request with a per-field error.
///
/// # Errors
///
/// Returns [`HubError::Validation`] naming the offending field.
pub fn build_filter(params: &SearchParams) -> Result<ListingFilter, HubError> {
    let ltype = params
        .ltype
        .as_deref()
        .map(|raw| {
            ListingType::parse(raw).ok_or_else(|| {
                HubError::validation("ltype", format!("expected 'event' or 'hub', got '{raw}'"))
            })
        })
        .transpose()?;

    let overlaps_from = parse_date("from", params.from.as_deref())?;
    let overlaps_to = parse_date("to", params.to.as_deref())?;
    if let (Some(from), Some(to)) = (overlaps_from, overlaps_to) {
        if from > to {
            return Err(HubError::validation("to", "window ends before it starts"));
        }
    }

    let verified = params
        .verified
        .as_deref()
        .map(|raw| {
            raw.parse::<bool>().map_err(|_| {
                HubError::validation("verified", format!("expected 'true' or 'false', got '{raw}'"))
            })
        })
        .transpose()?;

    let location = params
        .location
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let near = params.near.as_deref().map(parse_near).transpose()?;

    let radius_km = params
        .radius_km
        .as_deref()
        .map(|raw| {
            let radius: f64 = raw.parse().map_err(|_| {
                HubError::validation("radiusKm", format!("expected a number, got '{raw}'"))
            })?;
            if !RADIUS_KM_RANGE.contains(&radius) {
                return Err(HubError::validation(
                    "radiusKm",
                    format!(
                        "must be between {} and {}",
                        RADIUS_KM_RANGE.start(),
                        RADIUS_KM_RANGE.end()
                    ),
                ));
            }
            Ok(radius)
        })
        .transpose()?;

    Ok(ListingFilter {
        ltype,
        overlaps_from,
        overlaps_to,
        statuses: ListingFilter::visible_statuses(verified),
        location,
        near,
        radius_km,
    })
}

fn parse_date(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<chrono::NaiveDate>, HubError> {
    raw.map(|s| {
        s.parse().map_err(|_| {
            HubError::validation(field, format!("expected an ISO-8601 date, got '{s}'"))
        })
    })
    .transpose()
}

/// Parses `near` as exactly two comma-separated numbers: `lng,lat`.
fn parse_near(raw: &str) -> Result<GeoPoint, HubError> {
    let mut parts = raw.split(',');
    let lng = parts
        .next()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or_else(|| HubError::validation("near", "expected 'lng,lat'"))?;
    let lat = parts
        .next()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or_else(|| HubError::validation("near", "expected 'lng,lat'"))?;
    if parts.next().is_some() {
        return Err(HubError::validation("near", "expected exactly two numbers"));
    }
    Ok(GeoPoint::new(lat, lng))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::api::handlers::testing;
    use crate::domain::VerifyStatus;

    #[test]
    fn empty_params_yield_the_default_filter() {
        let Ok(filter) = build_filter(&SearchParams::default()) else {
            panic!("default params must validate");
        };
        assert_eq!(filter, ListingFilter::default());
    }

    #[test]
    fn near_parses_lng_lat_order() {
        let params = SearchParams {
            near: Some("-99.1332,19.4326".to_string()),
            radius_km: Some("2000".to_string()),
            ..SearchParams::default()
        };
        let Ok(filter) = build_filter(&params) else {
            panic!("params must validate");
        };
        let Some((center, radius)) = filter.radius_stage() else {
            panic!("radius stage must be active");
        };
        assert!((center.lng - (-99.1332)).abs() < 1e-9);
        assert!((center.lat - 19.4326).abs() < 1e-9);
        assert!((radius - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn near_must_be_exactly_two_numbers() {
        for bad in ["-99.1332", "a,b", "1,2,3", ""] {
            let params = SearchParams {
                near: Some(bad.to_string()),
                ..SearchParams::default()
            };
            assert!(build_filter(&params).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn radius_is_range_checked() {
        for bad in ["0.05", "5001", "-10", "NaN?"] {
            let params = SearchParams {
                radius_km: Some(bad.to_string()),
                ..SearchParams::default()
            };
            assert!(build_filter(&params).is_err(), "accepted {bad:?}");
        }
        let edge = SearchParams {
            radius_km: Some("0.1".to_string()),
            ..SearchParams::default()
        };
        assert!(build_filter(&edge).is_ok());
    }

    #[test]
    fn verified_parameter_drives_the_status_set() {
        let explicit = SearchParams {
            verified: Some("true".to_string()),
            ..SearchParams::default()
        };
        let Ok(filter) = build_filter(&explicit) else {
            panic!("params must validate");
        };
        assert_eq!(filter.statuses, vec![VerifyStatus::Verified]);

        let junk = SearchParams {
            verified: Some("yes".to_string()),
            ..SearchParams::default()
        };
        assert!(build_filter(&junk).is_err());
    }

    #[test]
    fn dates_are_validated_and_ordered() {
        let inverted = SearchParams {
            from: Some("2026-09-10".to_string()),
            to: Some("2026-09-01".to_string()),
            ..SearchParams::default()
        };
        assert!(build_filter(&inverted).is_err());

        let junk = SearchParams {
            from: Some("next tuesday".to_string()),
            ..SearchParams::default()
        };
        assert!(build_filter(&junk).is_err());
    }

    #[test]
    fn blank_location_is_dropped() {
        let params = SearchParams {
            location: Some("   ".to_string()),
            ..SearchParams::default()
        };
        let Ok(filter) = build_filter(&params) else {
            panic!("params must validate");
        };
        assert!(filter.location.is_none());
    }

    #[tokio::test]
    async fn update_checks_credential_before_body() {
        let (state, _store) = testing::state_with(None, vec![]);
        let result = update_listing(
            State(state),
            Path(Uuid::new_v4()),
            HeaderMap::new(),
            "not json".to_string(),
        )
        .await;
        assert!(matches!(result, Err(HubError::Unauthenticated(_))));
    }

    #[tokio::test]
    async fn update_rejects_malformed_body_after_auth() {
        let (state, _store) = testing::state_with(Some(testing::plain_user()), vec![]);
        let result = update_listing(
            State(state),
            Path(Uuid::new_v4()),
            testing::bearer_headers(),
            "not json".to_string(),
        )
        .await;
        assert!(matches!(result, Err(HubError::Validation { .. })));
    }
}
