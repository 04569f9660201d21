//! Validated listing search filter.
//!
//! A [`ListingFilter`] is the already-validated description of one search.
//! The store applies everything it can express server-side (type, date
//! overlap, verify status set, text match); the geo radius pair is carried
//! along for the client-side post-filter stage.

use chrono::NaiveDate;

use super::geo::GeoPoint;
use super::listing::{ListingType, VerifyStatus};

/// Bounds for the `radiusKm` parameter, inclusive.
pub const RADIUS_KM_RANGE: std::ops::RangeInclusive<f64> = 0.1..=5000.0;

/// A validated set of search filters; every field is conjunctive.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFilter {
    /// Restrict to one listing kind.
    pub ltype: Option<ListingType>,
    /// Start of the required-overlap window.
    pub overlaps_from: Option<NaiveDate>,
    /// End of the required-overlap window.
    pub overlaps_to: Option<NaiveDate>,
    /// Verify statuses visible to this search. Never empty.
    pub statuses: Vec<VerifyStatus>,
    /// Case-insensitive substring matched against city OR country.
    pub location: Option<String>,
    /// Center of the radius search (post-filter stage).
    pub near: Option<GeoPoint>,
    /// Radius in kilometers (post-filter stage).
    pub radius_km: Option<f64>,
}

impl ListingFilter {
    /// The visible status set for a given `verified` request parameter.
    ///
    /// Omitted: the public default of `{verified, pending}`. `true`: only
    /// verified listings. `false`: the complement of the verified set, which
    /// is the only way rejected listings ever appear in results.
    #[must_use]
    pub fn visible_statuses(verified: Option<bool>) -> Vec<VerifyStatus> {
        match verified {
            None => vec![VerifyStatus::Verified, VerifyStatus::Pending],
            Some(true) => vec![VerifyStatus::Verified],
            Some(false) => vec![VerifyStatus::Pending, VerifyStatus::Rejected],
        }
    }

    /// Whether the geo post-filter stage applies: both `near` and `radiusKm`
    /// must be present for either to take effect.
    #[must_use]
    pub fn radius_stage(&self) -> Option<(GeoPoint, f64)> {
        match (self.near, self.radius_km) {
            (Some(center), Some(radius)) => Some((center, radius)),
            _ => None,
        }
    }
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            ltype: None,
            overlaps_from: None,
            overlaps_to: None,
            statuses: Self::visible_statuses(None),
            location: None,
            near: None,
            radius_km: None,
        }
    }
}
