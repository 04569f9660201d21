//! Geographic coordinates and great-circle distance.
//!
//! The hosted store cannot express a radius predicate, so radius search is a
//! client-side post-filter over [`haversine_km`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS-84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a point from latitude and longitude in degrees.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle distance between two points in kilometers (haversine).
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin() * (dlat / 2.0).sin()
        + lat1.cos() * lat2.cos() * (dlng / 2.0).sin() * (dlng / 2.0).sin();
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_identical_points() {
        let p = GeoPoint::new(19.4326, -99.1332);
        assert!(haversine_km(p, p) < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(19.4326, -99.1332);
        let b = GeoPoint::new(17.0732, -96.7266);
        let d1 = haversine_km(a, b);
        let d2 = haversine_km(b, a);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn mexico_city_to_oaxaca_is_about_380_km() {
        let cdmx = GeoPoint::new(19.4326, -99.1332);
        let oaxaca = GeoPoint::new(17.0732, -96.7266);
        let d = haversine_km(cdmx, oaxaca);
        assert!((350.0..=400.0).contains(&d), "got {d}");
    }

    #[test]
    fn mexico_city_to_null_island_is_about_11000_km() {
        let cdmx = GeoPoint::new(19.4326, -99.1332);
        let origin = GeoPoint::new(0.0, 0.0);
        let d = haversine_km(cdmx, origin);
        assert!((10_500.0..=11_500.0).contains(&d), "got {d}");
    }
}
