//! Site coordinates and distances on the sphere.

use serde::Serialize;

use crate::error::StoreError;

/// Earth radius (km) used for all distance calculations.
pub const EARTH_RADIUS_KM: f64 = 6378.137;

/// A validated (latitude, longitude) pair in degrees.
///
/// Latitude lies in `[-90, 90]`; longitude is stored normalised into
/// `[-180, 180)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon {
    lat: f64,
    lon: f64,
}

impl LatLon {
    /// Validates and normalises a coordinate.
    ///
    /// Accepts longitudes in `[-180, 360]` (both the `±180` and the `0..360`
    /// conventions) and folds them into `[-180, 180)`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidLocation`] for non-finite or out-of-range input.
    pub fn new(lat: f64, lon: f64) -> Result<Self, StoreError> {
        if !lat.is_finite()
            || !lon.is_finite()
            || !(-90.0..=90.0).contains(&lat)
            || !(-180.0..=360.0).contains(&lon)
        {
            return Err(StoreError::InvalidLocation { lat, lon });
        }
        let lon = if lon >= 180.0 { lon - 360.0 } else { lon };
        Ok(Self { lat, lon })
    }

    /// Builds a coordinate the caller has already validated and normalised.
    pub(crate) fn new_unchecked(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees, in `[-180, 180)`.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Great-circle distance (km) to `other`.
    pub fn great_circle_km(&self, other: &LatLon) -> f64 {
        2.0 * EARTH_RADIUS_KM * half_central_angle(self, other)
    }

    /// Chordal distance (km) to `other`: the straight line through the Earth.
    ///
    /// Monotone in the great-circle distance, so both give the same ordering.
    pub fn chord_km(&self, other: &LatLon) -> f64 {
        2.0 * EARTH_RADIUS_KM * half_central_angle(self, other).sin()
    }
}

/// Haversine half central angle (radians) between two points.
fn half_central_angle(a: &LatLon, b: &LatLon) -> f64 {
    let dlat = (a.lat - b.lat).to_radians();
    let dlon = (a.lon - b.lon).to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlon.abs() / 2.0).sin().powi(2);
    h.clamp(0.0, 1.0).sqrt().asin()
}
