//! Geographic coordinate validation.
//!
//! Every latitude/longitude that enters the system (query parameters, wire
//! payloads, persisted last-known location) passes through these checks.
//! Both bounds are inclusive.

use thiserror::Error;

/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;

/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;

/// Minimum valid longitude in degrees.
pub const MIN_LON: f64 = -180.0;

/// Maximum valid longitude in degrees.
pub const MAX_LON: f64 = 180.0;

/// Errors produced when validating coordinates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    #[error("Invalid latitude: {0} (must be within -90..=90)")]
    InvalidLatitude(f64),

    #[error("Invalid longitude: {0} (must be within -180..=180)")]
    InvalidLongitude(f64),
}

/// Returns true if `lat` lies within [-90, 90]. NaN is never valid.
#[inline]
pub fn is_valid_latitude(lat: f64) -> bool {
    (MIN_LAT..=MAX_LAT).contains(&lat)
}

/// Returns true if `lon` lies within [-180, 180]. NaN is never valid.
#[inline]
pub fn is_valid_longitude(lon: f64) -> bool {
    (MIN_LON..=MAX_LON).contains(&lon)
}

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Create a point, rejecting out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordError> {
        if !is_valid_latitude(latitude) {
            return Err(CoordError::InvalidLatitude(latitude));
        }
        if !is_valid_longitude(longitude) {
            return Err(CoordError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}
