use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::bearing::normalize_bearing;

/// Mean earth radius in metres, as used by web map projections.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Distance in metres under which two ground positions are considered the same.
pub const COINCIDENCE_TOLERANCE: f64 = 1e-6;

/// A point on the ground in double-precision degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new position from latitude and longitude in degrees.
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Checks that both components are finite and latitude is within `[-90, 90]`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidCoordinate` otherwise.
    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || !self.lng.is_finite() || self.lat.abs() > 90.0 {
            return Err(GeometryError::InvalidCoordinate {
                lat: self.lat,
                lng: self.lng,
            }
            .into());
        }
        Ok(())
    }

    /// Initial great-circle heading from `self` to `other` in radians,
    /// 0 = north, increasing clockwise.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the two positions coincide.
    pub fn heading_to(&self, other: &LatLng) -> Result<f64> {
        if self.distance_to(other) < COINCIDENCE_TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "heading undefined between coincident positions ({}, {})",
                self.lat, self.lng
            ))
            .into());
        }
        let from_lat = self.lat.to_radians();
        let to_lat = other.lat.to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let heading = (d_lng.sin() * to_lat.cos()).atan2(
            from_lat.cos() * to_lat.sin() - from_lat.sin() * to_lat.cos() * d_lng.cos(),
        );
        Ok(normalize_bearing(heading))
    }

    /// Moves `distance` metres along the great circle with initial `heading`.
    #[must_use]
    pub fn offset(&self, distance: f64, heading: f64) -> LatLng {
        let angular = distance / EARTH_RADIUS;
        let from_lat = self.lat.to_radians();
        let from_lng = self.lng.to_radians();
        let (sin_d, cos_d) = angular.sin_cos();
        let (sin_from, cos_from) = from_lat.sin_cos();

        let sin_lat = cos_d * sin_from + sin_d * cos_from * heading.cos();
        let d_lng = (sin_d * cos_from * heading.sin()).atan2(cos_d - sin_from * sin_lat);

        LatLng::new(sin_lat.asin().to_degrees(), (from_lng + d_lng).to_degrees())
    }

    /// Great-circle (haversine) distance to `other` in metres.
    #[must_use]
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lat = lat2 - lat1;
        let d_lng = (other.lng - self.lng).to_radians();
        let h = (d_lat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng * 0.5).sin().powi(2);
        2.0 * EARTH_RADIUS * h.sqrt().min(1.0).asin()
    }
}
