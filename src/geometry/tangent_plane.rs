use super::lat_lng::{LatLng, EARTH_RADIUS};
use crate::math::Point2;

/// Local tangent plane anchored at a ground position.
///
/// Maps lat/lng to metres east (`x`) and north (`y`) of the origin using an
/// equirectangular approximation, accurate at building and city scale.
#[derive(Debug, Clone, Copy)]
pub struct TangentPlane {
    origin: LatLng,
    cos_lat: f64,
}

impl TangentPlane {
    /// Creates a plane tangent to the earth at `origin`.
    #[must_use]
    pub fn new(origin: LatLng) -> Self {
        Self {
            origin,
            cos_lat: origin.lat.to_radians().cos(),
        }
    }

    /// Returns the anchor position.
    #[must_use]
    pub fn origin(&self) -> LatLng {
        self.origin
    }

    /// Projects a ground position onto the plane.
    #[must_use]
    pub fn to_local(&self, p: &LatLng) -> Point2 {
        let x = (p.lng - self.origin.lng).to_radians() * EARTH_RADIUS * self.cos_lat;
        let y = (p.lat - self.origin.lat).to_radians() * EARTH_RADIUS;
        Point2::new(x, y)
    }

    /// Maps a plane point back to a ground position.
    #[must_use]
    pub fn to_lat_lng(&self, p: &Point2) -> LatLng {
        let lat = self.origin.lat + (p.y / EARTH_RADIUS).to_degrees();
        let lng = self.origin.lng + (p.x / (EARTH_RADIUS * self.cos_lat)).to_degrees();
        LatLng::new(lat, lng)
    }
}
