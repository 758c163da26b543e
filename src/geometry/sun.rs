use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{GeometryError, Result};
use crate::math::bearing::normalize_bearing;

/// Direction of the sun as seen from the ground.
///
/// Computed externally from a date, time and location; the engine only
/// consumes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunDirection {
    /// Angle above the horizon in radians. `<= 0` means no sunlight.
    pub altitude: f64,
    /// Compass bearing of the sun in radians, 0 = north, clockwise.
    pub azimuth: f64,
}

impl SunDirection {
    /// Creates a sun direction from radians.
    #[must_use]
    pub fn new(altitude: f64, azimuth: f64) -> Self {
        Self { altitude, azimuth }
    }

    /// Creates a sun direction from degrees.
    #[must_use]
    pub fn from_degrees(altitude: f64, azimuth: f64) -> Self {
        Self::new(altitude.to_radians(), azimuth.to_radians())
    }

    /// A sun at the horizon: casts no shadow.
    #[must_use]
    pub fn below_horizon() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Checks that both angles are finite and the altitude lies within
    /// `[-π/2, π/2]`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidSun` otherwise.
    pub fn validate(&self) -> Result<()> {
        if !self.altitude.is_finite() || !self.azimuth.is_finite() || self.altitude.abs() > FRAC_PI_2 {
            return Err(GeometryError::InvalidSun {
                altitude: self.altitude,
                azimuth: self.azimuth,
            }
            .into());
        }
        Ok(())
    }

    /// Whether the sun is strictly above the horizon.
    #[must_use]
    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }

    /// Bearing along which shadows are cast, opposite the sun.
    #[must_use]
    pub fn anti_solar_bearing(&self) -> f64 {
        normalize_bearing(self.azimuth + PI)
    }
}

impl Default for SunDirection {
    fn default() -> Self {
        Self::below_horizon()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn anti_solar_of_north_is_south() {
        let sun = SunDirection::new(0.5, 0.0);
        assert_abs_diff_eq!(sun.anti_solar_bearing(), PI, epsilon = 1e-12);
    }

    #[test]
    fn anti_solar_wraps() {
        let sun = SunDirection::new(0.5, 3.0 * FRAC_PI_2);
        assert_abs_diff_eq!(sun.anti_solar_bearing(), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn horizon_policy() {
        assert!(!SunDirection::below_horizon().is_above_horizon());
        assert!(!SunDirection::new(-0.1, 1.0).is_above_horizon());
        assert!(SunDirection::from_degrees(30.0, 180.0).is_above_horizon());
    }

    #[test]
    fn validate_rejects_impossible_directions() {
        assert!(SunDirection::new(FRAC_PI_2, PI).validate().is_ok());
        assert!(SunDirection::new(-FRAC_PI_2, 0.0).validate().is_ok());
        assert!(SunDirection::below_horizon().validate().is_ok());
        assert!(SunDirection::new(FRAC_PI_2 + 0.01, 0.0).validate().is_err());
        assert!(SunDirection::new(0.5, f64::NAN).validate().is_err());
        assert!(SunDirection::new(f64::INFINITY, 0.0).validate().is_err());
    }
}
