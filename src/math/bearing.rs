use std::f64::consts::TAU;

use super::{Point2, Vector2, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Normalizes a bearing to `[0, 2pi)`.
#[must_use]
pub fn normalize_bearing(bearing: f64) -> f64 {
    let r = bearing.rem_euclid(TAU);
    if r >= TAU {
        0.0
    } else {
        r
    }
}

/// Unit vector pointing along `bearing` (0 = north, clockwise).
#[must_use]
pub fn bearing_direction(bearing: f64) -> Vector2 {
    Vector2::new(bearing.sin(), bearing.cos())
}

/// Heading from `a` to `b` on the local plane, 0 = north, increasing clockwise.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` if the two points coincide.
pub fn bearing(a: &Point2, b: &Point2) -> Result<f64> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    if dx.hypot(dy) < TOLERANCE {
        return Err(GeometryError::Degenerate(format!(
            "bearing undefined between coincident points ({}, {})",
            a.x, a.y
        ))
        .into());
    }
    Ok(normalize_bearing(dx.atan2(dy)))
}

/// Moves `p` by `distance` metres along `bearing`.
#[must_use]
pub fn offset(p: &Point2, distance: f64, bearing: f64) -> Point2 {
    *p + bearing_direction(bearing) * distance
}

/// Length of the shadow cast by an object of `height` metres under a sun at
/// `altitude` radians.
///
/// Returns `None` when the sun is at or below the horizon: the shadow is
/// unbounded and not modelled.
#[must_use]
pub fn shadow_length(height: f64, altitude: f64) -> Option<f64> {
    if altitude <= 0.0 {
        return None;
    }
    Some(height / altitude.tan())
}
