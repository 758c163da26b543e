use crate::math::bearing::{offset, shadow_length};
use crate::math::Point2;

/// Shadow-cast point of every vertex: the vertex moved along `bearing` by
/// the shadow length of its height. Zero-height vertices stay put.
///
/// `altitude` must be above the horizon; otherwise every vertex is returned
/// unchanged.
#[must_use]
pub fn cast_points(base: &[Point2], heights: &[f64], altitude: f64, bearing: f64) -> Vec<Point2> {
    base.iter()
        .zip(heights)
        .map(|(v, &h)| match shadow_length(h, altitude) {
            Some(len) if len > 0.0 => offset(v, len, bearing),
            _ => *v,
        })
        .collect()
}

/// The shadow volume swept by each footprint edge: the quadrilateral
/// `[v[i], v[i+1], s[i+1], s[i]]`.
///
/// Because every cast offset points the same way, each quad is a trapezoid
/// (or a triangle/segment when heights are zero) and never self-intersects.
#[must_use]
pub fn edge_quads(base: &[Point2], cast: &[Point2]) -> Vec<Vec<Point2>> {
    let n = base.len();
    (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            vec![base[i], base[j], cast[j], cast[i]]
        })
        .collect()
}
