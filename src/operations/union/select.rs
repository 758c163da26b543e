use crate::math::polygon_2d::point_in_polygon_2d;
use crate::math::{Point2, Vector2};

use super::split::EdgeFragment;

/// Where a sample point lies with respect to the union of all rings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClassification {
    Inside,
    Outside,
}

/// Classifies `p` against the union of `rings` under the non-zero winding rule.
#[must_use]
pub fn classify_point(p: &Point2, rings: &[Vec<Point2>]) -> PointClassification {
    if rings.iter().any(|ring| point_in_polygon_2d(p, ring)) {
        PointClassification::Inside
    } else {
        PointClassification::Outside
    }
}

/// Keeps the fragments that lie on the boundary of the union, oriented with
/// the union on their left.
///
/// A fragment is on the union boundary when exactly one of two samples just
/// left and right of its midpoint is inside the union. Fragments with the
/// filled side on their right come from reverse-wound lobes of
/// self-intersecting rings and are flipped. Fragments shared by two rings in
/// opposite directions have both sides inside and drop out; same-direction
/// duplicates are removed during assembly.
#[must_use]
pub fn boundary_fragments(
    fragments: &[EdgeFragment],
    rings: &[Vec<Point2>],
    sample_distance: f64,
) -> Vec<(Point2, Point2)> {
    fragments
        .iter()
        .filter_map(|f| {
            let d = f.end - f.start;
            let len = d.norm();
            if len < f64::EPSILON {
                return None;
            }
            // Short fragments get a proportionally closer sample.
            let sample = sample_distance.min(len * 0.1);
            let normal = Vector2::new(-d.y, d.x) / len;
            let mid = f.start + d * 0.5;
            let left = classify_point(&(mid + normal * sample), rings);
            let right = classify_point(&(mid - normal * sample), rings);
            match (left, right) {
                (PointClassification::Inside, PointClassification::Outside) => Some((f.start, f.end)),
                (PointClassification::Outside, PointClassification::Inside) => Some((f.end, f.start)),
                _ => None,
            }
        })
        .collect()
}
