mod assemble;
mod select;
mod split;

pub use select::{classify_point, PointClassification};

use tracing::debug;

use crate::geometry::ShadowPolygon;
use crate::math::polygon_2d::{dedup_consecutive, spans_area, to_ccw};
use crate::math::Point2;

/// Tolerances of the polygon union, in metres and square metres.
#[derive(Debug, Clone, Copy)]
pub struct UnionParams {
    /// Endpoints closer than this are treated as the same point.
    pub merge_tolerance: f64,
    /// How far off an edge the inside/outside samples are taken.
    pub sample_distance: f64,
    /// Input pieces and output loops with a smaller area are dropped.
    pub min_area: f64,
}

impl Default for UnionParams {
    fn default() -> Self {
        Self {
            merge_tolerance: 1e-7,
            sample_distance: 1e-5,
            min_area: 1e-8,
        }
    }
}

/// Computes the union of a set of polygons on the ground plane.
///
/// Inputs may have either winding and may overlap, touch, share edges or be
/// degenerate (zero area); degenerate inputs are ignored. A self-intersecting
/// input covers every point it winds around (non-zero rule). The result is a
/// set of disjoint polygons, each with its holes.
#[derive(Debug)]
pub struct PolygonUnion<'a> {
    polygons: &'a [Vec<Point2>],
    params: UnionParams,
}

impl<'a> PolygonUnion<'a> {
    /// Creates a new union operation.
    #[must_use]
    pub fn new(polygons: &'a [Vec<Point2>], params: UnionParams) -> Self {
        Self { polygons, params }
    }

    /// Executes the union.
    #[must_use]
    pub fn execute(&self) -> Vec<ShadowPolygon<Point2>> {
        let p = self.params;

        // Step 1: Drop rings that enclose nothing and wind the rest
        // counter-clockwise. Self-intersecting rings are kept whole.
        let rings: Vec<Vec<Point2>> = self
            .polygons
            .iter()
            .map(|poly| dedup_consecutive(poly, p.merge_tolerance))
            .filter(|ring| ring.len() >= 3 && spans_area(ring, p.min_area))
            .map(|ring| to_ccw(&ring))
            .collect();
        if rings.is_empty() {
            return Vec::new();
        }

        // Step 2: Split edges at every crossing and touching point.
        let fragments = split::split_edges(&rings, p.merge_tolerance);

        // Step 3: Keep the fragments on the union boundary.
        let boundary = select::boundary_fragments(&fragments, &rings, p.sample_distance);

        // Step 4: Link them into loops and nest holes.
        let loops = assemble::trace_loops(&boundary, p.merge_tolerance);
        let result = assemble::nest_loops(loops, p.merge_tolerance, p.sample_distance, p.min_area);

        debug!(
            inputs = self.polygons.len(),
            rings = rings.len(),
            fragments = fragments.len(),
            pieces = result.len(),
            "polygon union"
        );
        result
    }
}
