use crate::math::intersect_2d::split_parameters;
use crate::math::Point2;

/// A piece of an input ring edge that crosses no other edge.
#[derive(Debug, Clone, Copy)]
pub struct EdgeFragment {
    pub start: Point2,
    pub end: Point2,
    /// Index of the ring the fragment came from.
    pub ring: usize,
}

/// Splits every edge of every ring at all points where it crosses or touches
/// another edge, so that fragments meet only at their endpoints.
#[must_use]
pub fn split_edges(rings: &[Vec<Point2>], tol: f64) -> Vec<EdgeFragment> {
    let edges: Vec<(usize, Point2, Point2)> = rings
        .iter()
        .enumerate()
        .flat_map(|(ri, ring)| {
            let n = ring.len();
            (0..n).map(move |i| (ri, ring[i], ring[(i + 1) % n]))
        })
        .collect();

    let mut fragments = Vec::with_capacity(edges.len() * 2);
    for (ei, &(ring, a0, a1)) in edges.iter().enumerate() {
        let mut params: Vec<f64> = edges
            .iter()
            .enumerate()
            .filter(|&(oi, _)| oi != ei)
            .flat_map(|(_, &(_, b0, b1))| split_parameters(&a0, &a1, &b0, &b1, tol))
            .collect();
        params.sort_by(f64::total_cmp);

        let len = (a1 - a0).norm();
        let min_step = if len > 0.0 { tol / len } else { 1.0 };
        let mut start = a0;
        let mut last_t = 0.0;
        for t in params {
            if t - last_t < min_step {
                continue;
            }
            let p = a0 + (a1 - a0) * t;
            fragments.push(EdgeFragment { start, end: p, ring });
            start = p;
            last_t = t;
        }
        fragments.push(EdgeFragment { start, end: a1, ring });
    }
    fragments
}
