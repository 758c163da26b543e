use super::{Point2, TOLERANCE};

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
/// Parallel and collinear segments yield `None`.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    let cross = da.perp(&db);
    if cross.abs() < TOLERANCE {
        return None;
    }

    let d = b0 - a0;
    let t = d.perp(&db) / cross;
    let u = d.perp(&da) / cross;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        Some((a0 + da * t_clamped, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Parameters along `a0 -> a1` at which segment `a` must be split so that it
/// no longer crosses or touches the interior of segment `b`.
///
/// Covers proper crossings, T-junctions (an endpoint of `b` lying on `a`)
/// and collinear overlaps. Returned parameters lie strictly inside `(0, 1)`;
/// points closer than `tol` to either end of `a` are ignored.
#[must_use]
pub fn split_parameters(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2, tol: f64) -> Vec<f64> {
    let da = a1 - a0;
    let len_sq = da.norm_squared();
    if len_sq < tol * tol {
        return Vec::new();
    }
    let eps = tol / len_sq.sqrt();
    let mut params = Vec::new();

    for q in [b0, b1] {
        let t = (q - a0).dot(&da) / len_sq;
        if t > eps && t < 1.0 - eps && (q - (a0 + da * t)).norm() < tol {
            params.push(t);
        }
    }

    if let Some((_, t, u)) = segment_segment_intersect_2d(a0, a1, b0, b1) {
        let db_len = (b1 - b0).norm();
        let u_eps = if db_len > 0.0 { tol / db_len } else { 0.0 };
        let interior_of_b = u > u_eps && u < 1.0 - u_eps;
        if t > eps && t < 1.0 - eps && interior_of_b {
            params.push(t);
        }
    }

    params
}
