use super::{Point2, TOLERANCE};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns `true` if the ring encloses more than `min_area` anywhere.
///
/// Unlike the signed area this does not cancel out over lobes of opposite
/// winding, so a figure-eight counts while a collinear ring does not.
#[must_use]
pub fn spans_area(points: &[Point2], min_area: f64) -> bool {
    let Some(origin) = points.first() else {
        return false;
    };
    points
        .windows(2)
        .skip(1)
        .any(|w| (w[0] - origin).perp(&(w[1] - origin)).abs() * 0.5 > min_area)
}

/// Returns the ring with counter-clockwise winding, reversing it if needed.
#[must_use]
pub fn to_ccw(points: &[Point2]) -> Vec<Point2> {
    let mut ring = points.to_vec();
    if signed_area_2d(&ring) < 0.0 {
        ring.reverse();
    }
    ring
}

/// Rotates a closed polygon so it starts at the leftmost vertex (smallest x),
/// breaking ties by smallest y. Ensures deterministic output for tests.
#[must_use]
pub fn rotate_to_canonical_start(points: &[Point2]) -> Vec<Point2> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if pt.x < b.x - TOLERANCE || (pt.x - b.x).abs() < TOLERANCE && pt.y < b.y {
            best = i;
        }
    }
    let mut rotated = Vec::with_capacity(points.len());
    rotated.extend_from_slice(&points[best..]);
    rotated.extend_from_slice(&points[..best]);
    rotated
}

/// Drops consecutive vertices closer than `tol`, including the closing pair.
#[must_use]
pub fn dedup_consecutive(points: &[Point2], tol: f64) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for &p in points {
        if out.last().is_none_or(|q| (p - q).norm() >= tol) {
            out.push(p);
        }
    }
    while out.len() > 1 && (out[0] - out[out.len() - 1]).norm() < tol {
        out.pop();
    }
    out
}

/// Removes vertices lying on the straight line between their neighbours.
///
/// Spikes (a vertex whose neighbours fold back onto the same line) are
/// removed too.
#[must_use]
pub fn remove_collinear(points: &[Point2], tol: f64) -> Vec<Point2> {
    let mut ring = points.to_vec();
    let mut changed = true;
    while changed && ring.len() >= 3 {
        changed = false;
        let n = ring.len();
        for i in 0..n {
            let prev = ring[(i + n - 1) % n];
            let cur = ring[i];
            let next = ring[(i + 1) % n];
            let base = (next - prev).norm();
            let deviation = if base < tol {
                0.0
            } else {
                (cur - prev).perp(&(next - cur)).abs() / base
            };
            if deviation <= tol {
                ring.remove(i);
                changed = true;
                break;
            }
        }
    }
    ring
}

/// Winding number of `p` with respect to the closed ring `verts`.
///
/// Non-zero => inside, zero => outside.
#[must_use]
pub fn winding_number_2d(p: &Point2, verts: &[Point2]) -> i32 {
    let n = verts.len();
    let mut winding = 0i32;
    for i in 0..n {
        let v0 = verts[i];
        let v1 = verts[(i + 1) % n];
        let side = (v1 - v0).perp(&(p - v0));

        if v0.y <= p.y {
            if v1.y > p.y && side > 0.0 {
                winding += 1;
            }
        } else if v1.y <= p.y && side < 0.0 {
            winding -= 1;
        }
    }
    winding
}

/// Point-in-polygon test using the winding number.
#[must_use]
pub fn point_in_polygon_2d(p: &Point2, polygon: &[Point2]) -> bool {
    polygon.len() >= 3 && winding_number_2d(p, polygon) != 0
}

/// Axis-aligned bounds of a point set as `(min, max)`.
#[must_use]
pub fn bounds_2d<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Option<(Point2, Point2)> {
    points.into_iter().fold(None, |acc, p| match acc {
        None => Some((*p, *p)),
        Some((lo, hi)) => Some((
            Point2::new(lo.x.min(p.x), lo.y.min(p.y)),
            Point2::new(hi.x.max(p.x), hi.y.max(p.y)),
        )),
    })
}
