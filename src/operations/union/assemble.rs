use std::collections::HashSet;
use std::f64::consts::TAU;

use crate::geometry::ShadowPolygon;
use crate::math::polygon_2d::{
    point_in_polygon_2d, remove_collinear, rotate_to_canonical_start, signed_area_2d,
};
use crate::math::{Point2, Vector2, TOLERANCE};

/// Links boundary fragments into closed loops.
///
/// Endpoints closer than `merge_tolerance` are merged and duplicate directed
/// edges are dropped. At a vertex with several outgoing edges the walk takes
/// the sharpest left turn, which keeps loops that only touch at a corner
/// apart. Open chains (numerical leftovers) are discarded.
#[must_use]
pub fn trace_loops(edges: &[(Point2, Point2)], merge_tolerance: f64) -> Vec<Vec<Point2>> {
    let mut points: Vec<Point2> = Vec::new();
    let mut edge_list: Vec<(usize, usize)> = Vec::new();
    let mut seen: HashSet<(usize, usize)> = HashSet::new();

    for (start, end) in edges {
        let si = ensure_point(&mut points, *start, merge_tolerance);
        let ei = ensure_point(&mut points, *end, merge_tolerance);
        if si != ei && seen.insert((si, ei)) {
            edge_list.push((si, ei));
        }
    }

    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); points.len()];
    for (edge_idx, &(si, _)) in edge_list.iter().enumerate() {
        adjacency[si].push(edge_idx);
    }

    let mut used = vec![false; edge_list.len()];
    let mut loops = Vec::new();

    while let Some(start_edge) = find_start_edge(&edge_list, &used, &points) {
        let start_node = edge_list[start_edge].0;
        let mut ring = Vec::new();
        let mut current = start_edge;
        let closed = loop {
            used[current] = true;
            let (si, ei) = edge_list[current];
            ring.push(points[si]);
            if ei == start_node {
                break true;
            }
            let incoming = points[ei] - points[si];
            match pick_next_edge(ei, incoming, &edge_list, &adjacency, &points, &used) {
                Some(next) => current = next,
                None => break false,
            }
        };
        if closed && ring.len() >= 3 {
            loops.push(ring);
        }
    }

    loops
}

/// Finds the next unused edge starting from the point with lowest y (then x).
fn find_start_edge(edge_list: &[(usize, usize)], used: &[bool], points: &[Point2]) -> Option<usize> {
    let mut best: Option<(usize, Point2)> = None;
    for (edge_idx, &(si, _)) in edge_list.iter().enumerate() {
        if used[edge_idx] {
            continue;
        }
        let p = points[si];
        let better = best.is_none_or(|(_, b)| {
            p.y < b.y - TOLERANCE || ((p.y - b.y).abs() < TOLERANCE && p.x < b.x)
        });
        if better {
            best = Some((edge_idx, p));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Picks the unused outgoing edge at `node` that turns most to the left
/// relative to the `incoming` direction. A U-turn is taken only as a last
/// resort.
fn pick_next_edge(
    node: usize,
    incoming: Vector2,
    edge_list: &[(usize, usize)],
    adjacency: &[Vec<usize>],
    points: &[Point2],
    used: &[bool],
) -> Option<usize> {
    let reverse_angle = (-incoming.y).atan2(-incoming.x);
    let mut best: Option<(usize, f64)> = None;

    for &edge_idx in &adjacency[node] {
        if used[edge_idx] {
            continue;
        }
        let d = points[edge_list[edge_idx].1] - points[node];
        let mut delta = (d.y.atan2(d.x) - reverse_angle).rem_euclid(TAU);
        if delta > TAU - TOLERANCE {
            delta = 0.0;
        }
        if best.is_none_or(|(_, bd)| delta > bd) {
            best = Some((edge_idx, delta));
        }
    }

    best.map(|(idx, _)| idx)
}

/// Finds or inserts a point, returning its index.
fn ensure_point(points: &mut Vec<Point2>, p: Point2, tol: f64) -> usize {
    if let Some(i) = points.iter().position(|q| (q - p).norm() < tol) {
        return i;
    }
    points.push(p);
    points.len() - 1
}

/// Sorts traced loops into exteriors (counter-clockwise) and holes
/// (clockwise) and attaches every hole to the smallest exterior containing
/// it.
///
/// Collinear vertices left over from edge splitting are removed, loops
/// smaller than `min_area` are dropped, and the output order is
/// deterministic: pieces sorted by their canonical start vertex.
#[must_use]
pub fn nest_loops(
    loops: Vec<Vec<Point2>>,
    merge_tolerance: f64,
    sample_distance: f64,
    min_area: f64,
) -> Vec<ShadowPolygon<Point2>> {
    let mut exteriors: Vec<(f64, ShadowPolygon<Point2>)> = Vec::new();
    let mut holes: Vec<Vec<Point2>> = Vec::new();

    for ring in loops {
        let ring = remove_collinear(&ring, merge_tolerance);
        if ring.len() < 3 {
            continue;
        }
        let area = signed_area_2d(&ring);
        if area > min_area {
            exteriors.push((area, ShadowPolygon::new(rotate_to_canonical_start(&ring))));
        } else if area < -min_area {
            holes.push(rotate_to_canonical_start(&ring));
        }
    }

    for hole in holes {
        let sample = solid_side_sample(&hole, sample_distance);
        let owner = exteriors
            .iter_mut()
            .filter(|(_, poly)| point_in_polygon_2d(&sample, &poly.exterior))
            .min_by(|(a, _), (b, _)| a.total_cmp(b));
        match owner {
            Some((_, poly)) => poly.holes.push(hole),
            None => tracing::debug!(vertices = hole.len(), "dropping hole with no enclosing exterior"),
        }
    }

    let mut polygons: Vec<ShadowPolygon<Point2>> =
        exteriors.into_iter().map(|(_, poly)| poly).collect();
    for poly in &mut polygons {
        poly.holes.sort_by(|a, b| a[0].x.total_cmp(&b[0].x).then(a[0].y.total_cmp(&b[0].y)));
    }
    polygons.sort_by(|a, b| {
        a.exterior[0]
            .x
            .total_cmp(&b.exterior[0].x)
            .then(a.exterior[0].y.total_cmp(&b.exterior[0].y))
    });
    polygons
}

/// A point just off the first edge of `ring`, on its filled (left) side.
fn solid_side_sample(ring: &[Point2], sample_distance: f64) -> Point2 {
    let a = ring[0];
    let b = ring[1 % ring.len()];
    let d = b - a;
    let len = d.norm().max(TOLERANCE);
    a + d * 0.5 + Vector2::new(-d.y, d.x) / len * sample_distance
}
