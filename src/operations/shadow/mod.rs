mod extrude;

pub use extrude::{cast_points, edge_quads};

use tracing::{debug, instrument};

use crate::error::{GeometryError, Result, ShapeError};
use crate::geometry::lat_lng::COINCIDENCE_TOLERANCE;
use crate::geometry::{Footprint, ShadowPolygon, ShadowRegion, SunDirection, TangentPlane};
use crate::math::Point2;
use crate::operations::union::{PolygonUnion, UnionParams};

/// Projects the shadow of one footprint onto flat ground.
///
/// Every vertex is moved away from the sun by `height / tan(altitude)`; each
/// edge together with its two cast points sweeps a trapezoid, and the shadow
/// is the union of the footprint with all those trapezoids. Differing
/// heights along the outline therefore produce differing trapezoids rather
/// than one uniform offset.
///
/// When the pieces do not join up the result is a multi-part region. A sun
/// at or below the horizon yields an empty region.
#[derive(Debug)]
pub struct ShadowProjection<'a> {
    footprint: &'a Footprint,
    sun: SunDirection,
    params: UnionParams,
}

impl<'a> ShadowProjection<'a> {
    /// Creates a new projection with default union tolerances.
    #[must_use]
    pub fn new(footprint: &'a Footprint, sun: SunDirection) -> Self {
        Self {
            footprint,
            sun,
            params: UnionParams::default(),
        }
    }

    /// Overrides the union tolerances.
    #[must_use]
    pub fn with_params(mut self, params: UnionParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the projection.
    ///
    /// Works on a tangent plane anchored at the first vertex; cast points
    /// are found with great-circle offsets and the result is mapped back to
    /// lat/lng.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidSun` for a non-finite sun direction or
    /// an altitude beyond the zenith.
    #[instrument(skip_all, fields(vertices = self.footprint.len(), altitude = self.sun.altitude, azimuth = self.sun.azimuth))]
    pub fn execute(&self) -> Result<ShadowRegion> {
        self.sun.validate()?;
        if !self.sun.is_above_horizon() {
            debug!("sun at or below the horizon, no shadow");
            return Ok(ShadowRegion::Empty);
        }

        let vertices = self.footprint.vertices();
        let plane = TangentPlane::new(vertices[0].position);
        let bearing = self.sun.anti_solar_bearing();

        let base: Vec<Point2> = vertices.iter().map(|v| plane.to_local(&v.position)).collect();
        let cast: Vec<Point2> = vertices
            .iter()
            .map(|v| {
                let len = crate::math::bearing::shadow_length(v.height, self.sun.altitude)
                    .unwrap_or(0.0);
                if len > 0.0 {
                    plane.to_local(&v.position.offset(len, bearing))
                } else {
                    plane.to_local(&v.position)
                }
            })
            .collect();

        let pieces = extrude_and_union(&base, &cast, self.params);
        Ok(ShadowRegion::from_polygons(pieces).map_points(|p| plane.to_lat_lng(p)))
    }
}

/// Projects the shadow of `footprint` under `sun` with default tolerances.
///
/// # Errors
///
/// See [`ShadowProjection::execute`].
pub fn project(footprint: &Footprint, sun: SunDirection) -> Result<ShadowRegion> {
    ShadowProjection::new(footprint, sun).execute()
}

/// Projects the shadow of a footprint given directly on the local plane
/// (x = east, y = north, metres).
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` if there are fewer than 3 vertices or
/// two consecutive vertices coincide, `GeometryError::InvalidHeight` for a
/// negative or non-finite height, `GeometryError::InvalidSun` for an
/// impossible sun direction, and `ShapeError::LengthMismatch` if `heights`
/// is not aligned with `vertices`.
pub fn project_planar(
    vertices: &[Point2],
    heights: &[f64],
    sun: SunDirection,
) -> Result<ShadowRegion<Point2>> {
    project_planar_with(vertices, heights, sun, UnionParams::default())
}

/// [`project_planar`] with explicit union tolerances.
///
/// # Errors
///
/// See [`project_planar`].
#[instrument(skip_all, fields(vertices = vertices.len(), altitude = sun.altitude, azimuth = sun.azimuth))]
pub fn project_planar_with(
    vertices: &[Point2],
    heights: &[f64],
    sun: SunDirection,
    params: UnionParams,
) -> Result<ShadowRegion<Point2>> {
    validate_planar(vertices, heights)?;
    sun.validate()?;

    if !sun.is_above_horizon() {
        debug!("sun at or below the horizon, no shadow");
        return Ok(ShadowRegion::Empty);
    }

    let cast = cast_points(vertices, heights, sun.altitude, sun.anti_solar_bearing());
    Ok(ShadowRegion::from_polygons(extrude_and_union(
        vertices, &cast, params,
    )))
}

/// Unions the footprint with the per-edge trapezoids.
fn extrude_and_union(base: &[Point2], cast: &[Point2], params: UnionParams) -> Vec<ShadowPolygon<Point2>> {
    let mut pieces = Vec::with_capacity(base.len() + 1);
    pieces.push(base.to_vec());
    pieces.extend(edge_quads(base, cast));

    let result = PolygonUnion::new(&pieces, params).execute();
    if result.len() > 1 {
        debug!(parts = result.len(), "shadow is not simply connected");
    }
    result
}

fn validate_planar(vertices: &[Point2], heights: &[f64]) -> Result<()> {
    let n = vertices.len();
    if heights.len() != n {
        return Err(ShapeError::LengthMismatch {
            expected: n,
            actual: heights.len(),
        }
        .into());
    }
    if n < 3 {
        return Err(GeometryError::Degenerate(format!(
            "footprint needs at least 3 vertices, got {n}"
        ))
        .into());
    }
    if let Some((index, &value)) = heights
        .iter()
        .enumerate()
        .find(|(_, h)| !h.is_finite() || **h < 0.0)
    {
        return Err(GeometryError::InvalidHeight { index, value }.into());
    }
    for i in 0..n {
        if (vertices[(i + 1) % n] - vertices[i]).norm() < COINCIDENCE_TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "vertices {i} and {} coincide",
                (i + 1) % n
            ))
            .into());
        }
    }
    Ok(())
}
