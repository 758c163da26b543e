use super::lat_lng::{LatLng, COINCIDENCE_TOLERANCE};
use crate::error::{GeometryError, Result, ShapeError};

/// A footprint corner: a ground position plus the height of the building
/// above it, in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: LatLng,
    pub height: f64,
}

impl Vertex {
    /// Creates a new vertex.
    #[must_use]
    pub fn new(position: LatLng, height: f64) -> Self {
        Self { position, height }
    }
}

/// The ground outline of a building with one height per vertex.
///
/// Always holds at least 3 vertices, with finite non-negative heights and no
/// two consecutive vertices (including last/first) at the same position.
/// Self-intersection is not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    vertices: Vec<Vertex>,
}

impl Footprint {
    /// Creates a footprint from vertices.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for fewer than 3 vertices or
    /// coincident consecutive vertices, `GeometryError::InvalidHeight` for
    /// negative or non-finite heights, and `GeometryError::InvalidCoordinate`
    /// for non-finite positions.
    pub fn new(vertices: Vec<Vertex>) -> Result<Self> {
        validate(&vertices)?;
        Ok(Self { vertices })
    }

    /// Creates a footprint where every vertex has the same height.
    ///
    /// # Errors
    ///
    /// Same as [`Footprint::new`].
    pub fn with_uniform_height(coords: &[LatLng], height: f64) -> Result<Self> {
        Self::new(coords.iter().map(|&p| Vertex::new(p, height)).collect())
    }

    /// Creates a footprint from index-aligned coordinate and height arrays.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::LengthMismatch` if the arrays differ in length,
    /// otherwise the same as [`Footprint::new`].
    pub fn from_parts(coords: &[LatLng], heights: &[f64]) -> Result<Self> {
        if coords.len() != heights.len() {
            return Err(ShapeError::LengthMismatch {
                expected: coords.len(),
                actual: heights.len(),
            }
            .into());
        }
        Self::new(
            coords
                .iter()
                .zip(heights)
                .map(|(&p, &h)| Vertex::new(p, h))
                .collect(),
        )
    }

    /// Returns the vertices in order.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if there are no vertices. Never the case once constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the vertex positions in order.
    #[must_use]
    pub fn coords(&self) -> Vec<LatLng> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// Returns the vertex heights in order.
    #[must_use]
    pub fn heights(&self) -> Vec<f64> {
        self.vertices.iter().map(|v| v.height).collect()
    }
}

fn validate(vertices: &[Vertex]) -> Result<()> {
    let n = vertices.len();
    if n < 3 {
        return Err(GeometryError::Degenerate(format!(
            "footprint needs at least 3 vertices, got {n}"
        ))
        .into());
    }
    for (index, v) in vertices.iter().enumerate() {
        v.position.validate()?;
        if !v.height.is_finite() || v.height < 0.0 {
            return Err(GeometryError::InvalidHeight {
                index,
                value: v.height,
            }
            .into());
        }
    }
    for i in 0..n {
        let a = &vertices[i].position;
        let b = &vertices[(i + 1) % n].position;
        if a.distance_to(b) < COINCIDENCE_TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "vertices {i} and {} coincide",
                (i + 1) % n
            ))
            .into());
        }
    }
    Ok(())
}
