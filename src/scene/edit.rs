use crate::error::{Result, ShapeError};
use crate::geometry::{Footprint, LatLng, Vertex};

/// A single change to a building footprint.
///
/// Edits are the only way to mutate a shape held by a
/// [`ShapeCollection`](super::ShapeCollection); the collection recomputes the
/// shadow after applying them.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeEdit {
    /// Sets the height of one vertex.
    SetHeight { index: usize, height: f64 },
    /// Sets every height at once; one value per vertex.
    SetAllHeights(Vec<f64>),
    /// Moves one vertex, keeping its height.
    MoveVertex { index: usize, to: LatLng },
    /// Inserts a vertex before `index` (`index == len` appends).
    InsertVertex { index: usize, vertex: Vertex },
    /// Removes one vertex; a footprint keeps at least 3.
    RemoveVertex { index: usize },
    /// Moves each vertex in turn by the given distance (metres) along the
    /// heading towards its successor, as already moved. One value per vertex.
    ShiftAlongEdges(Vec<f64>),
}

impl ShapeEdit {
    /// Applies the edit to a copy of `footprint`.
    ///
    /// The original is left untouched when the edit fails.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::VertexOutOfRange` or `ShapeError::LengthMismatch`
    /// for edits that do not fit the footprint, and any validation error of
    /// [`Footprint::new`] for the edited outline.
    pub fn apply_to(&self, footprint: &Footprint) -> Result<Footprint> {
        let mut vertices = footprint.vertices().to_vec();
        let len = vertices.len();
        match self {
            Self::SetHeight { index, height } => {
                vertex_mut(&mut vertices, *index)?.height = *height;
            }
            Self::SetAllHeights(heights) => {
                check_len(len, heights.len())?;
                for (v, &h) in vertices.iter_mut().zip(heights) {
                    v.height = h;
                }
            }
            Self::MoveVertex { index, to } => {
                vertex_mut(&mut vertices, *index)?.position = *to;
            }
            Self::InsertVertex { index, vertex } => {
                if *index > len {
                    return Err(ShapeError::VertexOutOfRange { index: *index, len }.into());
                }
                vertices.insert(*index, *vertex);
            }
            Self::RemoveVertex { index } => {
                vertex_mut(&mut vertices, *index)?;
                vertices.remove(*index);
            }
            Self::ShiftAlongEdges(distances) => {
                check_len(len, distances.len())?;
                for (i, &distance) in distances.iter().enumerate() {
                    let from = vertices[i].position;
                    let heading = from.heading_to(&vertices[(i + 1) % len].position)?;
                    vertices[i].position = from.offset(distance, heading);
                }
            }
        }
        Footprint::new(vertices)
    }
}

fn vertex_mut(vertices: &mut [Vertex], index: usize) -> Result<&mut Vertex> {
    let len = vertices.len();
    vertices
        .get_mut(index)
        .ok_or_else(|| ShapeError::VertexOutOfRange { index, len }.into())
}

fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(ShapeError::LengthMismatch { expected, actual }.into())
    }
}
