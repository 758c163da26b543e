use tracing::trace;

use super::edit::ShapeEdit;
use crate::error::Result;
use crate::geometry::{Footprint, ShadowRegion, SunDirection};
use crate::operations::shadow::project;

slotmap::new_key_type! {
    /// Unique identifier for a building shape in a collection.
    pub struct ShapeId;
}

/// One building: its footprint, the shadow derived from it, and whether it is
/// the selected shape.
///
/// The shadow is derived state. It is replaced wholesale by
/// [`recompute_shadow`](Self::recompute_shadow) and never edited directly;
/// the owning collection recomputes it after every footprint edit and sun
/// change.
#[derive(Debug, Clone)]
pub struct BuildingShape {
    id: ShapeId,
    footprint: Footprint,
    shadow: ShadowRegion,
    selected: bool,
}

impl BuildingShape {
    /// Creates a shape around a shadow already projected for `footprint`.
    pub(crate) fn new(id: ShapeId, footprint: Footprint, shadow: ShadowRegion) -> Self {
        Self {
            id,
            footprint,
            shadow,
            selected: false,
        }
    }

    /// Returns the shape's identifier.
    #[must_use]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Returns the footprint.
    #[must_use]
    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    /// Returns the shadow as of the last recomputation.
    #[must_use]
    pub fn shadow(&self) -> &ShadowRegion {
        &self.shadow
    }

    /// Whether this is the collection's selected shape.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Sets one vertex height. The shadow is stale until recomputed.
    pub(crate) fn set_vertex_height(&mut self, index: usize, height: f64) -> Result<()> {
        self.apply(&ShapeEdit::SetHeight { index, height })
    }

    /// Applies an edit to the footprint. The shadow is stale until
    /// recomputed; on error the footprint is unchanged.
    pub(crate) fn apply(&mut self, edit: &ShapeEdit) -> Result<()> {
        self.footprint = edit.apply_to(&self.footprint)?;
        Ok(())
    }

    /// Replaces the stored shadow with a fresh projection under `sun`.
    pub(crate) fn recompute_shadow(&mut self, sun: SunDirection) -> Result<()> {
        self.shadow = project(&self.footprint, sun)?;
        trace!(id = ?self.id, parts = self.shadow.len(), "shadow recomputed");
        Ok(())
    }

    pub(crate) fn set_shadow(&mut self, shadow: ShadowRegion) {
        self.shadow = shadow;
    }

    pub(crate) fn select(&mut self) {
        self.selected = true;
    }

    pub(crate) fn deselect(&mut self) {
        self.selected = false;
    }
}
