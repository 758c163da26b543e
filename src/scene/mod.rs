mod building;
mod edit;

pub use building::{BuildingShape, ShapeId};
pub use edit::ShapeEdit;

use slotmap::SlotMap;
use tracing::{debug, instrument};

use crate::codec;
use crate::error::{GeometryError, Result, ShapeError};
use crate::geometry::{Footprint, LatLng, ShadowRegion, SunDirection};
use crate::operations::shadow::project;

/// Height in metres given to the vertices of newly drawn shapes.
pub const DEFAULT_HEIGHT: f64 = 10.0;

/// Initial settings of a [`ShapeCollection`].
#[derive(Debug, Clone, Copy)]
pub struct CollectionConfig {
    /// Height applied to every vertex of a newly added shape.
    pub default_height: f64,
    /// Sun direction shadows are computed under until the caller sets one.
    pub sun: SunDirection,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            default_height: DEFAULT_HEIGHT,
            sun: SunDirection::below_horizon(),
        }
    }
}

/// Owns every building shape of a document, the selection, the default
/// height for new shapes and the current sun direction.
///
/// Every mutation recomputes the affected shadows before returning, so
/// readers never observe a shadow that disagrees with its footprint or with
/// the current sun. Failed mutations leave the collection unchanged.
#[derive(Debug)]
pub struct ShapeCollection {
    shapes: SlotMap<ShapeId, BuildingShape>,
    order: Vec<ShapeId>,
    selected: Option<ShapeId>,
    default_height: f64,
    sun: SunDirection,
    timestamp: Option<i64>,
}

impl ShapeCollection {
    /// Creates an empty collection.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidDefaultHeight` if the configured
    /// default height is negative or not finite, and
    /// `GeometryError::InvalidSun` for an impossible sun direction.
    pub fn new(config: CollectionConfig) -> Result<Self> {
        check_default_height(config.default_height)?;
        config.sun.validate()?;
        Ok(Self {
            shapes: SlotMap::with_key(),
            order: Vec::new(),
            selected: None,
            default_height: config.default_height,
            sun: config.sun,
            timestamp: None,
        })
    }

    // --- Shapes ---

    /// Adds a shape drawn as `coords`, every vertex at the default height,
    /// and computes its shadow.
    ///
    /// # Errors
    ///
    /// Returns a geometry error if the outline is not a valid footprint.
    pub fn add_shape(&mut self, coords: &[LatLng]) -> Result<ShapeId> {
        let footprint = Footprint::with_uniform_height(coords, self.default_height)?;
        self.add_footprint(footprint)
    }

    /// Adds a shape with explicit per-vertex heights and computes its shadow.
    ///
    /// # Errors
    ///
    /// Returns an error if the shadow cannot be projected.
    pub fn add_footprint(&mut self, footprint: Footprint) -> Result<ShapeId> {
        let shadow = project(&footprint, self.sun)?;
        let id = self.shapes.insert_with_key(|id| BuildingShape::new(id, footprint, shadow));
        self.order.push(id);
        debug!(?id, shapes = self.order.len(), "shape added");
        Ok(id)
    }

    /// Removes a shape, clearing the selection if it was selected.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::NotFound` if the id is unknown.
    pub fn remove_shape(&mut self, id: ShapeId) -> Result<BuildingShape> {
        let shape = self.shapes.remove(id).ok_or(ShapeError::NotFound)?;
        self.order.retain(|&other| other != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        Ok(shape)
    }

    /// Returns a shape by id.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::NotFound` if the id is unknown.
    pub fn shape(&self, id: ShapeId) -> Result<&BuildingShape> {
        Ok(self.shapes.get(id).ok_or(ShapeError::NotFound)?)
    }

    /// Iterates over the shapes in insertion order.
    pub fn shapes(&self) -> impl Iterator<Item = &BuildingShape> + '_ {
        self.order.iter().filter_map(move |&id| self.shapes.get(id))
    }

    /// Returns the shape ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[ShapeId] {
        &self.order
    }

    /// Returns the number of shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the collection holds no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Replaces every shape at once, clearing the selection.
    ///
    /// All shadows are computed before anything is replaced; on error the
    /// collection is unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if any shadow cannot be projected.
    #[instrument(skip_all, fields(shapes = footprints.len()))]
    pub fn replace_shapes(&mut self, footprints: Vec<Footprint>) -> Result<()> {
        let mut shapes: SlotMap<ShapeId, BuildingShape> = SlotMap::with_key();
        let mut order = Vec::with_capacity(footprints.len());
        for footprint in footprints {
            let shadow = project(&footprint, self.sun)?;
            order.push(shapes.insert_with_key(|id| BuildingShape::new(id, footprint, shadow)));
        }
        self.shapes = shapes;
        self.order = order;
        self.selected = None;
        Ok(())
    }

    // --- Edits ---

    /// Applies one edit to a shape and recomputes its shadow.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::NotFound` for an unknown id, or the edit's error;
    /// the shape is unchanged on error.
    pub fn edit_shape(&mut self, id: ShapeId, edit: ShapeEdit) -> Result<()> {
        self.edit_shape_batch(id, std::slice::from_ref(&edit))
    }

    /// Applies several edits to a shape in order, recomputing its shadow
    /// once at the end. Either all edits apply or none do.
    ///
    /// # Errors
    ///
    /// See [`edit_shape`](Self::edit_shape).
    pub fn edit_shape_batch(&mut self, id: ShapeId, edits: &[ShapeEdit]) -> Result<()> {
        let sun = self.sun;
        let shape = self.shapes.get_mut(id).ok_or(ShapeError::NotFound)?;
        let mut edited = shape.clone();
        for edit in edits {
            edited.apply(edit)?;
        }
        edited.recompute_shadow(sun)?;
        *shape = edited;
        Ok(())
    }

    /// Sets one vertex height of a shape and recomputes its shadow.
    ///
    /// # Errors
    ///
    /// See [`edit_shape`](Self::edit_shape).
    pub fn set_vertex_height(&mut self, id: ShapeId, index: usize, height: f64) -> Result<()> {
        let sun = self.sun;
        let shape = self.shapes.get_mut(id).ok_or(ShapeError::NotFound)?;
        let mut edited = shape.clone();
        edited.set_vertex_height(index, height)?;
        edited.recompute_shadow(sun)?;
        *shape = edited;
        Ok(())
    }

    /// Applies an edit to the selected shape.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::NoSelection` if nothing is selected, otherwise
    /// see [`edit_shape`](Self::edit_shape).
    pub fn edit_selected(&mut self, edit: ShapeEdit) -> Result<()> {
        let id = self.selected.ok_or(ShapeError::NoSelection)?;
        self.edit_shape(id, edit)
    }

    // --- Selection ---

    /// Selects a shape, deselecting any other.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::NotFound` if the id is unknown.
    pub fn select(&mut self, id: ShapeId) -> Result<()> {
        if !self.shapes.contains_key(id) {
            return Err(ShapeError::NotFound.into());
        }
        self.clear_selection();
        if let Some(shape) = self.shapes.get_mut(id) {
            shape.select();
        }
        self.selected = Some(id);
        Ok(())
    }

    /// Deselects the selected shape, if any.
    pub fn clear_selection(&mut self) {
        if let Some(shape) = self.selected.take().and_then(|id| self.shapes.get_mut(id)) {
            shape.deselect();
        }
    }

    /// Returns the selected shape id.
    #[must_use]
    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    /// Returns the selected shape.
    #[must_use]
    pub fn selected_shape(&self) -> Option<&BuildingShape> {
        self.selected.and_then(|id| self.shapes.get(id))
    }

    // --- Ambient state ---

    /// Returns the current sun direction.
    #[must_use]
    pub fn sun_direction(&self) -> SunDirection {
        self.sun
    }

    /// Sets the sun direction and recomputes every shadow.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidSun` for an impossible direction, or
    /// an error if any shadow cannot be projected; the collection is
    /// unchanged in either case.
    #[instrument(skip(self), fields(shapes = self.order.len()))]
    pub fn set_sun_direction(&mut self, sun: SunDirection) -> Result<()> {
        sun.validate()?;
        let shadows: Vec<(ShapeId, ShadowRegion)> = self
            .shapes
            .iter()
            .map(|(id, shape)| project(shape.footprint(), sun).map(|s| (id, s)))
            .collect::<Result<_>>()?;
        for (id, shadow) in shadows {
            if let Some(shape) = self.shapes.get_mut(id) {
                shape.set_shadow(shadow);
            }
        }
        self.sun = sun;
        Ok(())
    }

    /// Returns the height given to newly added shapes.
    #[must_use]
    pub fn default_height(&self) -> f64 {
        self.default_height
    }

    /// Sets the height for shapes added from now on. Existing shapes keep
    /// their heights.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidDefaultHeight` for a negative or
    /// non-finite height.
    pub fn set_default_height(&mut self, height: f64) -> Result<()> {
        check_default_height(height)?;
        self.default_height = height;
        Ok(())
    }

    /// Returns the date/time (epoch milliseconds) associated with the
    /// document, if any.
    #[must_use]
    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    /// Associates the document with a date/time (epoch milliseconds).
    pub fn set_timestamp(&mut self, timestamp: Option<i64>) {
        self.timestamp = timestamp;
    }

    // --- Persistence ---

    /// Serializes the shapes and the associated timestamp to JSON.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Encode` if encoding fails.
    pub fn save(&self) -> Result<String> {
        codec::serialize(self, self.timestamp)
    }

    /// Replaces every shape with those of a JSON document and returns the
    /// document's timestamp.
    ///
    /// Shadows are computed under the current sun; callers that derive the
    /// sun from the timestamp should call
    /// [`set_sun_direction`](Self::set_sun_direction) afterwards.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Malformed` for an invalid document; the
    /// collection is unchanged in that case.
    pub fn load(&mut self, text: &str) -> Result<Option<i64>> {
        let document = codec::deserialize(text)?;
        self.replace_shapes(document.footprints)?;
        self.timestamp = document.timestamp;
        Ok(document.timestamp)
    }
}

impl Default for ShapeCollection {
    fn default() -> Self {
        let config = CollectionConfig::default();
        Self {
            shapes: SlotMap::with_key(),
            order: Vec::new(),
            selected: None,
            default_height: config.default_height,
            sun: config.sun,
            timestamp: None,
        }
    }
}

fn check_default_height(height: f64) -> Result<()> {
    if !height.is_finite() || height < 0.0 {
        return Err(GeometryError::InvalidDefaultHeight(height).into());
    }
    Ok(())
}
