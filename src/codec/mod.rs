//! JSON persistence of a shape collection.
//!
//! A document is an ordered array of `{ "coords": [{lat, lng}...], "heights": [...] }`
//! records, one per shape. When a timestamp is associated the array is wrapped
//! as `{ "shapes": [...], "timestamp": <epoch ms> }`. Both forms load.

mod load;
mod save;

pub use load::deserialize;
pub use save::serialize;

use serde::{Deserialize, Serialize};

use crate::geometry::{Footprint, LatLng};

/// One persisted shape: index-aligned coordinates and heights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub coords: Vec<LatLng>,
    pub heights: Vec<f64>,
}

impl From<&Footprint> for ShapeRecord {
    fn from(footprint: &Footprint) -> Self {
        Self {
            coords: footprint.coords(),
            heights: footprint.heights(),
        }
    }
}

/// A decoded document, ready to replace a collection's shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Footprints in document order.
    pub footprints: Vec<Footprint>,
    /// Associated date/time in epoch milliseconds.
    pub timestamp: Option<i64>,
}
