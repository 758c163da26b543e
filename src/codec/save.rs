use serde::Serialize;

use super::ShapeRecord;
use crate::error::{DocumentError, Result};
use crate::scene::ShapeCollection;

#[derive(Serialize)]
struct TimestampedDocument<'a> {
    shapes: &'a [ShapeRecord],
    timestamp: i64,
}

/// Serializes the shapes of `collection`, in insertion order, to JSON.
///
/// The timestamp is written only when one is given.
///
/// # Errors
///
/// Returns `DocumentError::Encode` if encoding fails.
pub fn serialize(collection: &ShapeCollection, timestamp: Option<i64>) -> Result<String> {
    let shapes: Vec<ShapeRecord> = collection
        .shapes()
        .map(|shape| ShapeRecord::from(shape.footprint()))
        .collect();
    let text = match timestamp {
        Some(timestamp) => serde_json::to_string(&TimestampedDocument {
            shapes: &shapes,
            timestamp,
        }),
        None => serde_json::to_string(&shapes),
    };
    Ok(text.map_err(|e| DocumentError::Encode(e.to_string()))?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::LatLng;

    fn triangle() -> Vec<LatLng> {
        vec![
            LatLng::new(50.0800, 19.8990),
            LatLng::new(50.0801, 19.8990),
            LatLng::new(50.0801, 19.8992),
        ]
    }

    #[test]
    fn empty_collection_is_empty_array() {
        let c = ShapeCollection::default();
        assert_eq!(serialize(&c, None).unwrap(), "[]");
    }

    #[test]
    fn records_are_aligned() {
        let mut c = ShapeCollection::default();
        c.add_shape(&triangle()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&serialize(&c, None).unwrap()).unwrap();
        let shapes = value.as_array().unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0]["coords"].as_array().unwrap().len(), 3);
        assert_eq!(shapes[0]["heights"].as_array().unwrap().len(), 3);
        assert_eq!(shapes[0]["coords"][1]["lat"].as_f64().unwrap(), 50.0801);
    }

    #[test]
    fn timestamp_wraps_shapes() {
        let mut c = ShapeCollection::default();
        c.add_shape(&triangle()).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&serialize(&c, Some(1_700_000_000_000)).unwrap()).unwrap();
        assert_eq!(value["timestamp"].as_i64(), Some(1_700_000_000_000));
        assert_eq!(value["shapes"].as_array().unwrap().len(), 1);
    }
}
