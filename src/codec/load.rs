use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{Document, ShapeRecord};
use crate::error::{DocumentError, Result};
use crate::geometry::Footprint;

/// The object form of a document.
#[derive(Debug, Deserialize)]
struct TimestampedRaw {
    shapes: Vec<ShapeRecord>,
    #[serde(default)]
    timestamp: Option<i64>,
}

/// Parses a JSON document into footprints and an optional timestamp.
///
/// The text is first read as plain JSON to tell the array form from the
/// object form, then decoded as that form alone, so errors carry the line
/// and column of the offending value. Every record is validated before
/// anything is returned.
///
/// # Errors
///
/// Returns `DocumentError::Malformed` if the text is not a valid document,
/// if a record's `coords` and `heights` differ in length, has fewer than 3
/// coordinates, or does not form a valid footprint.
pub fn deserialize(text: &str) -> Result<Document> {
    let value: Value = serde_json::from_str(text).map_err(malformed)?;

    let (records, timestamp) = match value {
        Value::Array(_) => (
            serde_json::from_str::<Vec<ShapeRecord>>(text).map_err(malformed)?,
            None,
        ),
        Value::Object(_) => {
            let raw: TimestampedRaw = serde_json::from_str(text).map_err(malformed)?;
            (raw.shapes, raw.timestamp)
        }
        _ => {
            return Err(DocumentError::Malformed(
                "expected an array of shapes or an object with a shapes array".to_owned(),
            )
            .into())
        }
    };

    let footprints = records
        .iter()
        .enumerate()
        .map(|(index, record)| to_footprint(index, record))
        .collect::<Result<Vec<_>>>()?;

    debug!(shapes = footprints.len(), ?timestamp, "document decoded");
    Ok(Document {
        footprints,
        timestamp,
    })
}

fn malformed(error: serde_json::Error) -> DocumentError {
    DocumentError::Malformed(error.to_string())
}

fn to_footprint(index: usize, record: &ShapeRecord) -> Result<Footprint> {
    let (coords, heights) = (record.coords.len(), record.heights.len());
    if coords != heights {
        return Err(DocumentError::Malformed(format!(
            "shape {index} has {coords} coordinates and {heights} heights"
        ))
        .into());
    }
    if coords < 3 {
        return Err(DocumentError::Malformed(format!(
            "shape {index} has {coords} coordinates, at least 3 required"
        ))
        .into());
    }
    Ok(Footprint::from_parts(&record.coords, &record.heights)
        .map_err(|e| DocumentError::Malformed(format!("shape {index}: {e}")))?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::UmbraError;

    const TRIANGLE: &str = r#"{"coords":[{"lat":50.08,"lng":19.899},{"lat":50.0801,"lng":19.899},{"lat":50.0801,"lng":19.8992}],"heights":[10,12.5,0]}"#;

    fn is_malformed(text: &str) -> bool {
        matches!(
            deserialize(text),
            Err(UmbraError::Document(DocumentError::Malformed(_)))
        )
    }

    #[test]
    fn bare_array_loads() {
        let doc = deserialize(&format!("[{TRIANGLE}]")).unwrap();
        assert_eq!(doc.footprints.len(), 1);
        assert_eq!(doc.footprints[0].heights(), vec![10.0, 12.5, 0.0]);
        assert_eq!(doc.timestamp, None);
    }

    #[test]
    fn timestamped_object_loads() {
        let doc = deserialize(&format!(r#"{{"shapes":[{TRIANGLE}],"timestamp":1700000000000}}"#))
            .unwrap();
        assert_eq!(doc.footprints.len(), 1);
        assert_eq!(doc.timestamp, Some(1_700_000_000_000));
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(deserialize("[]").unwrap().footprints.is_empty());
    }

    #[test]
    fn invalid_json_is_malformed() {
        assert!(is_malformed("{"));
        assert!(is_malformed("42"));
        assert!(is_malformed(r#"[{"coords":[]}]"#));
    }

    #[test]
    fn decode_errors_report_their_location() {
        let text = "[\n  {\"coords\": [], \"heights\": []},\n  {\"coords\": []}\n]";
        let Err(UmbraError::Document(DocumentError::Malformed(message))) = deserialize(text) else {
            panic!("expected a malformed document");
        };
        assert!(message.contains("heights"), "{message}");
        assert!(message.contains("line 3"), "{message}");

        let text = r#"{"shapes": [], "timestamp": "noon"}"#;
        let Err(UmbraError::Document(DocumentError::Malformed(message))) = deserialize(text) else {
            panic!("expected a malformed document");
        };
        assert!(message.contains("line 1 column"), "{message}");
    }

    #[test]
    fn object_without_shapes_is_malformed() {
        assert!(is_malformed(r#"{"timestamp": 1}"#));
        assert!(is_malformed(r#""shapes""#));
    }

    #[test]
    fn misaligned_arrays_are_malformed() {
        let text = r#"[{"coords":[{"lat":0,"lng":0},{"lat":0,"lng":0.001},{"lat":0.001,"lng":0.001},{"lat":0.001,"lng":0}],"heights":[1,2,3]}]"#;
        assert!(is_malformed(text));
    }

    #[test]
    fn too_few_coordinates_are_malformed() {
        let text = r#"[{"coords":[{"lat":0,"lng":0},{"lat":0,"lng":0.001}],"heights":[1,2]}]"#;
        assert!(is_malformed(text));
    }

    #[test]
    fn invalid_footprint_is_malformed() {
        let negative = r#"[{"coords":[{"lat":0,"lng":0},{"lat":0,"lng":0.001},{"lat":0.001,"lng":0}],"heights":[1,-2,3]}]"#;
        assert!(is_malformed(negative));
        let out_of_range = r#"[{"coords":[{"lat":91,"lng":0},{"lat":0,"lng":0.001},{"lat":0.001,"lng":0}],"heights":[1,2,3]}]"#;
        assert!(is_malformed(out_of_range));
    }
}
