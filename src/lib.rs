pub mod codec;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod scene;

pub use codec::{deserialize, serialize, Document};
pub use error::{DocumentError, GeometryError, Result, ShapeError, UmbraError};
pub use geometry::{Footprint, LatLng, ShadowPolygon, ShadowRegion, SunDirection, Vertex};
pub use operations::shadow::{project, ShadowProjection};
pub use scene::{BuildingShape, CollectionConfig, ShapeCollection, ShapeEdit, ShapeId};
