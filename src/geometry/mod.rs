pub mod footprint;
pub mod lat_lng;
pub mod region;
pub mod sun;
pub mod tangent_plane;

pub use footprint::{Footprint, Vertex};
pub use lat_lng::{LatLng, EARTH_RADIUS};
pub use region::{ShadowPolygon, ShadowRegion};
pub use sun::SunDirection;
pub use tangent_plane::TangentPlane;
