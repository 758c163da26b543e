use thiserror::Error;

/// Top-level error type for the Umbra shadow engine.
#[derive(Debug, Error)]
pub enum UmbraError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Errors related to footprint geometry supplied by the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("vertex {index} has invalid height {value}")]
    InvalidHeight { index: usize, value: f64 },

    #[error("invalid default height {0}")]
    InvalidDefaultHeight(f64),

    #[error("invalid coordinate ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("invalid sun direction (altitude {altitude}, azimuth {azimuth})")]
    InvalidSun { altitude: f64, azimuth: f64 },
}

/// Errors related to addressing shapes and vertices in a collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape not found")]
    NotFound,

    #[error("no shape is selected")]
    NoSelection,

    #[error("vertex index {index} is out of range for {len} vertices")]
    VertexOutOfRange { index: usize, len: usize },

    #[error("expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Errors related to the persisted JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("malformed document: {0}")]
    Malformed(String),

    #[error("failed to encode document: {0}")]
    Encode(String),
}

/// Convenience type alias for results using [`UmbraError`].
pub type Result<T> = std::result::Result<T, UmbraError>;
