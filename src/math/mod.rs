pub mod bearing;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point on the local ground plane (x = east, y = north, metres).
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector on the local ground plane.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
