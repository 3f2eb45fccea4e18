pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D vector type used for offset normals and directions.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Largest coordinate magnitude accepted by the engine.
///
/// Differences of two in-range coordinates fit in 63 bits, so every cross
/// and dot product fits in an `i128`.
pub const MAX_COORD: i64 = i64::MAX >> 2;

/// Tolerance for floating-point comparisons on staged quantities.
pub const TOLERANCE: f64 = 1e-12;
