pub mod error;
pub mod ffi;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{ClipError, Result};
pub use geometry::{Bounds, Path, Paths, Point, PolyNode, PolyNodeId, PolyTree};
pub use operations::boolean::{
    boolean, difference, intersect, union, xor, ClipType, Clipper, FillRule,
};
pub use operations::offset::{inflate, EndType, Inflate, JoinType};
pub use operations::query::{point_in_polygon, PointInPolygonResult};
pub use operations::simplify::simplify;
