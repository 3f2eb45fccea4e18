mod point_in_polygon;

pub use point_in_polygon::{point_in_polygon, PointInPolygonResult};
