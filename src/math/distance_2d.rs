use super::polygon_2d::cross;
use crate::geometry::Point;

/// Returns the squared distance between two points. Exact.
#[must_use]
pub fn distance_sq(a: Point, b: Point) -> i128 {
    let dx = i128::from(b.x) - i128::from(a.x);
    let dy = i128::from(b.y) - i128::from(a.y);
    dx * dx + dy * dy
}

/// Returns the squared perpendicular distance from `p` to the infinite line
/// through `a` and `b`.
///
/// Degenerates to the squared point distance when `a == b`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn perpendicular_distance_sq(p: Point, a: Point, b: Point) -> f64 {
    let len_sq = distance_sq(a, b);
    if len_sq == 0 {
        return distance_sq(a, p) as f64;
    }
    let area = cross(a, b, p) as f64;
    area * area / len_sq as f64
}
