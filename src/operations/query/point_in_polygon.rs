use crate::geometry::{Path, Point};
use crate::math::polygon_2d::{winding_number, Probe};

/// Where a point lies relative to a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointInPolygonResult {
    /// On a vertex or edge of the boundary.
    IsOn,
    IsInside,
    IsOutside,
}

/// Classifies `point` against `polygon`, which is treated as closed
/// regardless of its `closed` flag.
///
/// Inside means a non-zero winding number, so self-overlapping regions
/// count as inside. An empty polygon contains nothing.
#[must_use]
pub fn point_in_polygon(point: Point, polygon: &Path) -> PointInPolygonResult {
    if polygon.is_empty() {
        return PointInPolygonResult::IsOutside;
    }
    match winding_number(Probe::at(point), &polygon.points) {
        None => PointInPolygonResult::IsOn,
        Some(0) => PointInPolygonResult::IsOutside,
        Some(_) => PointInPolygonResult::IsInside,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(x: i64, y: i64, polygon: &Path) -> PointInPolygonResult {
        point_in_polygon(Point::new(x, y), polygon)
    }

    #[test]
    fn square() {
        let square = Path::rectangle(0, 0, 10, 10);
        assert_eq!(classify(5, 5, &square), PointInPolygonResult::IsInside);
        assert_eq!(classify(10, 10, &square), PointInPolygonResult::IsOn);
        assert_eq!(classify(5, 0, &square), PointInPolygonResult::IsOn);
        assert_eq!(classify(11, 5, &square), PointInPolygonResult::IsOutside);
        assert_eq!(classify(5, -1, &square), PointInPolygonResult::IsOutside);
    }

    #[test]
    fn orientation_does_not_matter() {
        let square = Path::rectangle(0, 0, 10, 10).reversed();
        assert_eq!(classify(5, 5, &square), PointInPolygonResult::IsInside);
    }

    #[test]
    fn concave_notch() {
        // U shape open to the top.
        let u = Path::closed([
            (0, 0),
            (30, 0),
            (30, 30),
            (20, 30),
            (20, 10),
            (10, 10),
            (10, 30),
            (0, 30),
        ]);
        assert_eq!(classify(15, 20, &u), PointInPolygonResult::IsOutside);
        assert_eq!(classify(15, 5, &u), PointInPolygonResult::IsInside);
        assert_eq!(classify(25, 20, &u), PointInPolygonResult::IsInside);
        assert_eq!(classify(15, 10, &u), PointInPolygonResult::IsOn);
    }

    #[test]
    fn degenerate_polygons() {
        assert_eq!(classify(0, 0, &Path::default()), PointInPolygonResult::IsOutside);
        let segment = Path::closed([(0, 0), (10, 0)]);
        assert_eq!(classify(5, 0, &segment), PointInPolygonResult::IsOn);
        assert_eq!(classify(5, 1, &segment), PointInPolygonResult::IsOutside);
    }
}
