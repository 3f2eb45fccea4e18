use nalgebra::Rotation2;

use super::{Bounds, Point};
use crate::error::{GeometryError, OperationError, Result};
use crate::math::distance_2d::distance_sq;
use crate::math::polygon_2d::{dedup_consecutive, rotate_to_canonical_start, signed_area};
use crate::math::Vector2;
use crate::operations::query::{point_in_polygon, PointInPolygonResult};

/// An ordered vertex sequence on the integer plane.
///
/// A closed path is a polygon boundary: the last vertex connects back to the
/// first. An open path is a polyline. A closed path with fewer than 3
/// distinct vertices is degenerate and contributes no area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Path {
    /// Creates a path from points and a closed flag.
    #[must_use]
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Creates a closed path (polygon boundary).
    #[must_use]
    pub fn closed<P: Into<Point>>(points: impl IntoIterator<Item = P>) -> Self {
        Self::new(points.into_iter().map(Into::into).collect(), true)
    }

    /// Creates an open path (polyline).
    #[must_use]
    pub fn open<P: Into<Point>>(points: impl IntoIterator<Item = P>) -> Self {
        Self::new(points.into_iter().map(Into::into).collect(), false)
    }

    /// Creates a closed counter-clockwise axis-aligned rectangle.
    ///
    /// Far corners saturate at the `i64` limits; such a rectangle fails
    /// [`Path::validate`].
    #[must_use]
    pub fn rectangle(x: i64, y: i64, width: i64, height: i64) -> Self {
        let (right, top) = (x.saturating_add(width), y.saturating_add(height));
        Self::closed([(x, y), (right, y), (right, top), (x, top)])
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the path has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the vertices.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Iterates over the edges, including the closing edge of a closed path.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        let count = if self.closed && n > 1 {
            n
        } else {
            n.saturating_sub(1)
        };
        (0..count).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Returns true if this is a closed path with fewer than 3 distinct
    /// vertices.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.closed && dedup_consecutive(&self.points, true).len() < 3
    }

    /// Signed area (positive for counter-clockwise). Open paths have no area.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        if self.closed {
            signed_area(&self.points)
        } else {
            0.0
        }
    }

    /// Returns true for a closed path with positive signed area.
    #[must_use]
    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Bounding box of the vertices.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::of_points(&self.points)
    }

    /// Returns the path with its vertex order reversed.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
            closed: self.closed,
        }
    }

    /// Returns the path moved by `(dx, dy)`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NumericOverflow` if any vertex would leave the
    /// supported range.
    pub fn translate(&self, dx: i64, dy: i64) -> Result<Self> {
        let points = self
            .points
            .iter()
            .map(|p| p.translated(dx, dy))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(points, self.closed))
    }

    /// Returns the path scaled by `(sx, sy)` about its bounding-box center.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NumericOverflow` if a scaled vertex is not
    /// finite or leaves the supported range.
    pub fn scale(&self, sx: f64, sy: f64) -> Result<Self> {
        self.scale_around_point(sx, sy, self.bounds().center())
    }

    /// Returns the path scaled by `(sx, sy)` about `origin`, rounding each
    /// vertex back onto the grid.
    ///
    /// # Errors
    ///
    /// Same as [`Path::scale`].
    pub fn scale_around_point(&self, sx: f64, sy: f64, origin: Point) -> Result<Self> {
        let (ox, oy) = origin.to_f64();
        self.map_f64(|x, y| ((x - ox) * sx + ox, (y - oy) * sy + oy))
    }

    /// Returns the path rotated counter-clockwise by `radians` about its
    /// bounding-box center.
    ///
    /// # Errors
    ///
    /// Same as [`Path::scale`].
    pub fn rotate(&self, radians: f64) -> Result<Self> {
        self.rotate_around_point(radians, self.bounds().center())
    }

    /// Returns the path rotated counter-clockwise by `radians` about
    /// `origin`, rounding each vertex back onto the grid.
    ///
    /// # Errors
    ///
    /// Same as [`Path::scale`].
    pub fn rotate_around_point(&self, radians: f64, origin: Point) -> Result<Self> {
        let rotation = Rotation2::new(radians);
        let (ox, oy) = origin.to_f64();
        self.map_f64(|x, y| {
            let v = rotation * Vector2::new(x - ox, y - oy);
            (v.x + ox, v.y + oy)
        })
    }

    /// Returns the path mirrored across the vertical line through its
    /// bounding-box center. The result is exact, with reversed orientation.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NumericOverflow` if a mirrored vertex leaves
    /// the supported range.
    pub fn flip_x(&self) -> Result<Self> {
        let b = self.bounds();
        self.mirrored(Some((b.min.x, b.max.x)), None)
    }

    /// Returns the path mirrored across the horizontal line through its
    /// bounding-box center.
    ///
    /// # Errors
    ///
    /// Same as [`Path::flip_x`].
    pub fn flip_y(&self) -> Result<Self> {
        let b = self.bounds();
        self.mirrored(None, Some((b.min.y, b.max.y)))
    }

    /// Mirrors each coordinate `v` to `lo + hi - v` on the given axes.
    pub(crate) fn mirrored(&self, x: Option<(i64, i64)>, y: Option<(i64, i64)>) -> Result<Self> {
        let flip = |v: i64, span: Option<(i64, i64)>| -> Result<i64> {
            let Some((lo, hi)) = span else {
                return Ok(v);
            };
            let w = i128::from(lo) + i128::from(hi) - i128::from(v);
            i64::try_from(w)
                .map_err(|_| GeometryError::NumericOverflow(format!("mirroring {v}")).into())
        };
        let points = self
            .points
            .iter()
            .map(|p| -> Result<Point> {
                let q = Point::new(flip(p.x, x)?, flip(p.y, y)?);
                if q.is_in_range() {
                    Ok(q)
                } else {
                    Err(GeometryError::NumericOverflow(format!("mirroring {p:?}")).into())
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(points, self.closed))
    }

    fn map_f64(&self, f: impl Fn(f64, f64) -> (f64, f64)) -> Result<Self> {
        let points = self
            .points
            .iter()
            .map(|p| {
                let (x, y) = p.to_f64();
                let (x, y) = f(x, y);
                Point::from_f64(x, y)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(points, self.closed))
    }

    /// Nearest vertex to `point` and its Euclidean distance, or `None` for
    /// an empty path. Ties go to the earliest vertex.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn closest_point(&self, point: Point) -> Option<(Point, f64)> {
        self.points
            .iter()
            .map(|&p| (p, distance_sq(p, point)))
            .min_by_key(|&(_, d)| d)
            .map(|(p, d)| (p, (d as f64).sqrt()))
    }

    /// Returns true if every vertex of `other` lies strictly inside this
    /// path.
    #[must_use]
    pub fn surrounds_path(&self, other: &Path) -> bool {
        !other.is_empty()
            && other
                .points
                .iter()
                .all(|&p| self.is_point_inside(p) == PointInPolygonResult::IsInside)
    }

    /// Rotates a closed path's vertex list so it starts at `point`, keeping
    /// its orientation.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::PointNotInPath` if `point` is not a vertex,
    /// or `OperationError::InvalidInput` for an open path.
    pub fn shift_start_to(&mut self, point: Point) -> Result<()> {
        if !self.closed {
            return Err(
                OperationError::InvalidInput("cannot shift the start of an open path".to_owned())
                    .into(),
            );
        }
        let index = self
            .points
            .iter()
            .position(|&p| p == point)
            .ok_or(OperationError::PointNotInPath {
                x: point.x,
                y: point.y,
            })?;
        self.points.rotate_left(index);
        Ok(())
    }

    /// Classifies `point` against this path treated as a polygon.
    #[must_use]
    pub fn is_point_inside(&self, point: Point) -> PointInPolygonResult {
        point_in_polygon(point, self)
    }

    /// Checks that all vertices lie within the supported range.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::CoordinateOutOfRange` for the first offending
    /// vertex.
    pub fn validate(&self) -> Result<()> {
        self.points.iter().try_for_each(Point::validate)
    }

    /// Returns a closed path rotated to start at its lexicographically
    /// smallest vertex. Open paths are returned unchanged.
    #[must_use]
    pub fn canonical(&self) -> Self {
        if self.closed {
            Self::new(rotate_to_canonical_start(&self.points), true)
        } else {
            self.clone()
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl From<Vec<(i64, i64)>> for Path {
    fn from(points: Vec<(i64, i64)>) -> Self {
        Self::closed(points)
    }
}

impl From<Path> for Vec<(i64, i64)> {
    fn from(path: Path) -> Self {
        path.points.into_iter().map(Into::into).collect()
    }
}
