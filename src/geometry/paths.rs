use super::{Bounds, Path, Point};
use crate::error::Result;
use crate::operations::boolean::Clipper;
use crate::operations::offset::{EndType, Inflate, JoinType};
use crate::operations::simplify::simplify_points;

/// An unordered collection of paths; the unit of input and output for
/// Boolean and offset operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Paths(Vec<Path>);

impl Paths {
    /// Creates a path set.
    #[must_use]
    pub fn new(paths: Vec<Path>) -> Self {
        Self(paths)
    }

    /// Appends a path.
    pub fn push(&mut self, path: Path) {
        self.0.push(path);
    }

    /// Appends every path of `other`.
    pub fn extend(&mut self, other: Paths) {
        self.0.extend(other.0);
    }

    /// Number of paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no paths.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the path at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Path> {
        self.0.get(index)
    }

    /// Iterates over the paths.
    pub fn iter(&self) -> std::slice::Iter<'_, Path> {
        self.0.iter()
    }

    /// Returns the paths as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Path] {
        &self.0
    }

    /// Consumes the set, returning the paths.
    #[must_use]
    pub fn into_inner(self) -> Vec<Path> {
        self.0
    }

    /// Total vertex count over all paths.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.0.iter().map(Path::len).sum()
    }

    /// Sum of the signed areas of the closed paths.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        self.0.iter().map(Path::signed_area).sum()
    }

    /// Bounding box over all paths.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.0
            .iter()
            .fold(Bounds::empty(), |b, p| b.union(p.bounds()))
    }

    /// Returns the set moved by `(dx, dy)`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NumericOverflow` if any vertex would leave the
    /// supported range.
    pub fn translate(&self, dx: i64, dy: i64) -> Result<Self> {
        self.0.iter().map(|p| p.translate(dx, dy)).collect()
    }

    /// Returns the set scaled by `(sx, sy)` about the center of its
    /// combined bounding box, so paths keep their relative placement.
    ///
    /// # Errors
    ///
    /// See [`Path::scale`].
    pub fn scale(&self, sx: f64, sy: f64) -> Result<Self> {
        self.scale_around_point(sx, sy, self.bounds().center())
    }

    /// Returns the set scaled by `(sx, sy)` about `origin`.
    ///
    /// # Errors
    ///
    /// See [`Path::scale`].
    pub fn scale_around_point(&self, sx: f64, sy: f64, origin: Point) -> Result<Self> {
        self.0
            .iter()
            .map(|p| p.scale_around_point(sx, sy, origin))
            .collect()
    }

    /// Returns the set rotated counter-clockwise by `radians` about the
    /// center of its combined bounding box.
    ///
    /// # Errors
    ///
    /// See [`Path::scale`].
    pub fn rotate(&self, radians: f64) -> Result<Self> {
        let center = self.bounds().center();
        self.0
            .iter()
            .map(|p| p.rotate_around_point(radians, center))
            .collect()
    }

    /// Returns the set mirrored across the vertical center line of its
    /// combined bounding box.
    ///
    /// # Errors
    ///
    /// See [`Path::flip_x`].
    pub fn flip_x(&self) -> Result<Self> {
        let b = self.bounds();
        self.0
            .iter()
            .map(|p| p.mirrored(Some((b.min.x, b.max.x)), None))
            .collect()
    }

    /// Returns the set mirrored across the horizontal center line of its
    /// combined bounding box.
    ///
    /// # Errors
    ///
    /// See [`Path::flip_x`].
    pub fn flip_y(&self) -> Result<Self> {
        let b = self.bounds();
        self.0
            .iter()
            .map(|p| p.mirrored(None, Some((b.min.y, b.max.y))))
            .collect()
    }

    /// Starts a [`Clipper`] with this set as subject. Open paths go to the
    /// open subject set.
    #[must_use]
    pub fn to_clipper_subject(&self) -> Clipper {
        Clipper::new().with_subject(self)
    }

    /// Starts a [`Clipper`] with every path of this set as an open subject.
    #[must_use]
    pub fn to_clipper_open_subject(&self) -> Clipper {
        Clipper::new().with_open_subject(self)
    }

    /// Checks that all vertices lie within the supported range.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::CoordinateOutOfRange` for the first offending
    /// vertex.
    pub fn validate(&self) -> Result<()> {
        self.0.iter().try_for_each(Path::validate)
    }

    /// Offsets the set by `delta` with the given join and end types and the
    /// default miter limit and arc tolerance.
    ///
    /// # Errors
    ///
    /// See [`Inflate::execute`].
    pub fn inflate(&self, delta: f64, join_type: JoinType, end_type: EndType) -> Result<Self> {
        Inflate::new(self.clone(), delta)
            .with_join_type(join_type)
            .with_end_type(end_type)
            .execute()
    }

    /// Simplifies each path according to its own `closed` flag, dropping
    /// closed paths that collapse.
    #[must_use]
    pub fn simplify(&self, epsilon: f64) -> Self {
        let eps_sq = if epsilon.is_finite() && epsilon > 0.0 {
            epsilon * epsilon
        } else {
            0.0
        };
        self.0
            .iter()
            .filter_map(|p| {
                simplify_points(&p.points, eps_sq, p.closed).map(|pts| Path::new(pts, p.closed))
            })
            .collect()
    }

    /// Returns the set with every closed path rotated to its canonical start
    /// and the paths sorted, for order-independent comparison.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut paths: Vec<Path> = self.0.iter().map(Path::canonical).collect();
        paths.sort_by(|a, b| a.points.cmp(&b.points).then(a.closed.cmp(&b.closed)));
        Self(paths)
    }
}

impl<'a> IntoIterator for &'a Paths {
    type Item = &'a Path;
    type IntoIter = std::slice::Iter<'a, Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Paths {
    type Item = Path;
    type IntoIter = std::vec::IntoIter<Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<Path> for Paths {
    fn from_iter<T: IntoIterator<Item = Path>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Path> for Paths {
    fn from(path: Path) -> Self {
        Self(vec![path])
    }
}

impl From<Vec<Path>> for Paths {
    fn from(paths: Vec<Path>) -> Self {
        Self(paths)
    }
}

/// Closed paths from plain coordinate lists.
impl From<Vec<Vec<(i64, i64)>>> for Paths {
    fn from(paths: Vec<Vec<(i64, i64)>>) -> Self {
        paths.into_iter().map(Path::from).collect()
    }
}

/// A single closed path from a plain coordinate list.
impl From<Vec<(i64, i64)>> for Paths {
    fn from(points: Vec<(i64, i64)>) -> Self {
        Self(vec![Path::from(points)])
    }
}

impl From<Paths> for Vec<Vec<(i64, i64)>> {
    fn from(paths: Paths) -> Self {
        paths.0.into_iter().map(Into::into).collect()
    }
}

impl From<Paths> for Vec<Vec<Point>> {
    fn from(paths: Paths) -> Self {
        paths.0.into_iter().map(|p| p.points).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn conversions_round_trip() {
        let raw = vec![vec![(0, 0), (2, 0), (2, 2)], vec![(5, 5), (6, 5), (6, 6)]];
        let paths: Paths = raw.clone().into();
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.closed));
        let back: Vec<Vec<(i64, i64)>> = paths.into();
        assert_eq!(back, raw);
    }

    #[test]
    fn area_and_bounds() {
        let paths = Paths::new(vec![
            Path::rectangle(0, 0, 10, 10),
            Path::rectangle(2, 2, 2, 2).reversed(),
            Path::open([(20, 20), (30, 30)]),
        ]);
        assert_relative_eq!(paths.signed_area(), 96.0);
        let b = paths.bounds();
        assert_eq!(b.min, Point::new(0, 0));
        assert_eq!(b.max, Point::new(30, 30));
        assert_eq!(paths.point_count(), 10);
    }

    #[test]
    fn normalized_ignores_order_and_start() {
        let a = Paths::new(vec![
            Path::closed([(10, 0), (10, 10), (0, 10), (0, 0)]),
            Path::rectangle(20, 0, 1, 1),
        ]);
        let b = Paths::new(vec![Path::rectangle(20, 0, 1, 1), Path::rectangle(0, 0, 10, 10)]);
        assert_eq!(a.normalized(), b.normalized());
    }

    #[test]
    fn mixed_simplify_uses_each_flag() {
        let paths = Paths::new(vec![
            Path::open([(0, 0), (5, 1), (10, 0)]),
            Path::closed([(0, 0), (10, 0), (5, 1)]),
        ]);
        let out = paths.simplify(2.0);
        assert_eq!(out, Paths::from(Path::open([(0, 0), (10, 0)])));
    }

    #[test]
    fn inflate_convenience() {
        let square = Paths::from(Path::rectangle(0, 0, 10, 10));
        let grown = square.inflate(1.0, JoinType::Miter, EndType::Polygon).unwrap();
        assert_relative_eq!(grown.signed_area(), 144.0);
    }

    #[test]
    fn translate_set() {
        let moved = Paths::from(Path::rectangle(0, 0, 1, 1)).translate(1, 1).unwrap();
        assert_eq!(moved.bounds().min, Point::new(1, 1));
    }

    #[test]
    fn set_transforms_use_combined_bounds() {
        let pair = Paths::new(vec![Path::rectangle(0, 0, 2, 2), Path::rectangle(8, 0, 2, 2)]);
        // Combined center is (5, 1).
        let scaled = pair.scale(2.0, 1.0).unwrap();
        assert_eq!(scaled.get(0).unwrap().points[0], Point::new(-5, 0));
        assert_eq!(scaled.get(1).unwrap().points[1], Point::new(15, 0));

        let turned = pair.rotate(std::f64::consts::PI).unwrap();
        assert_eq!(turned.bounds(), pair.bounds());
        assert_eq!(turned.get(0).unwrap().points[0], Point::new(10, 2));

        let flipped = pair.flip_x().unwrap();
        assert_eq!(flipped.get(0).unwrap().bounds().min, Point::new(8, 0));
        let flipped = pair.flip_y().unwrap();
        assert_eq!(flipped.bounds(), pair.bounds());
    }

    #[test]
    fn clipper_from_paths() {
        use crate::operations::boolean::{ClipType, FillRule};

        let mut subject = Paths::from(Path::rectangle(0, 0, 10, 10));
        subject.push(Path::open([(-5, 5), (15, 5)]));
        let out = subject
            .to_clipper_subject()
            .with_clip(&Paths::from(Path::rectangle(5, 0, 10, 10)))
            .execute(ClipType::Intersection, FillRule::NonZero)
            .unwrap();
        assert_relative_eq!(out.signed_area(), 50.0);
        assert!(out.iter().any(|p| !p.closed));

        let out = Paths::from(Path::rectangle(0, 0, 10, 10))
            .to_clipper_open_subject()
            .with_clip(&Paths::from(Path::rectangle(5, -5, 10, 20)))
            .execute(ClipType::Intersection, FillRule::NonZero)
            .unwrap();
        assert!(out.iter().all(|p| !p.closed));
        assert_relative_eq!(out.signed_area(), 0.0);
        assert!(!out.is_empty());
    }
}
