use super::Point;

/// Axis-aligned bounding box on the integer plane.
///
/// An empty box has `min` above `max`; including any point makes it valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Minimum corner.
    pub min: Point,
    /// Maximum corner.
    pub max: Point,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds {
    /// Creates a box from two corners in any order.
    #[must_use]
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Returns a box that contains nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point::new(i64::MAX, i64::MAX),
            max: Point::new(i64::MIN, i64::MIN),
        }
    }

    /// Bounding box of a point sequence.
    #[must_use]
    pub fn of_points(points: &[Point]) -> Self {
        points.iter().fold(Self::empty(), |b, &p| b.including(p))
    }

    /// Returns true if the box contains no point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Returns the box grown to include `p`.
    #[must_use]
    pub fn including(self, p: Point) -> Self {
        Self {
            min: Point::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Point::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    /// Returns the smallest box containing both boxes.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        if other.is_empty() {
            return self;
        }
        self.including(other.min).including(other.max)
    }

    /// Returns true if the boxes share at least one point (touching counts).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Width of the box, or 0 when empty.
    #[must_use]
    pub fn width(&self) -> i128 {
        if self.is_empty() {
            0
        } else {
            i128::from(self.max.x) - i128::from(self.min.x)
        }
    }

    /// Height of the box, or 0 when empty.
    #[must_use]
    pub fn height(&self) -> i128 {
        if self.is_empty() {
            0
        } else {
            i128::from(self.max.y) - i128::from(self.min.y)
        }
    }

    /// Width and height as a point, saturating at the `i64` limits.
    /// An empty box has size zero.
    #[must_use]
    pub fn size(&self) -> Point {
        let clamp = |v: i128| i64::try_from(v).unwrap_or(i64::MAX);
        Point::new(clamp(self.width()), clamp(self.height()))
    }

    /// Center of the box, rounded toward negative infinity. An empty box
    /// has its center at the origin.
    #[must_use]
    pub fn center(&self) -> Point {
        if self.is_empty() {
            return Point::default();
        }
        let mid = |lo: i64, hi: i64| {
            let sum = i128::from(lo) + i128::from(hi);
            // The floor of a mean of two i64 values fits in i64.
            i64::try_from(sum.div_euclid(2)).unwrap_or(lo)
        };
        Point::new(mid(self.min.x, self.max.x), mid(self.min.y, self.max.y))
    }
}
