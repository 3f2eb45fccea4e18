use crate::geometry::Point;

/// Orientation of `c` relative to the directed line `a → b`.
///
/// Positive when `c` lies to the left (counter-clockwise turn), negative to
/// the right, zero when collinear. Exact for in-range coordinates.
#[must_use]
pub fn cross(a: Point, b: Point, c: Point) -> i128 {
    let abx = i128::from(b.x) - i128::from(a.x);
    let aby = i128::from(b.y) - i128::from(a.y);
    let acx = i128::from(c.x) - i128::from(a.x);
    let acy = i128::from(c.y) - i128::from(a.y);
    abx * acy - aby * acx
}

/// Dot product of `b - a` and `c - a`.
#[must_use]
pub fn dot(a: Point, b: Point, c: Point) -> i128 {
    let abx = i128::from(b.x) - i128::from(a.x);
    let aby = i128::from(b.y) - i128::from(a.y);
    let acx = i128::from(c.x) - i128::from(a.x);
    let acy = i128::from(c.y) - i128::from(a.y);
    abx * acx + aby * acy
}

/// Computes the signed area of a closed ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. Each term is
/// exact; only the accumulation is staged through `f64`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let origin = points[0];
    let mut sum = 0.0;
    for i in 1..n - 1 {
        sum += cross(origin, points[i], points[i + 1]) as f64;
    }
    sum * 0.5
}

/// Rotates a closed ring so it starts at its lexicographically smallest
/// vertex (smallest x, then smallest y). Ensures deterministic output.
#[must_use]
pub fn rotate_to_canonical_start(points: &[Point]) -> Vec<Point> {
    let Some(best) = leftmost_bottom_index(points) else {
        return Vec::new();
    };
    let mut rotated = Vec::with_capacity(points.len());
    rotated.extend_from_slice(&points[best..]);
    rotated.extend_from_slice(&points[..best]);
    rotated
}

/// Returns the index of the leftmost-bottommost vertex, or `None` for an
/// empty slice.
#[must_use]
pub fn leftmost_bottom_index(points: &[Point]) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| **p)
        .map(|(i, _)| i)
}

/// Returns true if `p` lies on the closed segment `a-b`.
#[must_use]
pub fn is_on_segment(p: Point, a: Point, b: Point) -> bool {
    cross(a, b, p) == 0
        && p.x >= a.x.min(b.x)
        && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y)
        && p.y <= a.y.max(b.y)
}

/// A query position that is either a grid point or the exact midpoint of
/// two grid points.
///
/// Stored as the pair whose average is the position, so orientation tests
/// stay exact without leaving `i128`.
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    a: Point,
    b: Point,
}

impl Probe {
    /// A grid point.
    #[must_use]
    pub fn at(p: Point) -> Self {
        Self { a: p, b: p }
    }

    /// The exact midpoint of `a-b`.
    #[must_use]
    pub fn midpoint(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    fn doubled_x(&self) -> i128 {
        i128::from(self.a.x) + i128::from(self.b.x)
    }

    fn doubled_y(&self) -> i128 {
        i128::from(self.a.y) + i128::from(self.b.y)
    }

    /// Orientation of this position relative to the directed line `s → e`
    /// (sign only; the magnitude is doubled).
    #[must_use]
    pub fn side_of(&self, s: Point, e: Point) -> i128 {
        cross(s, e, self.a) + cross(s, e, self.b)
    }

    /// Returns true if this position lies on the closed segment `s-e`.
    #[must_use]
    pub fn is_on_segment(&self, s: Point, e: Point) -> bool {
        let (x2, y2) = (self.doubled_x(), self.doubled_y());
        self.side_of(s, e) == 0
            && x2 >= 2 * i128::from(s.x.min(e.x))
            && x2 <= 2 * i128::from(s.x.max(e.x))
            && y2 >= 2 * i128::from(s.y.min(e.y))
            && y2 <= 2 * i128::from(s.y.max(e.y))
    }

    /// Signed crossing contribution of the directed edge `s → e` to the
    /// winding number around this position.
    ///
    /// Upward edges passing to the right count `+1`, downward edges passing
    /// to the right count `-1`, so counter-clockwise rings wind positively.
    #[must_use]
    pub fn crossing(&self, s: Point, e: Point) -> i64 {
        let y2 = self.doubled_y();
        let sy = 2 * i128::from(s.y);
        let ey = 2 * i128::from(e.y);
        if sy <= y2 {
            if ey > y2 && self.side_of(s, e) > 0 {
                return 1;
            }
        } else if ey <= y2 && self.side_of(s, e) < 0 {
            return -1;
        }
        0
    }
}

/// Winding number of `q` with respect to the closed ring `points`.
///
/// Returns `None` if `q` lies on the ring's boundary.
#[must_use]
pub fn winding_number(q: Probe, points: &[Point]) -> Option<i64> {
    let n = points.len();
    if n == 0 {
        return Some(0);
    }
    let mut winding = 0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        if q.is_on_segment(a, b) {
            return None;
        }
        winding += q.crossing(a, b);
    }
    Some(winding)
}

/// Removes consecutive duplicate vertices, including a closing duplicate
/// of the first vertex on closed rings.
#[must_use]
pub fn dedup_consecutive(points: &[Point], closed: bool) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if out.last() != Some(&p) {
            out.push(p);
        }
    }
    if closed {
        while out.len() > 1 && out.first() == out.last() {
            out.pop();
        }
    }
    out
}
