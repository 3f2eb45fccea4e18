use super::polygon_2d::{cross, dot};
use super::{Vector2, TOLERANCE};
use crate::geometry::Point;

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Vector2,
    d1: &Vector2,
    p2: &Vector2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let denom = d1.perp(d2);
    if denom.abs() < TOLERANCE {
        return None;
    }
    let delta = p2 - p1;
    let t = delta.perp(d2) / denom;
    let u = delta.perp(d1) / denom;
    Some((t, u))
}

/// Returns the point where segments `a0-a1` and `b0-b1` properly cross,
/// rounded to the integer grid.
///
/// "Properly" means each segment has its endpoints strictly on opposite
/// sides of the other. The crossing parameter is computed from exact
/// orientations and staged through `f64`; the rounded point is clamped to
/// the overlap of both bounding boxes. The pair is put in a canonical order
/// first, so swapping the arguments yields the same point.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn segment_crossing(a0: Point, a1: Point, b0: Point, b1: Point) -> Option<Point> {
    let (a0, a1) = if a0 <= a1 { (a0, a1) } else { (a1, a0) };
    let (b0, b1) = if b0 <= b1 { (b0, b1) } else { (b1, b0) };
    let ((a0, a1), (b0, b1)) = if (a0, a1) <= (b0, b1) {
        ((a0, a1), (b0, b1))
    } else {
        ((b0, b1), (a0, a1))
    };

    let d0 = cross(b0, b1, a0);
    let d1 = cross(b0, b1, a1);
    let e0 = cross(a0, a1, b0);
    let e1 = cross(a0, a1, b1);
    if d0.signum() * d1.signum() >= 0 || e0.signum() * e1.signum() >= 0 {
        return None;
    }

    let t = d0 as f64 / (d0 - d1) as f64;
    let (ax, ay) = a0.to_f64();
    let dx = (i128::from(a1.x) - i128::from(a0.x)) as f64;
    let dy = (i128::from(a1.y) - i128::from(a0.y)) as f64;
    let x = round_clamped(
        ax + t * dx,
        a0.x.min(a1.x).max(b0.x.min(b1.x)),
        a0.x.max(a1.x).min(b0.x.max(b1.x)),
    );
    let y = round_clamped(
        ay + t * dy,
        a0.y.min(a1.y).max(b0.y.min(b1.y)),
        a0.y.max(a1.y).min(b0.y.max(b1.y)),
    );
    Some(Point::new(x, y))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn round_clamped(value: f64, lo: i64, hi: i64) -> i64 {
    if value.is_nan() {
        return lo;
    }
    let rounded = value.round();
    if rounded <= lo as f64 {
        lo
    } else if rounded >= hi as f64 {
        hi
    } else {
        rounded as i64
    }
}

/// Returns true if `p` lies strictly inside segment `a-b` (on the segment,
/// but not at either endpoint).
#[must_use]
pub fn is_interior_point(p: Point, a: Point, b: Point) -> bool {
    if p == a || p == b || cross(a, b, p) != 0 {
        return false;
    }
    dot(a, b, p) > 0 && dot(b, a, p) > 0
}

/// Sorts split points along the direction `a → b`, dropping duplicates and
/// points that coincide with either endpoint.
#[must_use]
pub fn order_along(a: Point, b: Point, points: &[Point]) -> Vec<Point> {
    let mut ordered: Vec<Point> = points
        .iter()
        .copied()
        .filter(|&p| p != a && p != b)
        .collect();
    ordered.sort_by_key(|&p| dot(a, b, p));
    ordered.dedup();
    ordered
}
