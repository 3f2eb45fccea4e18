use crate::geometry::{Path, Paths, Point};
use crate::math::distance_2d::perpendicular_distance_sq;
use crate::math::polygon_2d::{dedup_consecutive, signed_area};

/// Removes vertices that deviate less than `epsilon` from the line through
/// their neighbours.
///
/// Every path in `paths` is treated as open when `is_open` is set and as
/// closed otherwise. The vertex with the smallest deviation goes first and
/// deviations are re-measured after each removal. Open paths keep their end
/// points. Closed paths that collapse below 3 vertices or to zero area are
/// dropped. A non-positive or non-finite `epsilon` only removes duplicate
/// vertices.
#[must_use]
pub fn simplify(paths: &Paths, epsilon: f64, is_open: bool) -> Paths {
    let eps_sq = if epsilon.is_finite() && epsilon > 0.0 {
        epsilon * epsilon
    } else {
        0.0
    };
    paths
        .iter()
        .filter_map(|path| simplify_points(&path.points, eps_sq, !is_open))
        .map(|points| Path::new(points, !is_open))
        .collect()
}

/// Simplifies one vertex list, returning `None` for a closed ring that
/// collapses.
pub(crate) fn simplify_points(points: &[Point], eps_sq: f64, closed: bool) -> Option<Vec<Point>> {
    let mut pts = dedup_consecutive(points, closed);
    loop {
        let n = pts.len();
        let removable = if closed { 0..n } else { 1..n.saturating_sub(1) };
        if closed && n < 3 {
            break;
        }
        let best = removable
            .map(|i| {
                let prev = pts[(i + n - 1) % n];
                let next = pts[(i + 1) % n];
                (perpendicular_distance_sq(pts[i], prev, next), i)
            })
            .filter(|(d, _)| *d < eps_sq)
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        match best {
            Some((_, i)) => {
                pts.remove(i);
            }
            None => break,
        }
    }
    if closed && (pts.len() < 3 || signed_area(&pts) == 0.0) {
        return None;
    }
    Some(pts)
}
