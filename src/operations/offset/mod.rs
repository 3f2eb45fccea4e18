mod join;
mod style;

pub use style::{EndType, JoinType};

use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::{Path, Paths, Point};
use crate::math::polygon_2d::{dedup_consecutive, signed_area};
use crate::math::Vector2;
use crate::operations::boolean::{ClipType, Clipper, FillRule};

use join::Offsetter;

/// Offsets smaller than this return the input unchanged.
const MIN_DELTA: f64 = 0.5;

/// Miter limit used when `0` is passed.
pub const DEFAULT_MITER_LIMIT: f64 = 2.0;

/// Offsets a path set by `delta`.
///
/// With [`EndType::Polygon`], positive deltas grow the filled region and
/// negative ones shrink it. Other end types treat the paths as lines and use
/// `|delta|`. The `closed` flag of the input paths is ignored in favour of
/// the end type.
///
/// Each path is offset vertex by vertex along its edge normals, with corners
/// shaped by the [`JoinType`]. The raw rings overlap themselves wherever the
/// offset folds back, and a Boolean union over all of them removes the loops.
///
/// ```
/// use polyclip2d::{EndType, Inflate, JoinType, Path, Paths};
///
/// let square = Paths::from(Path::rectangle(0, 0, 10, 10));
/// let grown = Inflate::new(square, 2.0)
///     .with_join_type(JoinType::Miter)
///     .execute()
///     .unwrap();
/// assert_eq!(grown.signed_area(), 196.0);
/// ```
#[derive(Debug, Clone)]
pub struct Inflate {
    paths: Paths,
    delta: f64,
    join_type: JoinType,
    end_type: EndType,
    miter_limit: f64,
    arc_tolerance: f64,
}

impl Inflate {
    /// Creates an offset of `paths` by `delta` with square joins, polygon
    /// ends, the default miter limit and the default arc tolerance.
    #[must_use]
    pub fn new(paths: Paths, delta: f64) -> Self {
        Self {
            paths,
            delta,
            join_type: JoinType::default(),
            end_type: EndType::default(),
            miter_limit: DEFAULT_MITER_LIMIT,
            arc_tolerance: 0.0,
        }
    }

    /// Sets the corner style.
    #[must_use]
    pub fn with_join_type(mut self, join_type: JoinType) -> Self {
        self.join_type = join_type;
        self
    }

    /// Sets how paths are closed off.
    #[must_use]
    pub fn with_end_type(mut self, end_type: EndType) -> Self {
        self.end_type = end_type;
        self
    }

    /// Sets the maximum miter length as a multiple of `|delta|`. `0` selects
    /// [`DEFAULT_MITER_LIMIT`].
    #[must_use]
    pub fn with_miter_limit(mut self, miter_limit: f64) -> Self {
        self.miter_limit = miter_limit;
        self
    }

    /// Sets the maximum distance between a round join's chords and the true
    /// arc. `0` derives a tolerance from `delta`.
    #[must_use]
    pub fn with_arc_tolerance(mut self, arc_tolerance: f64) -> Self {
        self.arc_tolerance = arc_tolerance;
        self
    }

    /// Executes the offset.
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidInput` if `delta` is not finite, the miter
    ///   limit is below 1 (other than 0), or the arc tolerance is negative
    /// - `GeometryError::CoordinateOutOfRange` for out-of-range input
    /// - `GeometryError::NumericOverflow` if an offset vertex leaves the
    ///   supported range
    pub fn execute(&self) -> Result<Paths> {
        self.validate()?;
        self.paths.validate()?;
        if self.delta.abs() < MIN_DELTA {
            return Ok(self.paths.clone());
        }

        let (rings, fill_rule) = if self.end_type.is_open() {
            (self.open_rings(), FillRule::Positive)
        } else if self.end_type == EndType::Joined {
            (self.joined_rings(), FillRule::Positive)
        } else {
            self.polygon_rings()
        };
        let raw = rings
            .into_iter()
            .map(|ring| to_path(&ring))
            .collect::<Result<Paths>>()?;
        debug!(
            delta = self.delta,
            join_type = ?self.join_type,
            end_type = ?self.end_type,
            raw_rings = raw.len(),
            "offset rings built"
        );
        Clipper::new()
            .with_subject(&raw)
            .execute(ClipType::Union, fill_rule)
    }

    fn validate(&self) -> Result<()> {
        if !self.delta.is_finite() {
            return Err(OperationError::InvalidInput(format!(
                "offset delta must be finite, got {}",
                self.delta
            ))
            .into());
        }
        if !self.miter_limit.is_finite() || (self.miter_limit != 0.0 && self.miter_limit < 1.0) {
            return Err(OperationError::InvalidInput(format!(
                "miter limit must be 0 or at least 1, got {}",
                self.miter_limit
            ))
            .into());
        }
        if !self.arc_tolerance.is_finite() || self.arc_tolerance < 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "arc tolerance must be non-negative, got {}",
                self.arc_tolerance
            ))
            .into());
        }
        Ok(())
    }

    fn offsetter(&self, delta: f64) -> Offsetter {
        let miter_limit = if self.miter_limit == 0.0 {
            DEFAULT_MITER_LIMIT
        } else {
            self.miter_limit
        };
        Offsetter::new(self.join_type, delta, miter_limit, self.arc_tolerance)
    }

    fn round_points(&self) -> bool {
        self.join_type == JoinType::Round || self.end_type == EndType::Round
    }

    /// Closed polygons. If the ring holding the lowest vertex is clockwise,
    /// the whole set is treated as reversed.
    fn polygon_rings(&self) -> (Vec<Vec<Vector2>>, FillRule) {
        let rings: Vec<Vec<Point>> = self
            .paths
            .iter()
            .map(|p| dedup_consecutive(&p.points, true))
            .collect();
        let reversed = rings
            .iter()
            .filter(|r| r.len() >= 3)
            .filter_map(|r| r.iter().min().map(|lowest| (*lowest, r)))
            .min_by_key(|(lowest, _)| *lowest)
            .is_some_and(|(_, r)| signed_area(r) < 0.0);
        let (delta, fill_rule) = if reversed {
            (-self.delta, FillRule::Negative)
        } else {
            (self.delta, FillRule::Positive)
        };

        let offsetter = self.offsetter(delta);
        let mut out = Vec::with_capacity(rings.len());
        for ring in &rings {
            match ring.len() {
                0 | 2 => {}
                1 => {
                    if self.delta > 0.0 {
                        let mut shape = offsetter.point(ring[0], self.round_points());
                        if reversed {
                            shape.reverse();
                        }
                        out.push(shape);
                    }
                }
                _ => out.push(offsetter.polygon(ring)),
            }
        }
        (out, fill_rule)
    }

    /// Each path closed and offset on both sides.
    fn joined_rings(&self) -> Vec<Vec<Vector2>> {
        let offsetter = self.offsetter(self.delta.abs());
        let mut out = Vec::new();
        for path in &self.paths {
            let ring = dedup_consecutive(&path.points, true);
            match ring.len() {
                0 => {}
                1 => out.push(offsetter.point(ring[0], self.round_points())),
                _ => {
                    out.push(offsetter.polygon(&ring));
                    let back: Vec<Point> = ring.iter().rev().copied().collect();
                    out.push(offsetter.polygon(&back));
                }
            }
        }
        out
    }

    /// Each path offset as a capped line.
    fn open_rings(&self) -> Vec<Vec<Vector2>> {
        let offsetter = self.offsetter(self.delta.abs());
        let mut out = Vec::new();
        for path in &self.paths {
            let line = dedup_consecutive(&path.points, false);
            match line.len() {
                0 => {}
                1 => out.push(offsetter.point(line[0], self.round_points())),
                _ => out.push(offsetter.open(&line, self.end_type)),
            }
        }
        out
    }
}

fn to_path(ring: &[Vector2]) -> Result<Path> {
    let points = ring
        .iter()
        .map(|v| Point::from_f64(v.x, v.y))
        .collect::<Result<Vec<_>>>()?;
    Ok(Path::new(dedup_consecutive(&points, true), true))
}

/// Offsets `paths` by `delta`; see [`Inflate`].
///
/// # Errors
///
/// Same as [`Inflate::execute`].
pub fn inflate(
    paths: &Paths,
    delta: f64,
    join_type: JoinType,
    end_type: EndType,
    miter_limit: f64,
    arc_tolerance: f64,
) -> Result<Paths> {
    Inflate::new(paths.clone(), delta)
        .with_join_type(join_type)
        .with_end_type(end_type)
        .with_miter_limit(miter_limit)
        .with_arc_tolerance(arc_tolerance)
        .execute()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::MAX_COORD;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn unit_square() -> Paths {
        Paths::from(vec![(0, 0), (1, 0), (1, 1), (0, 1)])
    }

    fn offset(paths: &Paths, delta: f64, join: JoinType, end: EndType) -> Paths {
        inflate(paths, delta, join, end, 0.0, 0.0).unwrap()
    }

    #[test]
    fn miter_unit_square() {
        let out = offset(&unit_square(), 1.0, JoinType::Miter, EndType::Polygon);
        assert_eq!(out, Paths::from(vec![(-1, -1), (2, -1), (2, 2), (-1, 2)]));
        assert_relative_eq!(out.signed_area(), 9.0);
    }

    #[test]
    fn clockwise_input_grows_too() {
        let cw = Paths::from(Path::rectangle(0, 0, 10, 10).reversed());
        let out = offset(&cw, 2.0, JoinType::Miter, EndType::Polygon);
        assert_relative_eq!(out.signed_area(), 196.0);
    }

    #[test]
    fn shrink_and_collapse() {
        let rect = Paths::from(vec![(0, 0), (10, 0), (10, 8), (0, 8)]);
        let out = offset(&rect, -2.0, JoinType::Miter, EndType::Polygon);
        assert_eq!(out, Paths::from(vec![(2, 2), (8, 2), (8, 6), (2, 6)]));

        let small = Paths::from(vec![(0, 0), (5, 0), (5, 6), (0, 6)]);
        assert!(offset(&small, -3.0, JoinType::Round, EndType::Polygon).is_empty());
    }

    #[test]
    fn round_trip_recovers_area() {
        let rect = Paths::from(Path::rectangle(0, 0, 40, 30));
        for join in [JoinType::Miter, JoinType::Square, JoinType::Round] {
            let grown = offset(&rect, 5.0, join, EndType::Polygon);
            let back = offset(&grown, -5.0, join, EndType::Polygon);
            assert_relative_eq!(back.signed_area(), 1200.0, max_relative = 0.01);
        }
    }

    #[test]
    fn round_join_area_is_close_to_exact() {
        let rect = Paths::from(Path::rectangle(0, 0, 100, 100));
        let out = inflate(&rect, 10.0, JoinType::Round, EndType::Polygon, 0.0, 0.1).unwrap();
        let exact = 100.0 * 100.0 + 4.0 * 100.0 * 10.0 + PI * 100.0;
        assert_relative_eq!(out.signed_area(), exact, max_relative = 0.005);
    }

    #[test]
    fn hole_shrinks_when_region_grows() {
        let ring = Paths::new(vec![
            Path::rectangle(0, 0, 20, 20),
            Path::rectangle(5, 5, 10, 10).reversed(),
        ]);
        let out = offset(&ring, 1.0, JoinType::Miter, EndType::Polygon);
        assert_relative_eq!(out.signed_area(), 22.0 * 22.0 - 8.0 * 8.0);
    }

    #[test]
    fn open_line_with_caps() {
        let line = Paths::from(Path::open([(0, 0), (10, 0)]));
        let butt = offset(&line, 2.0, JoinType::Square, EndType::Butt);
        assert_relative_eq!(butt.signed_area(), 40.0);
        let square = offset(&line, -2.0, JoinType::Square, EndType::Square);
        assert_relative_eq!(square.signed_area(), 56.0);
        let round = offset(&line, 2.0, JoinType::Round, EndType::Round);
        assert!(round.signed_area() > 40.0 && round.signed_area() < 40.0 + PI * 4.0 + 1.0);
    }

    #[test]
    fn open_end_types_ignore_closed_flag() {
        // A closed square offset with open ends is treated as a polyline
        // through its listed vertices, not as a ring.
        let square = Paths::from(Path::rectangle(0, 0, 10, 10));
        for end in [EndType::Butt, EndType::Square, EndType::Round] {
            let out = offset(&square, 1.0, JoinType::Miter, end);
            let bounds = out.bounds();
            assert!(out.signed_area() > 0.0, "{end:?}");
            assert!(bounds.min.y <= -1 && bounds.max.y >= 11, "{end:?}");
            // The missing closing edge leaves the left side uncovered.
            assert!(out.iter().all(|p| p.is_point_inside(Point::new(0, 5))
                != crate::operations::query::PointInPolygonResult::IsInside));
        }
    }

    #[test]
    fn joined_path_makes_a_band() {
        let square = Paths::from(Path::rectangle(0, 0, 10, 10));
        let band = offset(&square, 1.0, JoinType::Miter, EndType::Joined);
        assert_eq!(band.len(), 2);
        assert_relative_eq!(band.signed_area(), 12.0 * 12.0 - 8.0 * 8.0);
    }

    #[test]
    fn single_points() {
        let dot = Paths::from(Path::open([(5, 5)]));
        let square = offset(&dot, 2.0, JoinType::Square, EndType::Butt);
        assert_eq!(square, Paths::from(vec![(3, 3), (7, 3), (7, 7), (3, 7)]));
        let circle = offset(&dot, 10.0, JoinType::Round, EndType::Round);
        assert!(circle.signed_area() > 0.9 * PI * 100.0);
    }

    #[test]
    fn tiny_delta_is_identity() {
        let paths = unit_square();
        assert_eq!(offset(&paths, 0.4, JoinType::Round, EndType::Polygon), paths);
    }

    #[test]
    fn parameter_validation() {
        let paths = unit_square();
        let bad = [
            Inflate::new(paths.clone(), f64::NAN),
            Inflate::new(paths.clone(), 1.0).with_miter_limit(0.5),
            Inflate::new(paths.clone(), 1.0).with_arc_tolerance(-1.0),
        ];
        for op in bad {
            assert!(op.execute().unwrap_err().is_invalid_input());
        }
    }

    #[test]
    fn overflow_is_reported() {
        let edge = Paths::from(Path::rectangle(MAX_COORD - 10, 0, 10, 10));
        let err = inflate(&edge, 100.0, JoinType::Miter, EndType::Polygon, 0.0, 0.0).unwrap_err();
        assert!(err.is_numeric_overflow());
    }

    #[test]
    fn empty_input() {
        assert!(offset(&Paths::default(), 5.0, JoinType::Round, EndType::Polygon).is_empty());
    }
}
