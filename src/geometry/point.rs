use crate::error::{GeometryError, Result};
use crate::math::MAX_COORD;

/// A point on the 64-bit integer plane.
///
/// Points order lexicographically by `(x, y)`, which is also the sweep order
/// used by the Boolean engine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Returns true if both coordinates lie within `±MAX_COORD`.
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        (-MAX_COORD..=MAX_COORD).contains(&self.x) && (-MAX_COORD..=MAX_COORD).contains(&self.y)
    }

    /// Checks that the point lies within the supported coordinate range.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::CoordinateOutOfRange` otherwise.
    pub fn validate(&self) -> Result<()> {
        if self.is_in_range() {
            Ok(())
        } else {
            Err(GeometryError::CoordinateOutOfRange {
                x: self.x,
                y: self.y,
                limit: MAX_COORD,
            }
            .into())
        }
    }

    /// Returns the point moved by `(dx, dy)`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NumericOverflow` if a coordinate overflows or
    /// the result leaves the supported range.
    pub fn translated(&self, dx: i64, dy: i64) -> Result<Self> {
        let overflow =
            || GeometryError::NumericOverflow(format!("translating {self:?} by ({dx}, {dy})"));
        let x = self.x.checked_add(dx).ok_or_else(overflow)?;
        let y = self.y.checked_add(dy).ok_or_else(overflow)?;
        let moved = Self::new(x, y);
        if !moved.is_in_range() {
            return Err(overflow().into());
        }
        Ok(moved)
    }

    /// Rounds a staged floating-point position back onto the integer grid.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NumericOverflow` if the value is not finite or
    /// falls outside the supported range.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_f64(x: f64, y: f64) -> Result<Self> {
        let (rx, ry) = (x.round(), y.round());
        // `as` saturates, so anything past the range fails the check below.
        let p = Self::new(rx as i64, ry as i64);
        if !rx.is_finite() || !ry.is_finite() || !p.is_in_range() {
            return Err(
                GeometryError::NumericOverflow(format!("position ({x}, {y}) out of range")).into(),
            );
        }
        Ok(p)
    }

    /// Returns the coordinates as `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> (f64, f64) {
        (self.x as f64, self.y as f64)
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[i64; 2]> for Point {
    fn from([x, y]: [i64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (i64, i64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn lexicographic_order() {
        assert!(Point::new(0, 5) < Point::new(1, 0));
        assert!(Point::new(1, 0) < Point::new(1, 2));
    }

    #[test]
    fn range_check() {
        assert!(Point::new(MAX_COORD, -MAX_COORD).validate().is_ok());
        let err = Point::new(i64::MAX, 0).validate().unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn translate_overflow_is_reported() {
        let p = Point::new(MAX_COORD, 0);
        assert!(p.translated(1, 0).unwrap_err().is_numeric_overflow());
        assert_eq!(p.translated(-1, 3).unwrap(), Point::new(MAX_COORD - 1, 3));
    }

    #[test]
    fn from_f64_rounds() {
        assert_eq!(Point::from_f64(1.4, -2.6).unwrap(), Point::new(1, -3));
        assert!(Point::from_f64(f64::NAN, 0.0).is_err());
        assert!(Point::from_f64(1e30, 0.0).is_err());
    }
}
