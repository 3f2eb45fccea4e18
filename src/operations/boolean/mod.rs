mod assemble;
mod engine;
mod open;
mod select;
mod sweep;
mod winding;

pub use engine::Clipper;
pub use select::{ClipType, FillRule};

use crate::error::Result;
use crate::geometry::Paths;

/// Union of all paths in `subject`.
///
/// ```
/// use polyclip2d::{union, FillRule, Paths};
///
/// let mut both = Paths::from(vec![(0, 0), (10, 0), (10, 10), (0, 10)]);
/// both.extend(Paths::from(vec![(5, 5), (15, 5), (15, 15), (5, 15)]));
/// let merged = union(&both, FillRule::NonZero)?;
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged.signed_area(), 175.0);
/// # Ok::<(), polyclip2d::ClipError>(())
/// ```
///
/// # Errors
///
/// Returns an error if a coordinate lies outside the supported range.
pub fn union(subject: &Paths, fill_rule: FillRule) -> Result<Paths> {
    Clipper::new()
        .with_subject(subject)
        .execute(ClipType::Union, fill_rule)
}

/// Region covered by both `subject` and `clip`.
///
/// # Errors
///
/// Returns an error if a clip path is open or a coordinate lies outside the
/// supported range.
pub fn intersect(subject: &Paths, clip: &Paths, fill_rule: FillRule) -> Result<Paths> {
    boolean(ClipType::Intersection, subject, clip, fill_rule)
}

/// Region covered by `subject` but not by `clip`.
///
/// # Errors
///
/// Same as [`intersect`].
pub fn difference(subject: &Paths, clip: &Paths, fill_rule: FillRule) -> Result<Paths> {
    boolean(ClipType::Difference, subject, clip, fill_rule)
}

/// Region covered by exactly one of `subject` and `clip`.
///
/// # Errors
///
/// Same as [`intersect`].
pub fn xor(subject: &Paths, clip: &Paths, fill_rule: FillRule) -> Result<Paths> {
    boolean(ClipType::Xor, subject, clip, fill_rule)
}

/// Runs `clip_type` over `subject` and `clip`.
///
/// # Errors
///
/// Same as [`intersect`].
pub fn boolean(
    clip_type: ClipType,
    subject: &Paths,
    clip: &Paths,
    fill_rule: FillRule,
) -> Result<Paths> {
    Clipper::new()
        .with_subject(subject)
        .with_clip(clip)
        .execute(clip_type, fill_rule)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Path;
    use approx::assert_relative_eq;

    fn squares() -> (Paths, Paths) {
        (
            Paths::from(vec![(0, 0), (10, 0), (10, 10), (0, 10)]),
            Paths::from(vec![(5, 5), (15, 5), (15, 15), (5, 15)]),
        )
    }

    #[test]
    fn union_of_overlapping_squares() {
        let (a, b) = squares();
        let mut both = a.clone();
        both.extend(b);
        let out = union(&both, FillRule::NonZero).unwrap();
        assert_eq!(out.len(), 1);
        let ring = out.get(0).unwrap();
        // Two corners of each square plus the two crossing points.
        assert_eq!(ring.len(), 8);
        assert_relative_eq!(ring.signed_area(), 175.0);
        assert_eq!(
            ring.points,
            Path::closed([
                (0, 0),
                (10, 0),
                (10, 5),
                (15, 5),
                (15, 15),
                (5, 15),
                (5, 10),
                (0, 10)
            ])
            .points
        );
    }

    #[test]
    fn free_functions_agree_with_clipper() {
        let (a, b) = squares();
        assert_relative_eq!(intersect(&a, &b, FillRule::NonZero).unwrap().signed_area(), 25.0);
        assert_relative_eq!(difference(&a, &b, FillRule::NonZero).unwrap().signed_area(), 75.0);
        assert_relative_eq!(difference(&b, &a, FillRule::NonZero).unwrap().signed_area(), 75.0);
        assert_relative_eq!(xor(&a, &b, FillRule::EvenOdd).unwrap().signed_area(), 150.0);
    }

    #[test]
    fn empty_inputs() {
        let empty = Paths::default();
        assert!(union(&empty, FillRule::NonZero).unwrap().is_empty());
        let (a, _) = squares();
        assert!(intersect(&a, &empty, FillRule::NonZero).unwrap().is_empty());
        assert_eq!(difference(&a, &empty, FillRule::NonZero).unwrap(), a);
    }

    #[test]
    fn two_vertex_closed_paths_are_dropped() {
        let sliver = Paths::from(vec![(0, 0), (10, 10)]);
        assert!(union(&sliver, FillRule::NonZero).unwrap().is_empty());
    }
}
