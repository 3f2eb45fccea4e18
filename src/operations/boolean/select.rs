use std::ops::Add;

use crate::error::{ClipError, OperationError};

/// Policy mapping a winding count to inside/outside.
///
/// * Even-Odd: odd counts are filled
/// * Non-Zero: non-zero counts are filled
/// * Positive: counts > 0 are filled
/// * Negative: counts < 0 are filled
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillRule {
    #[default]
    EvenOdd,
    NonZero,
    Positive,
    Negative,
}

impl FillRule {
    /// Returns true if a region with this winding count is filled.
    #[must_use]
    pub fn is_filled(self, winding: i64) -> bool {
        match self {
            Self::EvenOdd => winding % 2 != 0,
            Self::NonZero => winding != 0,
            Self::Positive => winding > 0,
            Self::Negative => winding < 0,
        }
    }
}

impl TryFrom<i64> for FillRule {
    type Error = ClipError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::EvenOdd),
            1 => Ok(Self::NonZero),
            2 => Ok(Self::Positive),
            3 => Ok(Self::Negative),
            _ => Err(OperationError::UnsupportedParameter {
                parameter: "fill_rule",
                value,
            }
            .into()),
        }
    }
}

/// The Boolean operator combining subject and clip regions.
///
/// Only `Difference` is non-commutative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipType {
    Union,
    Intersection,
    Difference,
    Xor,
}

impl ClipType {
    /// Combines per-role inside states into the result's inside state.
    ///
    /// | subject | clip | Union | Intersection | Difference | Xor |
    /// |---------|------|-------|--------------|------------|-----|
    /// | out     | out  | out   | out          | out        | out |
    /// | in      | out  | in    | out          | in         | in  |
    /// | out     | in   | in    | out          | out        | in  |
    /// | in      | in   | in    | in           | out        | out |
    #[must_use]
    pub fn is_inside(self, in_subject: bool, in_clip: bool) -> bool {
        match self {
            Self::Union => in_subject || in_clip,
            Self::Intersection => in_subject && in_clip,
            Self::Difference => in_subject && !in_clip,
            Self::Xor => in_subject != in_clip,
        }
    }

    /// Returns true if a piece of an open subject path survives, given
    /// whether it lies inside the closed subject and clip regions.
    #[must_use]
    pub fn keeps_open(self, in_subject: bool, in_clip: bool) -> bool {
        match self {
            Self::Intersection => in_clip,
            Self::Union => !in_subject && !in_clip,
            Self::Difference | Self::Xor => !in_clip,
        }
    }
}

impl TryFrom<i64> for ClipType {
    type Error = ClipError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Union),
            1 => Ok(Self::Intersection),
            2 => Ok(Self::Difference),
            3 => Ok(Self::Xor),
            _ => Err(OperationError::UnsupportedParameter {
                parameter: "clip_type",
                value,
            }
            .into()),
        }
    }
}

/// Winding counts per input role.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Winding {
    pub subject: i64,
    pub clip: i64,
}

impl Winding {
    /// Zero winding in both roles.
    pub const ZERO: Self = Self {
        subject: 0,
        clip: 0,
    };

    /// Creates a winding pair.
    #[must_use]
    pub const fn new(subject: i64, clip: i64) -> Self {
        Self { subject, clip }
    }

    /// Returns the winding with both counts negated.
    #[must_use]
    pub fn negated(self) -> Self {
        Self::new(-self.subject, -self.clip)
    }

    /// Returns true if both counts are zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// Per-role filled states under `fill_rule`.
    #[must_use]
    pub fn filled(self, fill_rule: FillRule) -> (bool, bool) {
        (
            fill_rule.is_filled(self.subject),
            fill_rule.is_filled(self.clip),
        )
    }

    /// Returns true if a region with these counts belongs to the result.
    #[must_use]
    pub fn is_inside(self, fill_rule: FillRule, clip_type: ClipType) -> bool {
        let (in_subject, in_clip) = self.filled(fill_rule);
        clip_type.is_inside(in_subject, in_clip)
    }
}

impl Add for Winding {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.subject.saturating_add(rhs.subject),
            self.clip.saturating_add(rhs.clip),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn fill_rule_table() {
        let counts = [-2, -1, 0, 1, 2, 3];
        let table = [
            (FillRule::EvenOdd, [false, true, false, true, false, true]),
            (FillRule::NonZero, [true, true, false, true, true, true]),
            (FillRule::Positive, [false, false, false, true, true, true]),
            (FillRule::Negative, [true, true, false, false, false, false]),
        ];
        for (rule, expected) in table {
            for (count, want) in counts.iter().zip(expected) {
                assert_eq!(rule.is_filled(*count), want, "{rule:?} at {count}");
            }
        }
    }

    #[test]
    fn clip_type_table() {
        let cases = [(false, false), (true, false), (false, true), (true, true)];
        let table = [
            (ClipType::Union, [false, true, true, true]),
            (ClipType::Intersection, [false, false, false, true]),
            (ClipType::Difference, [false, true, false, false]),
            (ClipType::Xor, [false, true, true, false]),
        ];
        for (op, expected) in table {
            for ((s, c), want) in cases.iter().zip(expected) {
                assert_eq!(op.is_inside(*s, *c), want, "{op:?} at ({s}, {c})");
            }
        }
    }

    #[test]
    fn counts_and_rules_combine() {
        // Two overlapping subject layers, clip absent.
        let w = Winding::new(2, 0);
        assert!(!w.is_inside(FillRule::EvenOdd, ClipType::Union));
        assert!(w.is_inside(FillRule::NonZero, ClipType::Union));
        assert!(!w.is_inside(FillRule::NonZero, ClipType::Intersection));

        let w = Winding::new(-1, 1);
        assert!(w.is_inside(FillRule::Negative, ClipType::Difference));
        assert!(w.is_inside(FillRule::Positive, ClipType::Xor));
        assert!(!w.is_inside(FillRule::NonZero, ClipType::Xor));
    }

    #[test]
    fn open_piece_selection() {
        assert!(ClipType::Intersection.keeps_open(false, true));
        assert!(!ClipType::Union.keeps_open(true, false));
        assert!(ClipType::Union.keeps_open(false, false));
        assert!(ClipType::Difference.keeps_open(true, false));
        assert!(!ClipType::Xor.keeps_open(false, true));
    }

    #[test]
    fn unknown_enum_values_are_rejected() {
        assert_eq!(FillRule::try_from(1).unwrap(), FillRule::NonZero);
        assert!(FillRule::try_from(4).unwrap_err().is_unsupported_parameter());
        assert_eq!(ClipType::try_from(3).unwrap(), ClipType::Xor);
        assert!(ClipType::try_from(-1).unwrap_err().is_unsupported_parameter());
    }

    #[test]
    fn winding_arithmetic() {
        let w = Winding::new(1, -2) + Winding::new(2, 2);
        assert_eq!(w, Winding::new(3, 0));
        assert_eq!(w.negated(), Winding::new(-3, 0));
        assert!(Winding::ZERO.is_zero());
    }
}
