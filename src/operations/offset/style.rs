use crate::error::{ClipError, OperationError};

/// How convex corners are filled when offsetting. Concave corners always
/// get the vertex inserted between the two offset points.
///
/// * `Square`: corner cut off at distance `|delta|` from the vertex
/// * `Bevel`: straight cut between the two offset edge ends
/// * `Round`: arc approximated within the arc tolerance
/// * `Miter`: edges extended to meet, falling back to a bevel past the
///   miter limit
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    #[default]
    Square,
    Bevel,
    Round,
    Miter,
}

impl TryFrom<i64> for JoinType {
    type Error = ClipError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Square),
            1 => Ok(Self::Bevel),
            2 => Ok(Self::Round),
            3 => Ok(Self::Miter),
            _ => Err(OperationError::UnsupportedParameter {
                parameter: "join_type",
                value,
            }
            .into()),
        }
    }
}

/// How paths are closed off when offsetting.
///
/// * `Polygon`: the path is a closed polygon and offset on one side
/// * `Joined`: the path is closed and offset on both sides as a band
/// * `Butt`: open path with squared ends flush with the end points
/// * `Square`: open path with ends extended by `|delta|`
/// * `Round`: open path with semicircular ends
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndType {
    #[default]
    Polygon,
    Joined,
    Butt,
    Square,
    Round,
}

impl EndType {
    /// Returns true for end types that treat the path as open.
    #[must_use]
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Polygon | Self::Joined)
    }
}

impl TryFrom<i64> for EndType {
    type Error = ClipError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Polygon),
            1 => Ok(Self::Joined),
            2 => Ok(Self::Butt),
            3 => Ok(Self::Square),
            4 => Ok(Self::Round),
            _ => Err(OperationError::UnsupportedParameter {
                parameter: "end_type",
                value,
            }
            .into()),
        }
    }
}
