use thiserror::Error;

/// Top-level error type for the clipping engine.
#[derive(Debug, Error)]
pub enum ClipError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to coordinates and numeric computations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("coordinate ({x}, {y}) is outside the supported range of +/-{limit}")]
    CoordinateOutOfRange { x: i64, y: i64, limit: i64 },

    #[error("numeric overflow: {0}")]
    NumericOverflow(String),
}

/// Errors related to operation inputs and parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unsupported value {value} for parameter {parameter}")]
    UnsupportedParameter { parameter: &'static str, value: i64 },

    #[error("point ({x}, {y}) is not a vertex of the path")]
    PointNotInPath { x: i64, y: i64 },
}

impl ClipError {
    /// Returns true if the error is an invalid-input condition, including
    /// out-of-range coordinates.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::Operation(
                OperationError::InvalidInput(_) | OperationError::PointNotInPath { .. }
            ) | Self::Geometry(GeometryError::CoordinateOutOfRange { .. })
        )
    }

    /// Returns true if the error reports a numeric overflow.
    #[must_use]
    pub fn is_numeric_overflow(&self) -> bool {
        matches!(self, Self::Geometry(GeometryError::NumericOverflow(_)))
    }

    /// Returns true if the error reports an unknown enum value.
    #[must_use]
    pub fn is_unsupported_parameter(&self) -> bool {
        matches!(
            self,
            Self::Operation(OperationError::UnsupportedParameter { .. })
        )
    }
}

/// Convenience type alias for results using [`ClipError`].
pub type Result<T> = std::result::Result<T, ClipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_classified() {
        let err: ClipError = OperationError::InvalidInput("x".to_owned()).into();
        assert!(err.is_invalid_input());
        assert!(!err.is_numeric_overflow());

        let err: ClipError = GeometryError::CoordinateOutOfRange {
            x: 1,
            y: 2,
            limit: 0,
        }
        .into();
        assert!(err.is_invalid_input());

        let err: ClipError = GeometryError::NumericOverflow("area".to_owned()).into();
        assert!(err.is_numeric_overflow());

        let err: ClipError = OperationError::UnsupportedParameter {
            parameter: "fill_rule",
            value: 9,
        }
        .into();
        assert!(err.is_unsupported_parameter());
        assert_eq!(
            err.to_string(),
            "unsupported value 9 for parameter fill_rule"
        );

        let err: ClipError = OperationError::PointNotInPath { x: 3, y: 4 }.into();
        assert!(err.is_invalid_input());
        assert_eq!(err.to_string(), "point (3, 4) is not a vertex of the path");
    }
}
