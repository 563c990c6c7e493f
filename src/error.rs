//! Shape descriptions and the error type shared by all fallible operations.

use std::error::Error as StdError;
use std::fmt;

/// The row and column extents of a matrix.
///
/// For [`DynMatrix`][crate::DynMatrix] these are run-time values; for
/// [`Matrix`][crate::Matrix] they mirror the const generic parameters. A
/// `Shape` is only ever replaced wholesale, never partially updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of elements held by a matrix of this shape.
    pub fn size(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.rows, self.cols)
    }
}

/// Errors reported by fallible matrix operations.
///
/// Every variant is a hard contract violation: there is no retry, recovery, or
/// partial application. Operator impls (`+`, `-`, `*`, `==`, ...) panic with
/// the same messages, since `std::ops` leaves no room for a `Result`; callers
/// that want to validate shapes ahead of time use the fallible methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Two operands' shapes are incompatible for the attempted operation.
    DimensionMismatch { lhs: Shape, rhs: Shape },
    /// An in-place multiplication was attempted on a rectangular operand.
    NotSquare { shape: Shape },
    /// A checked element access was outside the matrix extents.
    OutOfBounds {
        row: usize,
        col: usize,
        shape: Shape,
    },
    /// A row-major flat list had the wrong number of elements for the shape.
    LengthMismatch { shape: Shape, len: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DimensionMismatch { lhs, rhs } => {
                write!(f, "shape {lhs} does not match shape {rhs}")
            }
            Error::NotSquare { shape } => {
                write!(f, "matrix of shape {shape} is not square")
            }
            Error::OutOfBounds { row, col, shape } => {
                write!(f, "position ({row}, {col}) is out of bounds for shape {shape}")
            }
            Error::LengthMismatch { shape, len } => {
                write!(
                    f,
                    "expected {} elements for shape {shape}, got {len}",
                    shape.size()
                )
            }
        }
    }
}

impl StdError for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = Error::DimensionMismatch {
            lhs: Shape::new(3, 3),
            rhs: Shape::new(2, 4),
        };
        assert_eq!(err.to_string(), "shape (3, 3) does not match shape (2, 4)");

        let err = Error::NotSquare {
            shape: Shape::new(2, 3),
        };
        assert_eq!(err.to_string(), "matrix of shape (2, 3) is not square");

        let err = Error::OutOfBounds {
            row: 3,
            col: 0,
            shape: Shape::new(3, 3),
        };
        assert_eq!(
            err.to_string(),
            "position (3, 0) is out of bounds for shape (3, 3)"
        );

        let err = Error::LengthMismatch {
            shape: Shape::new(2, 2),
            len: 3,
        };
        assert_eq!(err.to_string(), "expected 4 elements for shape (2, 2), got 3");
    }

    #[test]
    fn shape() {
        let shape = Shape::new(3, 5);
        assert_eq!(shape.size(), 15);
        assert!(!shape.is_square());
        assert!(Shape::new(4, 4).is_square());
        assert_eq!(shape.to_string(), "(3, 5)");
    }
}
