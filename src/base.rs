//! The element-access contract shared by every matrix type, and the derived
//! arithmetic behavior built on top of it.

use std::fmt;
use std::marker::PhantomData;

use itertools::iproduct;

use crate::error::{Error, Shape};
use crate::traits::Number;

/// The minimal contract a matrix type implements to take part in generic
/// arithmetic.
///
/// Implementors supply the two stored extents (`rows`, `cols`) and plain
/// position access (`elem`, `elem_mut`); everything else — `size`, checked
/// access, the evaluation protocol (`eval_to`/`add_to`/`sub_to`/`scale`), and
/// shape-checked equality — is derived. A type that forgets one of the
/// required methods does not compile, so a half-implemented matrix can never
/// be instantiated.
///
/// `size` is always `rows * cols`; it is a derived method rather than a third
/// required one so that no implementor can introduce mutually-recursive
/// defaults between the three accessors.
///
/// All storage is row-major: element `(row, col)` lives at flat offset
/// `row * cols + col`.
pub trait MatrixLike<T> {
    /// Number of rows.
    fn rows(&self) -> usize;

    /// Number of columns.
    fn cols(&self) -> usize;

    /// Borrows the element at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the matrix, like slice indexing.
    /// Use [`at`][Self::at] for an error-carrying check or
    /// [`get`][crate::DynMatrix::get] on the concrete types for an `Option`.
    fn elem(&self, row: usize, col: usize) -> &T;

    /// Mutably borrows the element at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the matrix.
    fn elem_mut(&mut self, row: usize, col: usize) -> &mut T;

    /// Total number of elements (`rows * cols`).
    fn size(&self) -> usize {
        self.rows() * self.cols()
    }

    /// The `(rows, cols)` extent pair.
    fn shape(&self) -> Shape {
        Shape::new(self.rows(), self.cols())
    }

    fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Checked element access.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gyoretsu::*;
    /// let m = DynMatrix::from_rows(&[[1, 2], [3, 4]]);
    /// assert_eq!(m.at(1, 0), Ok(&3));
    /// assert!(m.at(2, 0).is_err());
    /// assert!(m.at(0, 2).is_err());
    /// ```
    fn at(&self, row: usize, col: usize) -> Result<&T, Error> {
        if row < self.rows() && col < self.cols() {
            Ok(self.elem(row, col))
        } else {
            Err(Error::OutOfBounds {
                row,
                col,
                shape: self.shape(),
            })
        }
    }

    /// Checked mutable element access.
    fn at_mut(&mut self, row: usize, col: usize) -> Result<&mut T, Error> {
        if row < self.rows() && col < self.cols() {
            Ok(self.elem_mut(row, col))
        } else {
            Err(Error::OutOfBounds {
                row,
                col,
                shape: self.shape(),
            })
        }
    }

    /// Copies every element of `self` into `dst`, which must have the same
    /// shape.
    ///
    /// This is the assignment primitive: copying between different matrix
    /// kinds (fixed ↔ dynamic) goes through it, one element at a time, so
    /// element types with non-trivial `Clone` semantics behave correctly.
    fn eval_to<M>(&self, dst: &mut M) -> Result<(), Error>
    where
        M: MatrixLike<T> + ?Sized,
        T: Clone,
        Self: Sized,
    {
        combine(self, dst, |d, s| *d = s.clone())
    }

    /// Adds every element of `self` onto `dst` (`dst[i] += self[i]`).
    fn add_to<M>(&self, dst: &mut M) -> Result<(), Error>
    where
        M: MatrixLike<T> + ?Sized,
        T: Number,
        Self: Sized,
    {
        combine(self, dst, |d, s| *d = *d + *s)
    }

    /// Subtracts every element of `self` from `dst` (`dst[i] -= self[i]`).
    fn sub_to<M>(&self, dst: &mut M) -> Result<(), Error>
    where
        M: MatrixLike<T> + ?Sized,
        T: Number,
        Self: Sized,
    {
        combine(self, dst, |d, s| *d = *d - *s)
    }

    /// Multiplies every element by `scalar`, in place.
    fn scale(&mut self, scalar: T)
    where
        T: Number,
    {
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let elem = self.elem_mut(row, col);
                *elem = *elem * scalar;
            }
        }
    }

    /// Element-wise equality between two matrices of any kind.
    ///
    /// Comparing matrices of different shapes is a usage error, not a valid
    /// negative comparison, and reports [`Error::DimensionMismatch`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use gyoretsu::*;
    /// let a = DynMatrix::from_rows(&[[1, 2], [3, 4]]);
    /// let b = Matrix::from_rows([[1, 2], [3, 4]]);
    /// assert_eq!(a.try_eq(&b), Ok(true));
    ///
    /// let c = DynMatrix::<i32>::zeros(3, 3);
    /// assert!(a.try_eq(&c).is_err());
    /// ```
    fn try_eq<M>(&self, other: &M) -> Result<bool, Error>
    where
        M: MatrixLike<T> + ?Sized,
        T: PartialEq,
        Self: Sized,
    {
        check_same_shape(self, other)?;
        for (row, col) in iproduct!(0..self.rows(), 0..self.cols()) {
            if self.elem(row, col) != other.elem(row, col) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Reports [`Error::DimensionMismatch`] unless `a` and `b` have identical
/// extents.
pub fn check_same_shape<T, A, B>(a: &A, b: &B) -> Result<(), Error>
where
    A: MatrixLike<T> + ?Sized,
    B: MatrixLike<T> + ?Sized,
{
    if a.rows() == b.rows() && a.cols() == b.cols() {
        Ok(())
    } else {
        Err(Error::DimensionMismatch {
            lhs: a.shape(),
            rhs: b.shape(),
        })
    }
}

// `eval_to`/`add_to`/`sub_to` differ only in the per-element combining step,
// so all three funnel through this helper.
fn combine<T, S, D, F>(src: &S, dst: &mut D, mut f: F) -> Result<(), Error>
where
    S: MatrixLike<T> + ?Sized,
    D: MatrixLike<T> + ?Sized,
    F: FnMut(&mut T, &T),
{
    check_same_shape(src, dst)?;
    for row in 0..src.rows() {
        for col in 0..src.cols() {
            f(dst.elem_mut(row, col), src.elem(row, col));
        }
    }
    Ok(())
}

struct DebugRow<'a, T, M: ?Sized>(&'a M, usize, PhantomData<fn() -> T>);

impl<'a, T: fmt::Debug, M: MatrixLike<T> + ?Sized> fmt::Debug for DebugRow<'a, T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for col in 0..self.0.cols() {
            if col != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", self.0.elem(self.1, col))?;
        }
        write!(f, "]")?;
        Ok(())
    }
}

/// Nested-list `Debug` rendering shared by both matrix types. Rows print in
/// natural (row-wise) writing order.
pub(crate) fn fmt_list<T, M>(mat: &M, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    T: fmt::Debug,
    M: MatrixLike<T> + ?Sized,
{
    let mut list = f.debug_list();
    for row in 0..mat.rows() {
        list.entry(&DebugRow(mat, row, PhantomData));
    }
    list.finish()
}

/// Diagnostic `Display` rendering: space-separated values, one row per line.
/// Not a stable wire format.
pub(crate) fn fmt_rows<T, M>(mat: &M, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    T: fmt::Display,
    M: MatrixLike<T> + ?Sized,
{
    for row in 0..mat.rows() {
        for col in 0..mat.cols() {
            if col != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", mat.elem(row, col))?;
        }
        f.write_str("\n")?;
    }
    Ok(())
}
