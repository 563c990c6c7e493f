use std::fmt;

use itertools::iproduct;

use crate::base::{self, MatrixLike};
use crate::error::{Error, Shape};
use crate::matrix::Matrix;
use crate::traits::{One, Zero};

mod ops;

/// A matrix whose extents are chosen at run time.
///
/// Unlike [`Matrix`], whose shape is part of its type, a `DynMatrix` stores
/// its extents as fields and backs its elements with a heap-allocated,
/// row-major buffer of exactly `rows * cols` elements. The extents are
/// private and only ever replaced together with the buffer, so the length
/// invariant holds at all times; "resizing" means constructing a new matrix.
///
/// # Construction
///
/// - [`DynMatrix::zeros`] is the plain `(rows, cols)` constructor. It
///   guarantees zero-filled contents.
/// - [`DynMatrix::from_vec`], [`DynMatrix::from_rows`], and
///   [`DynMatrix::from_fn`] build the element buffer in a single pass,
///   without first zero-filling it.
/// - [`DynMatrix::eye`], [`DynMatrix::ones`], and [`DynMatrix::splat`] mirror
///   the fixed-shape constants for run-time shapes.
/// - The [`Default`] impl creates an empty matrix of size 0.
/// - `Clone` deep-copies element by element (through `T::clone`, never a raw
///   byte copy), and moves simply transfer buffer ownership.
///
/// # Element Access
///
/// `(row, col)` tuples index with a bounds panic, flat `usize` offsets index
/// the row-major buffer directly, [`get`][Self::get] returns an [`Option`],
/// and [`at`][MatrixLike::at] reports an error carrying the full shape.
///
/// # Examples
///
/// ```
/// # use gyoretsu::*;
/// let mut m = DynMatrix::zeros(2, 3);
/// m[(0, 2)] = 5;
/// assert_eq!(m.size(), 6);
/// assert_eq!(m[2], 5);
/// ```
#[derive(Clone)]
pub struct DynMatrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// The empty matrix of size 0.
impl<T> Default for DynMatrix<T> {
    fn default() -> Self {
        Self {
            rows: 0,
            cols: 0,
            data: Vec::new(),
        }
    }
}

impl<T> DynMatrix<T> {
    /// Creates a matrix of the given shape with every element set to 0.
    ///
    /// This is the canonical `(rows, cols)` constructor; zero-filling is
    /// guaranteed.
    pub fn zeros(rows: usize, cols: usize) -> Self
    where
        T: Zero + Clone,
    {
        Self {
            rows,
            cols,
            data: vec![T::ZERO; rows * cols],
        }
    }

    /// Creates a matrix of the given shape with every element set to 1.
    pub fn ones(rows: usize, cols: usize) -> Self
    where
        T: One + Clone,
    {
        Self {
            rows,
            cols,
            data: vec![T::ONE; rows * cols],
        }
    }

    /// Creates a matrix with every element set to `elem`.
    pub fn splat(rows: usize, cols: usize, elem: T) -> Self
    where
        T: Clone,
    {
        Self {
            rows,
            cols,
            data: vec![elem; rows * cols],
        }
    }

    /// Creates an identity matrix: 1 at `(i, i)` for `i < min(rows, cols)`,
    /// 0 everywhere else. The shape does not have to be square.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gyoretsu::*;
    /// let eye = DynMatrix::<f64>::eye(3, 5);
    /// assert_eq!(eye.shape(), Shape::new(3, 5));
    /// assert_eq!(eye[(2, 2)], 1.0);
    /// assert_eq!(eye[(2, 3)], 0.0);
    /// ```
    pub fn eye(rows: usize, cols: usize) -> Self
    where
        T: Zero + One + Clone,
    {
        let mut mat = Self::zeros(rows, cols);
        for i in 0..rows.min(cols) {
            mat.data[i * cols + i] = T::ONE;
        }
        mat
    }

    /// Creates a matrix by invoking a closure with the position (row and
    /// column) of each element, visited in row-major order.
    ///
    /// The buffer is allocated once and filled in a single pass; elements are
    /// never default-constructed first.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(rows * cols);
        data.extend(iproduct!(0..rows, 0..cols).map(|(row, col)| f(row, col)));
        Self { rows, cols, data }
    }

    /// Creates a matrix from a row-major flat list of elements.
    ///
    /// The list length must match `rows * cols` exactly; the buffer is taken
    /// over as-is, so no element is copied or default-constructed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gyoretsu::*;
    /// let m = DynMatrix::from_vec(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(m[(1, 0)], 4);
    ///
    /// assert!(DynMatrix::from_vec(2, 3, vec![1, 2, 3]).is_err());
    /// ```
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, Error> {
        let shape = Shape::new(rows, cols);
        if data.len() != shape.size() {
            return Err(Error::LengthMismatch {
                shape,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Creates a matrix from a slice of rows.
    ///
    /// The column count is the array length `N`, so rows cannot be ragged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gyoretsu::*;
    /// let m = DynMatrix::from_rows(&[
    ///     [1, 2, 3],
    ///     [4, 5, 6],
    /// ]);
    /// assert_eq!(m.shape(), Shape::new(2, 3));
    /// assert_eq!(m[(1, 2)], 6);
    /// ```
    pub fn from_rows<const N: usize>(rows: &[[T; N]]) -> Self
    where
        T: Clone,
    {
        let mut data = Vec::with_capacity(rows.len() * N);
        for row in rows {
            data.extend_from_slice(row);
        }
        Self {
            rows: rows.len(),
            cols: N,
            data,
        }
    }

    /// Overwrites the matrix contents from a row-major flat slice.
    ///
    /// The slice length must match [`size`][MatrixLike::size] exactly.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gyoretsu::*;
    /// let mut m = DynMatrix::zeros(3, 3);
    /// m.set_row_major(&[1, 2, 1, 4, 5, 4, 1, -1, 0]).unwrap();
    /// assert_eq!(m[(1, 1)], 5);
    /// assert!(m.set_row_major(&[1, 2, 3]).is_err());
    /// ```
    pub fn set_row_major(&mut self, values: &[T]) -> Result<(), Error>
    where
        T: Clone,
    {
        if values.len() != self.data.len() {
            return Err(Error::LengthMismatch {
                shape: self.shape(),
                len: values.len(),
            });
        }
        self.data.clone_from_slice(values);
        Ok(())
    }

    /// Returns a reference to the element at `(row, col)`, or [`None`] if out
    /// of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Returns a mutable reference to the element at `(row, col)`, or
    /// [`None`] if out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row < self.rows && col < self.cols {
            self.data.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    /// The elements as a flat row-major slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The elements as a mutable flat row-major slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Applies a closure to each element, returning a new matrix of the same
    /// shape.
    pub fn map<F, U>(self, f: F) -> DynMatrix<U>
    where
        F: FnMut(T) -> U,
    {
        DynMatrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.into_iter().map(f).collect(),
        }
    }

    /// Returns a newly allocated matrix with rows and columns swapped.
    ///
    /// Runs in `O(rows * cols)` with no buffer beyond the result.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gyoretsu::*;
    /// let m = DynMatrix::from_rows(&[
    ///     [0, 1, 0],
    ///     [0, 0, 1],
    ///     [0, 0, 0],
    /// ]);
    /// assert_eq!(m.transpose(), DynMatrix::from_rows(&[
    ///     [0, 0, 0],
    ///     [1, 0, 0],
    ///     [0, 1, 0],
    /// ]));
    /// ```
    pub fn transpose(&self) -> DynMatrix<T>
    where
        T: Clone,
    {
        DynMatrix::from_fn(self.cols, self.rows, |row, col| {
            self.elem(col, row).clone()
        })
    }
}

impl<T> MatrixLike<T> for DynMatrix<T> {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn elem(&self, row: usize, col: usize) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "position ({row}, {col}) is out of bounds for shape ({}, {})",
            self.rows,
            self.cols,
        );
        &self.data[row * self.cols + col]
    }

    fn elem_mut(&mut self, row: usize, col: usize) -> &mut T {
        assert!(
            row < self.rows && col < self.cols,
            "position ({row}, {col}) is out of bounds for shape ({}, {})",
            self.rows,
            self.cols,
        );
        &mut self.data[row * self.cols + col]
    }
}

impl<T: fmt::Debug> fmt::Debug for DynMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        base::fmt_list(self, f)
    }
}

impl<T: fmt::Display> fmt::Display for DynMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        base::fmt_rows(self, f)
    }
}

/// Fixed → dynamic conversion; copies element by element.
impl<T: Clone, const R: usize, const C: usize> From<&Matrix<T, R, C>> for DynMatrix<T> {
    fn from(mat: &Matrix<T, R, C>) -> Self {
        Self::from_fn(R, C, |row, col| mat[(row, col)].clone())
    }
}

/// Fixed → dynamic conversion.
impl<T: Clone, const R: usize, const C: usize> From<Matrix<T, R, C>> for DynMatrix<T> {
    fn from(mat: Matrix<T, R, C>) -> Self {
        Self::from(&mat)
    }
}

/// Dynamic → fixed conversion; reports [`Error::DimensionMismatch`] unless
/// the run-time shape is exactly `(R, C)`.
impl<T: Clone, const R: usize, const C: usize> TryFrom<&DynMatrix<T>> for Matrix<T, R, C> {
    type Error = Error;

    fn try_from(mat: &DynMatrix<T>) -> Result<Self, Error> {
        if mat.rows != R || mat.cols != C {
            return Err(Error::DimensionMismatch {
                lhs: Shape::new(R, C),
                rhs: mat.shape(),
            });
        }
        Ok(Matrix::from_fn(|row, col| mat[(row, col)].clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_is_zero_filled() {
        let m = DynMatrix::<i32>::zeros(3, 4);
        assert_eq!(m.shape(), Shape::new(3, 4));
        assert_eq!(m.size(), 12);
        assert!(m.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn default_is_empty() {
        let m = DynMatrix::<i32>::default();
        assert_eq!(m.size(), 0);
        assert_eq!(m.shape(), Shape::new(0, 0));
    }

    #[test]
    fn construction_paths_agree() {
        let from_rows = DynMatrix::from_rows(&[[1, 2], [3, 4]]);
        let from_vec = DynMatrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        let from_fn = DynMatrix::from_fn(2, 2, |row, col| (row * 2 + col + 1) as i32);
        assert_eq!(from_rows, from_vec);
        assert_eq!(from_rows, from_fn);
    }

    #[test]
    fn from_vec_requires_exact_length() {
        let err = DynMatrix::from_vec(2, 3, vec![1, 2, 3, 4]).unwrap_err();
        assert_eq!(
            err,
            Error::LengthMismatch {
                shape: Shape::new(2, 3),
                len: 4,
            }
        );
    }

    #[test]
    fn set_row_major_fills_row_by_row() {
        let mut m = DynMatrix::zeros(3, 3);
        m.set_row_major(&[1, 2, 1, 4, 5, 4, 1, -1, 0]).unwrap();
        assert_eq!(m, DynMatrix::from_rows(&[[1, 2, 1], [4, 5, 4], [1, -1, 0]]));

        let err = m.set_row_major(&[1, 2]).unwrap_err();
        assert_eq!(
            err,
            Error::LengthMismatch {
                shape: Shape::new(3, 3),
                len: 2,
            }
        );
    }

    #[test]
    fn eye_rectangular() {
        let eye = DynMatrix::<f64>::eye(3, 5);
        for row in 0..3 {
            for col in 0..5 {
                let expected = if row == col { 1.0 } else { 0.0 };
                assert_eq!(eye[(row, col)], expected);
            }
        }
    }

    #[test]
    fn splat_and_ones() {
        assert_eq!(DynMatrix::<i32>::ones(2, 2), DynMatrix::splat(2, 2, 1));
    }

    #[test]
    fn transpose_roundtrip() {
        let m = DynMatrix::from_rows(&[[1, 2, 3], [4, 5, 6]]);
        assert_eq!(m.transpose().shape(), Shape::new(3, 2));
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn transpose_permutation() {
        let m = DynMatrix::from_rows(&[[0, 1, 0], [0, 0, 1], [0, 0, 0]]);
        let expected = DynMatrix::from_rows(&[[0, 0, 0], [1, 0, 0], [0, 1, 0]]);
        assert_eq!(m.transpose(), expected);
    }

    #[test]
    fn clone_is_deep() {
        let a = DynMatrix::from_rows(&[[1, 2], [3, 4]]);
        let mut b = a.clone();
        b[(0, 0)] = 9;
        assert_eq!(a[(0, 0)], 1);
    }

    #[test]
    fn fmt() {
        let m = DynMatrix::from_rows(&[[0, 1], [2, 3]]);
        assert_eq!(format!("{:?}", m), "[[0, 1], [2, 3]]");
        assert_eq!(format!("{m}"), "0 1\n2 3\n");
    }

    #[test]
    fn conversions_between_kinds() {
        let fixed = Matrix::from_rows([[1, 2], [3, 4]]);
        let dynamic = DynMatrix::from(fixed);
        assert_eq!(dynamic, fixed);

        let back = Matrix::<i32, 2, 2>::try_from(&dynamic).unwrap();
        assert_eq!(back, fixed);

        let err = Matrix::<i32, 3, 3>::try_from(&dynamic).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                lhs: Shape::new(3, 3),
                rhs: Shape::new(2, 2),
            }
        );
    }

    #[test]
    fn get_is_checked() {
        let m = DynMatrix::from_rows(&[[1, 2, 3], [4, 5, 6]]);
        assert_eq!(m.get(1, 2), Some(&6));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 3), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn tuple_indexing_panics_past_the_row_end() {
        // (0, 5) on a 3x3 matrix maps to a valid flat offset; it must still
        // be rejected instead of aliasing element (1, 2).
        let m = DynMatrix::<i32>::zeros(3, 3);
        let _ = m[(0, 5)];
    }
}
