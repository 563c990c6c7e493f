use std::{
    array, fmt,
    mem::{ManuallyDrop, MaybeUninit},
};

use crate::base::{self, MatrixLike};
use crate::traits::{One, Zero};

mod ops;

/// A 1x1 matrix.
pub type Mat1<T> = Matrix<T, 1, 1>;
/// A 1x1 matrix with [`f32`] elements.
pub type Mat1f = Mat1<f32>;
/// A 2x2 matrix.
pub type Mat2<T> = Matrix<T, 2, 2>;
/// A 2x2 matrix with [`f32`] elements.
pub type Mat2f = Mat2<f32>;
/// A 3x3 matrix.
pub type Mat3<T> = Matrix<T, 3, 3>;
/// A 3x3 matrix with [`f32`] elements.
pub type Mat3f = Mat3<f32>;
/// A 4x4 matrix.
pub type Mat4<T> = Matrix<T, 4, 4>;
/// A 4x4 matrix with [`f32`] elements.
pub type Mat4f = Mat4<f32>;

/// A matrix with 2 rows and 3 columns.
pub type Mat2x3<T> = Matrix<T, 2, 3>;
/// A matrix with 3 rows and 2 columns.
pub type Mat3x2<T> = Matrix<T, 3, 2>;
/// A matrix with 3 rows and 4 columns.
pub type Mat3x4<T> = Matrix<T, 3, 4>;
/// A matrix with 4 rows and 3 columns.
pub type Mat4x3<T> = Matrix<T, 4, 3>;

/// A row-major matrix whose extents `R` and `C` are part of the type.
///
/// Two fixed matrices of different dimensions are different, non-interchangeable
/// types, so shape agreement for `+`, `-`, `*`, and `==` between fixed matrices
/// is enforced entirely at compile time, and constructing one with extents that
/// are not compile-time constants is impossible by construction. Storage is an
/// inline array with no heap indirection.
///
/// # Construction
///
/// - [`Matrix::from_rows`] and [`Matrix::from_columns`] fill a matrix with raw
///   elements.
/// - [`Matrix::from_fn`] invokes a closure with each element's row and column.
/// - [`Matrix::splat`] repeats one value everywhere.
/// - The associated constants [`Matrix::ZERO`], [`Matrix::IDENTITY`], and
///   [`Matrix::ONES`] are evaluated at compile time and usable in `const`
///   context.
///
/// # Element Access
///
/// [`Matrix`] implements [`Index`]/[`IndexMut`] for `(row, col)` tuples (both
/// 0-based) and for flat row-major `usize` offsets; indexing out of bounds
/// panics, just like it does for slices. [`Matrix::get`]/[`Matrix::get_mut`]
/// return [`Option`]s, and the [`MatrixLike`] contract adds error-carrying
/// [`at`][MatrixLike::at] access plus the evaluation protocol shared with
/// [`DynMatrix`][crate::DynMatrix].
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
#[derive(Clone, Copy, Hash)]
pub struct Matrix<T, const R: usize, const C: usize>([[T; C]; R]);

#[rustfmt::skip]
unsafe impl<T: bytemuck::Zeroable, const R: usize, const C: usize> bytemuck::Zeroable for Matrix<T, R, C> {}
unsafe impl<T: bytemuck::Pod, const R: usize, const C: usize> bytemuck::Pod for Matrix<T, R, C> {}

impl<T, const R: usize, const C: usize> Matrix<T, R, C> {
    /// The smallest dimension of the matrix (`R` or `C`).
    const MIN_DIMENSION: usize = if R > C { C } else { R };

    /// Number of rows. Usable in `const` context.
    pub const fn rows(&self) -> usize {
        R
    }

    /// Number of columns. Usable in `const` context.
    pub const fn cols(&self) -> usize {
        C
    }

    /// Creates a new [`Matrix`] in which the elements are wrapped in [`MaybeUninit`].
    const fn new_uninit() -> Matrix<MaybeUninit<T>, R, C> {
        // Safety: `uninit` is a valid value for the `MaybeUninit<T>` elements
        unsafe { MaybeUninit::<Matrix<MaybeUninit<T>, R, C>>::uninit().assume_init() }
    }

    /// Creates a [`Matrix`] from an array of rows.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gyoretsu::*;
    /// let rows = Matrix::from_rows([
    ///     [0, 1],
    ///     [2, 3],
    /// ]);
    /// let columns = Matrix::from_columns([
    ///     [0, 2],
    ///     [1, 3],
    /// ]);
    /// assert_eq!(rows, columns);
    /// ```
    pub const fn from_rows(rows: [[T; C]; R]) -> Self {
        Self(rows)
    }

    /// Creates a [`Matrix`] from an array of columns.
    pub fn from_columns(columns: [[T; R]; C]) -> Self {
        Matrix::<T, C, R>::from_rows(columns).transpose()
    }

    /// Creates a [`Matrix`] by invoking a closure with the position (row and
    /// column) of each element.
    ///
    /// This mirrors [`array::from_fn`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use gyoretsu::*;
    /// let mat = Matrix::from_fn(|row, col| row * 10 + col);
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [ 0,  1,  2],
    ///     [10, 11, 12],
    /// ]));
    /// ```
    pub fn from_fn<F>(mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        Self(array::from_fn(|row| array::from_fn(|col| cb(row, col))))
    }

    /// Creates a [`Matrix`] with every element set to `elem`.
    pub fn splat(elem: T) -> Self
    where
        T: Copy,
    {
        Self([[elem; C]; R])
    }

    /// Applies a closure to each element, returning a new matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gyoretsu::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// let mat = mat.map(|i| i * 2);
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [ 0,  2,  4],
    ///     [ 6,  8, 10],
    /// ]));
    /// ```
    pub fn map<F, U>(self, mut f: F) -> Matrix<U, R, C>
    where
        F: FnMut(T) -> U,
    {
        Matrix(self.0.map(|row| row.map(|v| f(v))))
    }

    /// Swaps the rows and columns of this matrix.
    ///
    /// The result has shape `(C, R)` at the type level; no buffer beyond the
    /// result itself is allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gyoretsu::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]).transpose();
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [0, 3],
    ///     [1, 4],
    ///     [2, 5],
    /// ]));
    /// ```
    pub fn transpose(self) -> Matrix<T, C, R> {
        let mut out = Matrix::<T, C, R>::new_uninit();
        for (r, row) in self.0.into_iter().enumerate() {
            for (c, elem) in row.into_iter().enumerate() {
                out.0[c][r] = MaybeUninit::new(elem);
            }
        }
        // Safety: the loop above writes to each element.
        unsafe { out.assume_init() }
    }

    /// Returns a reference to the element at `(row, col)`, or [`None`] if out
    /// of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gyoretsu::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// assert_eq!(mat.get(1, 0), Some(&3));
    /// assert_eq!(mat.get(2, 0), None);
    /// ```
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.0.get(row).and_then(|row| row.get(col))
    }

    /// Returns a mutable reference to the element at `(row, col)`, or [`None`]
    /// if out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.0.get_mut(row).and_then(|row| row.get_mut(col))
    }

    /// Returns `self`, but with the element at `(row, col)` replaced with
    /// `elem`, without dropping the old element at that position.
    const fn with_leaky_elem(self, row: usize, col: usize, elem: T) -> Self {
        unsafe {
            // Leaks whatever was at `(row, col)` before.
            union UnWrapper<T, const R: usize, const C: usize> {
                wrapped: ManuallyDrop<Matrix<ManuallyDrop<T>, R, C>>,
                unwrapped: ManuallyDrop<Matrix<T, R, C>>,
            }

            let mut wrapped = ManuallyDrop::into_inner(
                UnWrapper {
                    unwrapped: ManuallyDrop::new(self),
                }
                .wrapped,
            );
            wrapped.0[row][col] = ManuallyDrop::new(elem);

            ManuallyDrop::into_inner(
                UnWrapper {
                    wrapped: ManuallyDrop::new(wrapped),
                }
                .unwrapped,
            )
        }
    }
}

impl<T, const R: usize, const C: usize> Matrix<MaybeUninit<T>, R, C> {
    /// Removes the [`MaybeUninit`] wrapper from each matrix element.
    ///
    /// See [`MaybeUninit::assume_init`] for details about the safety invariant
    /// the caller needs to uphold.
    const unsafe fn assume_init(self) -> Matrix<T, R, C> {
        // Safety: `MaybeUninit<T>` and `T` have the same layout.
        union UnWrapper<T, const R: usize, const C: usize> {
            uninit: ManuallyDrop<Matrix<MaybeUninit<T>, R, C>>,
            init: ManuallyDrop<Matrix<T, R, C>>,
        }

        ManuallyDrop::into_inner(
            UnWrapper {
                uninit: ManuallyDrop::new(self),
            }
            .init,
        )
    }
}

impl<T: Zero, const R: usize, const C: usize> Matrix<T, R, C> {
    /// A matrix with every element set to 0.
    pub const ZERO: Self = unsafe {
        // Because `[T::ZERO; N]` requires `T` to be `Copy`, we use this gross
        // hack to duplicate `T::ZERO` without that `Copy` bound.
        let mut mat = Self::new_uninit();
        let mut row = 0;
        while row < R {
            let mut col = 0;
            while col < C {
                mat.0[row][col] = MaybeUninit::new(T::ZERO);
                col += 1;
            }
            row += 1;
        }

        // Safety: the loop above has initialized every element.
        mat.assume_init()
    };
}

impl<T: One, const R: usize, const C: usize> Matrix<T, R, C> {
    /// A matrix with every element set to 1.
    pub const ONES: Self = unsafe {
        let mut mat = Self::new_uninit();
        let mut row = 0;
        while row < R {
            let mut col = 0;
            while col < C {
                mat.0[row][col] = MaybeUninit::new(T::ONE);
                col += 1;
            }
            row += 1;
        }

        // Safety: the loop above has initialized every element.
        mat.assume_init()
    };
}

impl<T: Zero + One, const R: usize, const C: usize> Matrix<T, R, C> {
    /// The identity matrix.
    ///
    /// The matrix has the value 1 at `(i, i)` for `i < min(R, C)` and 0
    /// everywhere else; rectangular shapes are allowed.
    pub const IDENTITY: Self = {
        let mut this = Self::ZERO;
        let mut i = 0;
        while i < Self::MIN_DIMENSION {
            this = this.with_leaky_elem(i, i, T::ONE);
            i += 1;
        }
        this
    };
}

impl<T, const R: usize, const C: usize> MatrixLike<T> for Matrix<T, R, C> {
    fn rows(&self) -> usize {
        R
    }

    fn cols(&self) -> usize {
        C
    }

    fn elem(&self, row: usize, col: usize) -> &T {
        &self.0[row][col]
    }

    fn elem_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.0[row][col]
    }
}

impl<T: fmt::Debug, const R: usize, const C: usize> fmt::Debug for Matrix<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        base::fmt_list(self, f)
    }
}

impl<T: fmt::Display, const R: usize, const C: usize> fmt::Display for Matrix<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        base::fmt_rows(self, f)
    }
}

impl<T, const R: usize, const C: usize> Default for Matrix<T, R, C>
where
    T: Default,
{
    fn default() -> Self {
        Self::from_fn(|_, _| T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_columns() {
        assert_eq!(
            Mat2x3::from_rows([[1, 2, 3], [4, 5, 6]]),
            Mat2x3::from_columns([[1, 4], [2, 5], [3, 6]]),
        );
    }

    #[test]
    fn fmt() {
        let mat = Matrix::from_rows([[0, 1], [2, 3]]);

        // Natural writing order (row-wise) for debug output.
        assert_eq!(format!("{:?}", mat), "[[0, 1], [2, 3]]");

        // `#` modifier prints each row in its own line, but not each
        // individual element.
        assert_eq!(
            format!("{:#?}", mat),
            "
[
    [0, 1],
    [2, 3],
]
"
            .trim()
        );
    }

    #[test]
    fn display_one_row_per_line() {
        let mat = Matrix::from_rows([[1, 2], [3, 4]]);
        assert_eq!(format!("{mat}"), "1 2\n3 4\n");
    }

    #[test]
    fn constants() {
        assert_eq!(format!("{:?}", Mat2f::ZERO), "[[0.0, 0.0], [0.0, 0.0]]");
        assert_eq!(format!("{:?}", Mat2f::IDENTITY), "[[1.0, 0.0], [0.0, 1.0]]");
        assert_eq!(format!("{:?}", Mat2f::ONES), "[[1.0, 1.0], [1.0, 1.0]]");
    }

    #[test]
    fn constants_in_const_context() {
        const EYE: Mat2<i32> = Mat2::IDENTITY;
        const CORNER: i32 = EYE.0[0][0];
        assert_eq!(CORNER, 1);
        assert_eq!(EYE.rows(), 2);
    }

    #[test]
    fn rectangular_identity() {
        let eye = Matrix::<f64, 3, 5>::IDENTITY;
        for row in 0..3 {
            for col in 0..5 {
                let expected = if row == col { 1.0 } else { 0.0 };
                assert_eq!(eye[(row, col)], expected);
            }
        }
    }

    #[test]
    fn transpose_roundtrip() {
        let mat = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(mat.transpose().transpose(), mat);
    }

    #[test]
    fn row_major_flat_indexing() {
        let mat = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(mat[0], 1);
        assert_eq!(mat[3], 4);
        assert_eq!(mat[5], 6);
    }

    #[test]
    fn splat_and_map() {
        let mat = Mat2::splat(3);
        assert_eq!(mat.map(|v| v * v), Mat2::splat(9));
    }

    #[test]
    fn get_is_checked() {
        let mat = Matrix::from_rows([[0, 1, 2], [3, 4, 5]]);
        assert_eq!(mat.get(0, 0), Some(&0));
        assert_eq!(mat.get(1, 2), Some(&5));
        assert_eq!(mat.get(2, 0), None);
        assert_eq!(mat.get(0, 3), None);
    }
}
