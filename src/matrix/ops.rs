use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use crate::approx::ApproxEq;
use crate::base::MatrixLike;
use crate::dynamic::DynMatrix;
use crate::mul;
use crate::traits::Number;

use super::Matrix;

impl<T, const R: usize, const C: usize> Index<(usize, usize)> for Matrix<T, R, C> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.0[row][col]
    }
}

impl<T, const R: usize, const C: usize> IndexMut<(usize, usize)> for Matrix<T, R, C> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.0[row][col]
    }
}

/// Flat row-major indexing: offset `i` addresses element `(i / C, i % C)`.
impl<T, const R: usize, const C: usize> Index<usize> for Matrix<T, R, C> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index / C][index % C]
    }
}

impl<T, const R: usize, const C: usize> IndexMut<usize> for Matrix<T, R, C> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index / C][index % C]
    }
}

// More general `PartialEq` impl than what the derive generates.
impl<T, U, const R: usize, const C: usize> PartialEq<Matrix<U, R, C>> for Matrix<T, R, C>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Matrix<U, R, C>) -> bool {
        self.0.eq(&other.0)
    }
}

impl<T, const R: usize, const C: usize> Eq for Matrix<T, R, C> where T: Eq {}

/// Mixed-kind equality against a dynamically-shaped matrix.
///
/// # Panics
///
/// Panics if `other`'s run-time shape differs from `(R, C)`: comparing
/// differently-shaped matrices is a usage error, not a negative comparison.
impl<T, const R: usize, const C: usize> PartialEq<DynMatrix<T>> for Matrix<T, R, C>
where
    T: PartialEq,
{
    fn eq(&self, other: &DynMatrix<T>) -> bool {
        match self.try_eq(other) {
            Ok(eq) => eq,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T, const R: usize, const C: usize> ApproxEq for Matrix<T, R, C>
where
    T: ApproxEq,
{
    type Tolerance = T::Tolerance;

    const DEFAULT_TOLERANCE: Self::Tolerance = T::DEFAULT_TOLERANCE;

    fn abs_diff_eq(&self, other: &Self, tolerance: Self::Tolerance) -> bool {
        self.0
            .iter()
            .zip(&other.0)
            .all(|(a, b)| a.as_slice().abs_diff_eq(b.as_slice(), tolerance))
    }
}

/// Element-wise negation.
impl<T: Number, const R: usize, const C: usize> Neg for Matrix<T, R, C> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|elem| -elem)
    }
}

/// Element-wise addition.
impl<T: Number, const R: usize, const C: usize> Add for Matrix<T, R, C> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Matrix::from_fn(|row, col| self[(row, col)] + rhs[(row, col)])
    }
}

/// Element-wise addition.
impl<T: Number, const R: usize, const C: usize> AddAssign for Matrix<T, R, C> {
    fn add_assign(&mut self, rhs: Self) {
        for row in 0..R {
            for col in 0..C {
                self.0[row][col] = self.0[row][col] + rhs.0[row][col];
            }
        }
    }
}

/// Element-wise subtraction.
impl<T: Number, const R: usize, const C: usize> Sub for Matrix<T, R, C> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Matrix::from_fn(|row, col| self[(row, col)] - rhs[(row, col)])
    }
}

/// Element-wise subtraction.
impl<T: Number, const R: usize, const C: usize> SubAssign for Matrix<T, R, C> {
    fn sub_assign(&mut self, rhs: Self) {
        for row in 0..R {
            for col in 0..C {
                self.0[row][col] = self.0[row][col] - rhs.0[row][col];
            }
        }
    }
}

/// Matrix * Matrix; the operand and result shapes are checked at compile time.
///
/// Accumulation per output cell follows increasing `k`, which keeps
/// floating-point results reproducible.
impl<T, const M: usize, const N: usize, const P: usize> Mul<Matrix<T, N, P>> for Matrix<T, M, N>
where
    T: Number,
{
    type Output = Matrix<T, M, P>;

    fn mul(self, rhs: Matrix<T, N, P>) -> Self::Output {
        Matrix::from_fn(|i, j| (0..N).fold(T::ZERO, |acc, k| acc + self[(i, k)] * rhs[(k, j)]))
    }
}

/// Matrix * Scalar (scaling).
impl<T: Number, const R: usize, const C: usize> Mul<T> for Matrix<T, R, C> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        self.map(|elem| elem * rhs)
    }
}

/// Matrix * Scalar (scaling).
impl<T: Number, const R: usize, const C: usize> MulAssign<T> for Matrix<T, R, C> {
    fn mul_assign(&mut self, rhs: T) {
        self.scale(rhs);
    }
}

/// Matrix / Scalar (element-wise division).
impl<T: Number, const R: usize, const C: usize> Div<T> for Matrix<T, R, C> {
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        self.map(|elem| elem / rhs)
    }
}

/// Matrix / Scalar (element-wise division).
impl<T: Number, const R: usize, const C: usize> DivAssign<T> for Matrix<T, R, C> {
    fn div_assign(&mut self, rhs: T) {
        for row in 0..R {
            for col in 0..C {
                self.0[row][col] = self.0[row][col] / rhs;
            }
        }
    }
}

// `impl<T: Number> Mul<Matrix<T, R, C>> for T` is rejected by coherence, so
// scalar-on-the-left multiplication is spelled out per primitive scalar.
macro_rules! scalar_lhs_mul {
    ($($types:ty),+) => {
        $(
            /// Scalar * Matrix (scaling).
            impl<const R: usize, const C: usize> Mul<Matrix<$types, R, C>> for $types {
                type Output = Matrix<$types, R, C>;

                fn mul(self, rhs: Matrix<$types, R, C>) -> Self::Output {
                    rhs * self
                }
            }
        )+
    };
}
scalar_lhs_mul!(f32, f64, i8, i16, i32, i64, i128);

/// Mixed-kind element-wise addition; the result keeps the left operand's
/// fixed shape.
///
/// # Panics
///
/// Panics if `rhs`'s run-time shape differs from `(R, C)`.
impl<'a, T: Number, const R: usize, const C: usize> Add<&'a DynMatrix<T>> for Matrix<T, R, C> {
    type Output = Self;

    fn add(mut self, rhs: &'a DynMatrix<T>) -> Self {
        self += rhs;
        self
    }
}

/// Mixed-kind element-wise addition.
///
/// # Panics
///
/// Panics if `rhs`'s run-time shape differs from `(R, C)`.
impl<'a, T: Number, const R: usize, const C: usize> AddAssign<&'a DynMatrix<T>> for Matrix<T, R, C> {
    fn add_assign(&mut self, rhs: &'a DynMatrix<T>) {
        if let Err(e) = rhs.add_to(self) {
            panic!("{e}");
        }
    }
}

/// Mixed-kind element-wise subtraction; the result keeps the left operand's
/// fixed shape.
///
/// # Panics
///
/// Panics if `rhs`'s run-time shape differs from `(R, C)`.
impl<'a, T: Number, const R: usize, const C: usize> Sub<&'a DynMatrix<T>> for Matrix<T, R, C> {
    type Output = Self;

    fn sub(mut self, rhs: &'a DynMatrix<T>) -> Self {
        self -= rhs;
        self
    }
}

/// Mixed-kind element-wise subtraction.
///
/// # Panics
///
/// Panics if `rhs`'s run-time shape differs from `(R, C)`.
impl<'a, T: Number, const R: usize, const C: usize> SubAssign<&'a DynMatrix<T>> for Matrix<T, R, C> {
    fn sub_assign(&mut self, rhs: &'a DynMatrix<T>) {
        if let Err(e) = rhs.sub_to(self) {
            panic!("{e}");
        }
    }
}

/// Mixed-kind matrix product through the general multiply; the result is
/// dynamically shaped because the right operand's column count is a run-time
/// value.
///
/// # Panics
///
/// Panics if `C` differs from `rhs.rows()`.
impl<'a, 'b, T: Number, const R: usize, const C: usize> Mul<&'b DynMatrix<T>>
    for &'a Matrix<T, R, C>
{
    type Output = DynMatrix<T>;

    fn mul(self, rhs: &'b DynMatrix<T>) -> DynMatrix<T> {
        match mul::multiply(self, rhs) {
            Ok(product) => product,
            Err(e) => panic!("{e}"),
        }
    }
}
