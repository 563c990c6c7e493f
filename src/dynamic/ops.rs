use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use crate::approx::ApproxEq;
use crate::base::MatrixLike;
use crate::matrix::Matrix;
use crate::mul;
use crate::traits::Number;

use super::DynMatrix;

impl<T> Index<(usize, usize)> for DynMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        self.elem(row, col)
    }
}

impl<T> IndexMut<(usize, usize)> for DynMatrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        self.elem_mut(row, col)
    }
}

/// Flat row-major indexing: offset `i` addresses element
/// `(i / cols, i % cols)` with no per-axis bounds check.
impl<T> Index<usize> for DynMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for DynMatrix<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

/// Element-wise equality.
///
/// # Panics
///
/// Panics if the shapes differ: comparing differently-shaped matrices is a
/// usage error, not a negative comparison.
impl<T: PartialEq> PartialEq for DynMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        match self.try_eq(other) {
            Ok(eq) => eq,
            Err(e) => panic!("{e}"),
        }
    }
}

/// Mixed-kind equality against a fixed-shape matrix.
///
/// # Panics
///
/// Panics if the run-time shape differs from `(R, C)`.
impl<T, const R: usize, const C: usize> PartialEq<Matrix<T, R, C>> for DynMatrix<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Matrix<T, R, C>) -> bool {
        match self.try_eq(other) {
            Ok(eq) => eq,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T: ApproxEq> ApproxEq for DynMatrix<T> {
    type Tolerance = T::Tolerance;

    const DEFAULT_TOLERANCE: Self::Tolerance = T::DEFAULT_TOLERANCE;

    fn abs_diff_eq(&self, other: &Self, tolerance: Self::Tolerance) -> bool {
        self.shape() == other.shape() && self.data.abs_diff_eq(&other.data, tolerance)
    }
}

/// Element-wise negation.
impl<T: Number> Neg for DynMatrix<T> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|elem| -elem)
    }
}

/// Element-wise addition; the left operand provides the result.
///
/// # Panics
///
/// Panics if the shapes differ.
impl<'a, T: Number> Add<&'a DynMatrix<T>> for DynMatrix<T> {
    type Output = Self;

    fn add(mut self, rhs: &'a DynMatrix<T>) -> Self {
        self += rhs;
        self
    }
}

/// Element-wise addition.
///
/// # Panics
///
/// Panics if the shapes differ.
impl<T: Number> Add for DynMatrix<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self + &rhs
    }
}

/// Element-wise addition; copies the left operand.
///
/// # Panics
///
/// Panics if the shapes differ.
impl<'a, 'b, T: Number> Add<&'b DynMatrix<T>> for &'a DynMatrix<T> {
    type Output = DynMatrix<T>;

    fn add(self, rhs: &'b DynMatrix<T>) -> DynMatrix<T> {
        self.clone() + rhs
    }
}

/// Mixed-kind element-wise addition; the result stays dynamically shaped.
///
/// # Panics
///
/// Panics if the run-time shape differs from `(R, C)`.
impl<'a, T: Number, const R: usize, const C: usize> Add<&'a Matrix<T, R, C>> for DynMatrix<T> {
    type Output = Self;

    fn add(mut self, rhs: &'a Matrix<T, R, C>) -> Self {
        self += rhs;
        self
    }
}

/// Element-wise addition.
///
/// # Panics
///
/// Panics if the shapes differ.
impl<'a, T: Number> AddAssign<&'a DynMatrix<T>> for DynMatrix<T> {
    fn add_assign(&mut self, rhs: &'a DynMatrix<T>) {
        if let Err(e) = rhs.add_to(self) {
            panic!("{e}");
        }
    }
}

/// Mixed-kind element-wise addition.
///
/// # Panics
///
/// Panics if the run-time shape differs from `(R, C)`.
impl<'a, T: Number, const R: usize, const C: usize> AddAssign<&'a Matrix<T, R, C>>
    for DynMatrix<T>
{
    fn add_assign(&mut self, rhs: &'a Matrix<T, R, C>) {
        if let Err(e) = rhs.add_to(self) {
            panic!("{e}");
        }
    }
}

/// Element-wise subtraction; the left operand provides the result.
///
/// # Panics
///
/// Panics if the shapes differ.
impl<'a, T: Number> Sub<&'a DynMatrix<T>> for DynMatrix<T> {
    type Output = Self;

    fn sub(mut self, rhs: &'a DynMatrix<T>) -> Self {
        self -= rhs;
        self
    }
}

/// Element-wise subtraction.
///
/// # Panics
///
/// Panics if the shapes differ.
impl<T: Number> Sub for DynMatrix<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self - &rhs
    }
}

/// Element-wise subtraction; copies the left operand.
///
/// # Panics
///
/// Panics if the shapes differ.
impl<'a, 'b, T: Number> Sub<&'b DynMatrix<T>> for &'a DynMatrix<T> {
    type Output = DynMatrix<T>;

    fn sub(self, rhs: &'b DynMatrix<T>) -> DynMatrix<T> {
        self.clone() - rhs
    }
}

/// Mixed-kind element-wise subtraction; the result stays dynamically shaped.
///
/// # Panics
///
/// Panics if the run-time shape differs from `(R, C)`.
impl<'a, T: Number, const R: usize, const C: usize> Sub<&'a Matrix<T, R, C>> for DynMatrix<T> {
    type Output = Self;

    fn sub(mut self, rhs: &'a Matrix<T, R, C>) -> Self {
        self -= rhs;
        self
    }
}

/// Element-wise subtraction.
///
/// # Panics
///
/// Panics if the shapes differ.
impl<'a, T: Number> SubAssign<&'a DynMatrix<T>> for DynMatrix<T> {
    fn sub_assign(&mut self, rhs: &'a DynMatrix<T>) {
        if let Err(e) = rhs.sub_to(self) {
            panic!("{e}");
        }
    }
}

/// Mixed-kind element-wise subtraction.
///
/// # Panics
///
/// Panics if the run-time shape differs from `(R, C)`.
impl<'a, T: Number, const R: usize, const C: usize> SubAssign<&'a Matrix<T, R, C>>
    for DynMatrix<T>
{
    fn sub_assign(&mut self, rhs: &'a Matrix<T, R, C>) {
        if let Err(e) = rhs.sub_to(self) {
            panic!("{e}");
        }
    }
}

/// Matrix * Scalar (scaling).
impl<T: Number> Mul<T> for DynMatrix<T> {
    type Output = Self;

    fn mul(mut self, rhs: T) -> Self {
        self.scale(rhs);
        self
    }
}

/// Matrix * Scalar (scaling).
impl<T: Number> MulAssign<T> for DynMatrix<T> {
    fn mul_assign(&mut self, rhs: T) {
        self.scale(rhs);
    }
}

/// Matrix / Scalar (element-wise division).
impl<T: Number> Div<T> for DynMatrix<T> {
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        self.map(|elem| elem / rhs)
    }
}

/// Matrix / Scalar (element-wise division).
impl<T: Number> DivAssign<T> for DynMatrix<T> {
    fn div_assign(&mut self, rhs: T) {
        for elem in &mut self.data {
            *elem = *elem / rhs;
        }
    }
}

// `impl<T: Number> Mul<DynMatrix<T>> for T` is rejected by coherence, so
// scalar-on-the-left multiplication is spelled out per primitive scalar.
macro_rules! scalar_lhs_mul {
    ($($types:ty),+) => {
        $(
            /// Scalar * Matrix (scaling).
            impl Mul<DynMatrix<$types>> for $types {
                type Output = DynMatrix<$types>;

                fn mul(self, rhs: DynMatrix<$types>) -> Self::Output {
                    rhs * self
                }
            }
        )+
    };
}
scalar_lhs_mul!(f32, f64, i8, i16, i32, i64, i128);

/// Matrix * Matrix through the general multiply; the result is freshly
/// allocated with shape `(lhs.rows(), rhs.cols())`.
///
/// # Panics
///
/// Panics if `lhs.cols() != rhs.rows()`.
impl<'a, 'b, T: Number> Mul<&'b DynMatrix<T>> for &'a DynMatrix<T> {
    type Output = DynMatrix<T>;

    fn mul(self, rhs: &'b DynMatrix<T>) -> DynMatrix<T> {
        match mul::multiply(self, rhs) {
            Ok(product) => product,
            Err(e) => panic!("{e}"),
        }
    }
}

/// Matrix * Matrix through the general multiply.
///
/// # Panics
///
/// Panics if `lhs.cols() != rhs.rows()`.
impl<T: Number> Mul for DynMatrix<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

/// Mixed-kind matrix product through the general multiply.
///
/// # Panics
///
/// Panics if `lhs.cols() != R`.
impl<'a, 'b, T: Number, const R: usize, const C: usize> Mul<&'b Matrix<T, R, C>>
    for &'a DynMatrix<T>
{
    type Output = DynMatrix<T>;

    fn mul(self, rhs: &'b Matrix<T, R, C>) -> DynMatrix<T> {
        match mul::multiply(self, rhs) {
            Ok(product) => product,
            Err(e) => panic!("{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;

    use super::*;

    #[test]
    fn add_then_sub_restores() {
        let a = DynMatrix::from_rows(&[[1, -2], [3, 4]]);
        let b = DynMatrix::from_rows(&[[5, 6], [-7, 8]]);
        assert_eq!((a.clone() + &b) - &b, a);
    }

    #[test]
    fn add_then_sub_restores_random() {
        fastrand::seed(0x6d61747269786573);
        for _ in 0..32 {
            let rows = fastrand::usize(1..6);
            let cols = fastrand::usize(1..6);
            let a = DynMatrix::from_fn(rows, cols, |_, _| fastrand::i64(-1000..1000));
            let b = DynMatrix::from_fn(rows, cols, |_, _| fastrand::i64(-1000..1000));
            assert_eq!((a.clone() + &b) - &b, a);
        }
    }

    #[test]
    fn repeated_addition_equals_scaling() {
        let a0 = DynMatrix::from_rows(&[[1, 2, 1], [4, 5, 4], [1, -1, 0]]);
        let mut a = a0.clone();
        for _ in 0..10 {
            a = a + &a0;
        }
        assert_eq!(a, a0.clone() * 11);
    }

    #[test]
    fn repeated_subtraction_reaches_zero() {
        let a0 = DynMatrix::from_rows(&[[1, 2, 1], [4, 5, 4], [1, -1, 0]]);
        let mut a = a0.clone() * 11;
        for _ in 0..11 {
            a = a - &a0;
        }
        assert_eq!(a, DynMatrix::<i32>::zeros(3, 3));
    }

    #[test]
    fn negation_roundtrip() {
        let a = DynMatrix::from_rows(&[[1, -2], [0, 4]]);
        let b = -a.clone();
        assert_eq!(b, DynMatrix::from_rows(&[[-1, 2], [0, -4]]));
        assert_eq!(-b, a);
    }

    #[test]
    fn scalar_ops() {
        let eye = DynMatrix::<f64>::eye(3, 5);
        let scaled = eye.clone() * 3.0;
        for row in 0..3 {
            for col in 0..5 {
                let expected = if row == col { 3.0 } else { 0.0 };
                assert_eq!(scaled[(row, col)], expected);
            }
        }
        assert_approx_eq!(3.0 * eye.clone(), scaled);
        assert_approx_eq!(scaled / 3.0, eye);

        let mut m = DynMatrix::from_rows(&[[2.0, 4.0]]);
        m *= 2.0;
        m /= 8.0;
        assert_approx_eq!(m, DynMatrix::from_rows(&[[0.5, 1.0]]));
    }

    #[test]
    fn matrix_product_operator() {
        let a = DynMatrix::from_rows(&[[1, 2], [3, 4], [5, 6]]);
        let b = DynMatrix::from_rows(&[[7, 8, 9], [10, 11, 12]]);
        let c = &a * &b;
        assert_eq!(
            c,
            DynMatrix::from_rows(&[[27, 30, 33], [61, 68, 75], [95, 106, 117]])
        );
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn product_with_incompatible_inner_dimension_panics() {
        let a = DynMatrix::<i32>::zeros(2, 3);
        let b = DynMatrix::<i32>::zeros(2, 3);
        let _ = &a * &b;
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn eq_shape_mismatch_panics() {
        let a = DynMatrix::<i32>::zeros(2, 3);
        let b = DynMatrix::<i32>::zeros(3, 2);
        let _ = a == b;
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn add_shape_mismatch_panics() {
        let a = DynMatrix::<i32>::zeros(2, 3);
        let b = DynMatrix::<i32>::zeros(3, 2);
        let _ = a + &b;
    }
}
