//! Matrix multiplication algorithms.
//!
//! Two families are provided:
//!
//! - [`multiply`]/[`multiply_into`]: the general rectangular product, writing
//!   into a freshly allocated (or caller-supplied, zero-filled) destination.
//! - [`mul_right_in_place`]/[`mul_left_in_place`]: square-matrix products
//!   that overwrite one operand using only a single length-`n` temporary.
//!
//! The in-place routines are defined only for square operands; rectangular
//! products must go through the general multiply, which allocates its result.
//! All accumulation follows increasing `k` per output cell, which keeps
//! floating-point results reproducible.

use log::trace;

use crate::base::MatrixLike;
use crate::dynamic::DynMatrix;
use crate::error::{Error, Shape};
use crate::traits::Number;

/// Computes `A × B` into a freshly allocated, zero-filled matrix.
///
/// `A` is `n×m` and `B` is `m×s`; the result is `n×s`. Reports
/// [`Error::DimensionMismatch`] when `A.cols() != B.rows()`.
///
/// # Examples
///
/// ```
/// # use gyoretsu::*;
/// let a = DynMatrix::from_rows(&[[1, 2, 1], [4, 5, 4], [1, -1, 0]]);
/// let eye = DynMatrix::eye(3, 3);
/// assert_eq!(mul::multiply(&eye, &a).unwrap(), a);
/// ```
pub fn multiply<T, A, B>(a: &A, b: &B) -> Result<DynMatrix<T>, Error>
where
    T: Number,
    A: MatrixLike<T> + ?Sized,
    B: MatrixLike<T> + ?Sized,
{
    check_inner_dimension(a, b)?;
    let mut dst = DynMatrix::zeros(a.rows(), b.cols());
    multiply_into(a, b, &mut dst)?;
    Ok(dst)
}

/// Accumulates `A × B` onto `dst`: `dst[i, j] += Σ_k A[i, k] · B[k, j]`.
///
/// The destination must have shape `(A.rows(), B.cols())` and is expected to
/// start zero-filled — the engine accumulates, it never overwrites, so a
/// non-zero `dst` yields `dst + A × B`. Reports [`Error::DimensionMismatch`]
/// when `A.cols() != B.rows()` or when `dst` has the wrong shape.
///
/// The borrow checker rules out aliasing between `dst` and either operand, so
/// the accumulation can never observe its own partial results.
pub fn multiply_into<T, A, B, D>(a: &A, b: &B, dst: &mut D) -> Result<(), Error>
where
    T: Number,
    A: MatrixLike<T> + ?Sized,
    B: MatrixLike<T> + ?Sized,
    D: MatrixLike<T> + ?Sized,
{
    check_inner_dimension(a, b)?;
    if dst.rows() != a.rows() || dst.cols() != b.cols() {
        return Err(Error::DimensionMismatch {
            lhs: dst.shape(),
            rhs: Shape::new(a.rows(), b.cols()),
        });
    }
    trace!(
        "accumulating {} x {} product into {}",
        a.shape(),
        b.shape(),
        dst.shape()
    );

    for i in 0..a.rows() {
        for j in 0..b.cols() {
            for k in 0..a.cols() {
                let prod = *a.elem(i, k) * *b.elem(k, j);
                let cell = dst.elem_mut(i, j);
                *cell = *cell + prod;
            }
        }
    }
    Ok(())
}

/// In-place square product from the right: `A ← A × B`.
///
/// Both operands must be `n×n`. Each row `i` of `A` is first accumulated into
/// a length-`n` temporary — reading the row's *current* values throughout —
/// and only then written back; overwriting without the temporary would
/// corrupt the remainder of the row mid-computation. `O(n³)` time, `O(n)`
/// extra space.
///
/// Reports [`Error::NotSquare`] for rectangular operands and
/// [`Error::DimensionMismatch`] when the two squares differ in size.
///
/// # Examples
///
/// ```
/// # use gyoretsu::*;
/// let mut a = DynMatrix::from_rows(&[[1, 2], [3, 4]]);
/// let b = DynMatrix::from_rows(&[[0, 1], [1, 0]]);
/// mul::mul_right_in_place(&mut a, &b).unwrap();
/// assert_eq!(a, DynMatrix::from_rows(&[[2, 1], [4, 3]]));
/// ```
pub fn mul_right_in_place<T, A, B>(a: &mut A, b: &B) -> Result<(), Error>
where
    T: Number,
    A: MatrixLike<T> + ?Sized,
    B: MatrixLike<T> + ?Sized,
{
    check_square_pair(a, b)?;
    let n = a.rows();
    trace!("in-place right multiply of two {n}x{n} matrices");

    let mut tmp = vec![T::ZERO; n];
    for i in 0..n {
        for j in 0..n {
            tmp[j] = T::ZERO;
        }
        for j in 0..n {
            for k in 0..n {
                tmp[j] = tmp[j] + *a.elem(i, k) * *b.elem(k, j);
            }
        }
        for j in 0..n {
            *a.elem_mut(i, j) = tmp[j];
        }
    }
    Ok(())
}

/// In-place square product from the left: `A ← B × A`.
///
/// The symmetric counterpart of [`mul_right_in_place`], walking `A` column by
/// column so that each column is read in full before it is overwritten.
///
/// # Examples
///
/// ```
/// # use gyoretsu::*;
/// let mut a = DynMatrix::from_rows(&[[1, 2], [3, 4]]);
/// let b = DynMatrix::from_rows(&[[0, 1], [1, 0]]);
/// mul::mul_left_in_place(&b, &mut a).unwrap();
/// assert_eq!(a, DynMatrix::from_rows(&[[3, 4], [1, 2]]));
/// ```
pub fn mul_left_in_place<T, B, A>(b: &B, a: &mut A) -> Result<(), Error>
where
    T: Number,
    B: MatrixLike<T> + ?Sized,
    A: MatrixLike<T> + ?Sized,
{
    check_square_pair(a, b)?;
    let n = a.rows();
    trace!("in-place left multiply of two {n}x{n} matrices");

    let mut tmp = vec![T::ZERO; n];
    for j in 0..n {
        for i in 0..n {
            tmp[i] = T::ZERO;
        }
        for i in 0..n {
            for k in 0..n {
                tmp[i] = tmp[i] + *b.elem(i, k) * *a.elem(k, j);
            }
        }
        for i in 0..n {
            *a.elem_mut(i, j) = tmp[i];
        }
    }
    Ok(())
}

fn check_inner_dimension<T, A, B>(a: &A, b: &B) -> Result<(), Error>
where
    A: MatrixLike<T> + ?Sized,
    B: MatrixLike<T> + ?Sized,
{
    if a.cols() == b.rows() {
        Ok(())
    } else {
        Err(Error::DimensionMismatch {
            lhs: a.shape(),
            rhs: b.shape(),
        })
    }
}

fn check_square_pair<T, A, B>(a: &A, b: &B) -> Result<(), Error>
where
    A: MatrixLike<T> + ?Sized,
    B: MatrixLike<T> + ?Sized,
{
    if !a.is_square() {
        return Err(Error::NotSquare { shape: a.shape() });
    }
    if !b.is_square() {
        return Err(Error::NotSquare { shape: b.shape() });
    }
    if a.rows() != b.rows() {
        return Err(Error::DimensionMismatch {
            lhs: a.shape(),
            rhs: b.shape(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::error::Shape;
    use crate::matrix::Matrix;

    use super::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// The definitional triple loop, kept separate from the engine so the
    /// tests do not depend on the code they check.
    fn reference_multiply(a: &DynMatrix<i32>, b: &DynMatrix<i32>) -> DynMatrix<i32> {
        DynMatrix::from_fn(a.rows(), b.cols(), |i, j| {
            (0..a.cols()).map(|k| a[(i, k)] * b[(k, j)]).sum()
        })
    }

    #[test]
    fn general_multiply_matches_definition() {
        init_logger();
        let mut a = DynMatrix::zeros(3, 3);
        a.set_row_major(&[1, 2, 1, 4, 5, 4, 1, -1, 0]).unwrap();

        // b = -a, then overwritten through the assignment primitive.
        let mut b = -a.clone();
        a.eval_to(&mut b).unwrap();

        let mut c = DynMatrix::zeros(3, 3);
        multiply_into(&a, &b, &mut c).unwrap();
        assert_eq!(c, reference_multiply(&a, &a));
    }

    #[test]
    fn general_multiply_rectangular() {
        let a = DynMatrix::from_rows(&[[1, 2], [3, 4], [5, 6]]);
        let b = DynMatrix::from_rows(&[[7, 8, 9], [10, 11, 12]]);
        let c = multiply(&a, &b).unwrap();
        assert_eq!(c.shape(), Shape::new(3, 3));
        assert_eq!(c, reference_multiply(&a, &b));
    }

    #[test]
    fn multiply_into_accumulates() {
        let a = DynMatrix::from_rows(&[[1, 0], [0, 1]]);
        let b = DynMatrix::from_rows(&[[2, 3], [4, 5]]);
        let mut dst = DynMatrix::ones(2, 2);
        multiply_into(&a, &b, &mut dst).unwrap();
        assert_eq!(dst, DynMatrix::from_rows(&[[3, 4], [5, 6]]));
    }

    #[test]
    fn identity_is_neutral() {
        let a = DynMatrix::from_rows(&[[1, 2, 1], [4, 5, 4], [1, -1, 0]]);
        let eye = DynMatrix::eye(3, 3);
        assert_eq!(multiply(&eye, &a).unwrap(), a);
        assert_eq!(multiply(&a, &eye).unwrap(), a);
    }

    #[test]
    fn in_place_right_matches_general() {
        init_logger();
        fastrand::seed(0x6279206861726d6f);
        for _ in 0..16 {
            let n = fastrand::usize(1..8);
            let a = DynMatrix::from_fn(n, n, |_, _| fastrand::i32(-20..20));
            let b = DynMatrix::from_fn(n, n, |_, _| fastrand::i32(-20..20));

            let expected = multiply(&a, &b).unwrap();
            let mut inplace = a.clone();
            mul_right_in_place(&mut inplace, &b).unwrap();
            assert_eq!(inplace, expected);
        }
    }

    #[test]
    fn in_place_left_matches_general() {
        fastrand::seed(0x6e69737461726961);
        for _ in 0..16 {
            let n = fastrand::usize(1..8);
            let a = DynMatrix::from_fn(n, n, |_, _| fastrand::i32(-20..20));
            let b = DynMatrix::from_fn(n, n, |_, _| fastrand::i32(-20..20));

            let expected = multiply(&b, &a).unwrap();
            let mut inplace = a.clone();
            mul_left_in_place(&b, &mut inplace).unwrap();
            assert_eq!(inplace, expected);
        }
    }

    #[test]
    fn in_place_works_on_fixed_matrices() {
        let mut a = Matrix::from_rows([[1, 2, 1], [4, 5, 4], [1, -1, 0]]);
        let b = Matrix::from_rows([[0, 1, 0], [0, 0, 1], [0, 0, 0]]);
        let expected = a * b;
        mul_right_in_place(&mut a, &b).unwrap();
        assert_eq!(a, expected);
    }

    #[test]
    fn rectangular_in_place_is_rejected() {
        let mut a = DynMatrix::<i32>::zeros(2, 3);
        let b = DynMatrix::<i32>::zeros(3, 3);
        assert_eq!(
            mul_right_in_place(&mut a, &b),
            Err(Error::NotSquare {
                shape: Shape::new(2, 3),
            })
        );

        let mut square = DynMatrix::<i32>::zeros(3, 3);
        let rect = DynMatrix::<i32>::zeros(3, 2);
        assert_eq!(
            mul_left_in_place(&rect, &mut square),
            Err(Error::NotSquare {
                shape: Shape::new(3, 2),
            })
        );
    }

    #[test]
    fn mismatched_squares_are_rejected() {
        let mut a = DynMatrix::<i32>::zeros(2, 2);
        let b = DynMatrix::<i32>::zeros(3, 3);
        assert_eq!(
            mul_right_in_place(&mut a, &b),
            Err(Error::DimensionMismatch {
                lhs: Shape::new(2, 2),
                rhs: Shape::new(3, 3),
            })
        );
    }

    #[test]
    fn incompatible_inner_dimension_is_rejected() {
        let a = DynMatrix::<i32>::zeros(2, 3);
        let b = DynMatrix::<i32>::zeros(2, 3);
        assert_eq!(
            multiply(&a, &b),
            Err(Error::DimensionMismatch {
                lhs: Shape::new(2, 3),
                rhs: Shape::new(2, 3),
            })
        );
    }

    #[test]
    fn wrong_destination_shape_is_rejected() {
        let a = DynMatrix::<i32>::zeros(2, 3);
        let b = DynMatrix::<i32>::zeros(3, 4);
        let mut dst = DynMatrix::<i32>::zeros(2, 2);
        assert_eq!(
            multiply_into(&a, &b, &mut dst),
            Err(Error::DimensionMismatch {
                lhs: Shape::new(2, 2),
                rhs: Shape::new(2, 4),
            })
        );
    }
}
