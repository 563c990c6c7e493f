//! Approximate equality for float-valued test assertions.
//!
//! For more information on the subtleties of approximate floating-point number
//! comparison, see:
//! <https://randomascii.wordpress.com/2012/02/25/comparing-floating-point-numbers-2012-edition/>

use std::fmt;

/// Types that can be compared for *approximate equality*.
///
/// Compound types implementing this trait are considered *equal* if all of
/// their elements are. The comparison is an *absolute* one: two values are
/// equal if their absolute difference is at most the tolerance.
pub trait ApproxEq<Rhs: ?Sized = Self> {
    /// Type representing the comparison tolerance.
    ///
    /// This is almost always either [`f32`] or [`f64`], depending on which one
    /// is the underlying primitive type being compared.
    type Tolerance: Copy;

    /// Tolerance used by [`assert_approx_eq!`][crate::assert_approx_eq] when
    /// none is given explicitly.
    const DEFAULT_TOLERANCE: Self::Tolerance;

    /// Compares `self` and `other`, considering them equal if their absolute
    /// difference is at most `tolerance`.
    fn abs_diff_eq(&self, other: &Rhs, tolerance: Self::Tolerance) -> bool;
}

impl ApproxEq for f32 {
    type Tolerance = Self;

    const DEFAULT_TOLERANCE: Self = Self::EPSILON;

    fn abs_diff_eq(&self, other: &Self, tolerance: Self) -> bool {
        if !self.is_finite() || !other.is_finite() {
            // Ensures that `inf == inf`, `-inf == -inf` and `inf != -inf`.
            return self == other;
        }

        (self - other).abs() <= tolerance
    }
}

impl ApproxEq for f64 {
    type Tolerance = Self;

    const DEFAULT_TOLERANCE: Self = Self::EPSILON;

    fn abs_diff_eq(&self, other: &Self, tolerance: Self) -> bool {
        if !self.is_finite() || !other.is_finite() {
            // Ensures that `inf == inf`, `-inf == -inf` and `inf != -inf`.
            return self == other;
        }

        (self - other).abs() <= tolerance
    }
}

impl<T: ApproxEq> ApproxEq for [T] {
    type Tolerance = T::Tolerance;

    const DEFAULT_TOLERANCE: Self::Tolerance = T::DEFAULT_TOLERANCE;

    fn abs_diff_eq(&self, other: &Self, tolerance: Self::Tolerance) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|(a, b)| a.abs_diff_eq(b, tolerance))
    }
}

impl<T: ApproxEq, const N: usize> ApproxEq for [T; N] {
    type Tolerance = T::Tolerance;

    const DEFAULT_TOLERANCE: Self::Tolerance = T::DEFAULT_TOLERANCE;

    fn abs_diff_eq(&self, other: &Self, tolerance: Self::Tolerance) -> bool {
        self.as_slice().abs_diff_eq(other.as_slice(), tolerance)
    }
}

#[doc(hidden)]
#[track_caller]
pub fn assert_approx<T>(left: &T, right: &T, tolerance: Option<T::Tolerance>, expect_eq: bool)
where
    T: ApproxEq + fmt::Debug + ?Sized,
{
    let tolerance = tolerance.unwrap_or(T::DEFAULT_TOLERANCE);
    let equal = left.abs_diff_eq(right, tolerance);
    if equal != expect_eq {
        let op = if expect_eq { "==" } else { "!=" };
        panic!(
            r#"assertion `left approx {op} right` failed
  left: {left:?}
 right: {right:?}"#
        );
    }
}

/// Asserts that two expressions are approximately equal to each other (using
/// [`ApproxEq`]).
///
/// An optional third argument overrides the
/// [default tolerance][ApproxEq::DEFAULT_TOLERANCE].
///
/// Also see [`assert_approx_ne!`][crate::assert_approx_ne].
///
/// # Examples
///
/// ```
/// # use gyoretsu::*;
/// let one = (0..10).fold(0.0, |acc, _| acc + 0.1);
/// assert_approx_eq!(one, 1.0, 1e-9);
///
/// assert_approx_eq!(100.0, 99.0, 1.0);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::approx::assert_approx(&$lhs, &$rhs, ::core::option::Option::None, true)
    };
    ($lhs:expr, $rhs:expr, $tolerance:expr $(,)?) => {
        $crate::approx::assert_approx(
            &$lhs,
            &$rhs,
            ::core::option::Option::Some($tolerance),
            true,
        )
    };
}

/// Asserts that two expressions are *not* approximately equal to each other
/// (using [`ApproxEq`]).
///
/// # Examples
///
/// ```
/// # use gyoretsu::*;
/// assert_approx_ne!(100.0, 99.0, 0.5);
/// ```
#[macro_export]
macro_rules! assert_approx_ne {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::approx::assert_approx(&$lhs, &$rhs, ::core::option::Option::None, false)
    };
    ($lhs:expr, $rhs:expr, $tolerance:expr $(,)?) => {
        $crate::approx::assert_approx(
            &$lhs,
            &$rhs,
            ::core::option::Option::Some($tolerance),
            false,
        )
    };
}
