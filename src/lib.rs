//! Statically- and dynamically-sized matrices sharing one element-access
//! contract.
//!
//! # Motivation
//!
//! Small matrix cores keep growing the same two containers: a fixed-size
//! matrix whose extents are known at compile time, and a heap-backed one
//! whose extents are chosen at run time. This library provides both —
//! [`Matrix`] and [`DynMatrix`] — and derives all of their arithmetic from a
//! single contract, [`MatrixLike`], so the two kinds compose freely: a fixed
//! matrix can be accumulated onto a dynamic one, multiplied with it, compared
//! against it, or converted to and from it, without a third representation in
//! between.
//!
//! # Goals & Non-Goals
//!
//! - Resolve as much as possible at compile time. Fixed matrices of different
//!   dimensions are distinct types, their factories are `const`, and their
//!   binary operators need no run-time shape checks at all.
//! - Fail fast everywhere else. Every shape-checked operation on dynamic
//!   matrices either returns a [`Result`] (the `try_`/`_to` methods) or
//!   panics with the same message (the operators); shapes are never silently
//!   truncated or clamped.
//! - Stay allocation-conscious. Bulk constructors fill their buffer exactly
//!   once, binary `+`/`-` reuse the left operand's storage, and the in-place
//!   square multiplies in [`mul`] get by with a single length-`n` temporary.
//! - Be generic over the element type, but don't try to support non-[`Copy`]
//!   numeric types in arithmetic (construction and access work with any `T`).
//! - No decompositions, solvers, or SIMD kernels; this is the container and
//!   composition layer such things are built on.

pub mod approx;
mod base;
mod dynamic;
mod error;
mod matrix;
pub mod mul;
mod traits;

pub use base::{check_same_shape, MatrixLike};
pub use dynamic::DynMatrix;
pub use error::{Error, Shape};
pub use matrix::*;
pub use traits::*;
