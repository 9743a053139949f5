// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Vector Kernels Module** - *Level 1 BLAS*
//!
//! Strided inner products over any [`LinalgScalar`] kind.
//!
//! ## Usage Examples
//!
//! ```rust,ignore
//! use linalg_kernels::kernels::scientific::vector::vector_dot;
//!
//! let x = [1.0, 2.0, 3.0, 4.0];
//! let y = [5.0, 6.0, 7.0, 8.0];
//!
//! // every second element of x against the first two of y
//! let d = vector_dot(2, &x, 2, &y, 1)?; // 1·5 + 3·6
//! ```

use crate::errors::KernelError;
use crate::traits::scalar::LinalgScalar;
use crate::utils::{check_len, vector_extent};

/// Inner product of two strided vectors of length `n`.
///
/// Real kinds compute `Σ xᵢ·yᵢ`; complex kinds compute the conjugated product
/// `Σ conj(xᵢ)·yᵢ`. Negative increments walk the vector from its far end, as in BLAS.
/// `n <= 0` yields zero.
///
/// # Errors
/// - `KernelError::InvalidArguments` if `incx` or `incy` is zero.
/// - `KernelError::OutOfBounds` if either buffer is shorter than its stride and length address.
#[inline(always)]
pub fn vector_dot<T: LinalgScalar>(
    n: i32,
    x: &[T],
    incx: i32,
    y: &[T],
    incy: i32,
) -> Result<T, KernelError> {
    const FNAME: &str = "vector_dot";
    if n <= 0 {
        return Ok(T::zero());
    }
    if incx == 0 || incy == 0 {
        return Err(KernelError::InvalidArguments(format!(
            "{} => strides must be non-zero, got incx={} incy={}",
            FNAME, incx, incy
        )));
    }
    let nu = n as usize;
    check_len(FNAME, "x", vector_extent(nu, incx), x.len())?;
    check_len(FNAME, "y", vector_extent(nu, incy), y.len())?;

    Ok(unsafe { T::dot(n, x, incx, y, incy) })
}
