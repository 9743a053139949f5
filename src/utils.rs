// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Utility Functions** - *Row-Major Bookkeeping*
//!
//! Shape arithmetic, argument checks and layout conversion shared by the kernels.
//!
//! All public buffers are row-major. The vendor routines behind `blas` and `lapack`
//! use the Fortran (column-major) convention, so LAPACK calls run on a column-major
//! scratch copy that is transposed in before and out after the call. Level 2 and 3
//! BLAS calls need no copy: a row-major `m × n` matrix is a column-major `n × m`
//! matrix with the same leading dimension, and the kernels swap operands instead.

use bytemuck::Pod;
use num_complex::Complex;

use crate::errors::{log_too_small, KernelError};

/// Clamps a caller-supplied dimension to `usize`; negative values become zero.
///
/// Callers validate signs separately, this only keeps extent arithmetic total.
#[inline(always)]
pub fn dim(v: i32) -> usize {
    v.max(0) as usize
}

/// Number of elements a row-major `rows × cols` matrix with leading dimension `ld` addresses.
#[inline(always)]
pub fn matrix_extent(rows: usize, cols: usize, ld: usize) -> usize {
    if rows == 0 || cols == 0 {
        0
    } else {
        (rows - 1) * ld + cols
    }
}

/// Number of elements a strided vector of length `n` addresses.
#[inline(always)]
pub fn vector_extent(n: usize, inc: i32) -> usize {
    if n == 0 {
        0
    } else {
        1 + (n - 1) * inc.unsigned_abs() as usize
    }
}

/// BLAS transpose character for a row-major transpose flag.
#[inline(always)]
pub fn trans_char(trans: bool) -> u8 {
    if trans { b'T' } else { b'N' }
}

/// Rejects negative dimensions.
pub fn check_non_negative(fname: &str, dims: &[(&str, i32)]) -> Result<(), KernelError> {
    for &(name, v) in dims {
        if v < 0 {
            return Err(KernelError::InvalidArguments(format!(
                "{} => {} must be non-negative, got {}",
                fname, name, v
            )));
        }
    }
    Ok(())
}

/// Row-major leading dimension must cover at least one full row.
pub fn check_leading_dim(fname: &str, name: &str, ld: i32, cols: i32) -> Result<(), KernelError> {
    if ld < cols.max(1) {
        return Err(KernelError::InvalidArguments(format!(
            "{} => {} must be >= max(1, {}), got {}",
            fname, name, cols, ld
        )));
    }
    Ok(())
}

/// Buffer length must cover the extent the shape parameters address.
#[inline]
pub fn check_len(fname: &str, buffer: &str, need: usize, have: usize) -> Result<(), KernelError> {
    if have < need {
        return Err(KernelError::OutOfBounds(log_too_small(fname, buffer, need, have)));
    }
    Ok(())
}

/// Copies a row-major `rows × cols` matrix into a fresh column-major buffer
/// with leading dimension `rows`.
pub fn to_col_major<T: Copy>(rows: usize, cols: usize, src: &[T], ld: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(rows * cols);
    for j in 0..cols {
        out.extend((0..rows).map(|i| src[i * ld + j]));
    }
    out
}

/// Writes a column-major `rows × cols` matrix (leading dimension `rows`) back into
/// a row-major buffer with leading dimension `ld`. Padding between rows is untouched.
pub fn from_col_major<T: Copy>(rows: usize, cols: usize, src: &[T], dst: &mut [T], ld: usize) {
    // an empty matrix addresses no elements, whatever `rows` says
    if rows == 0 || cols == 0 {
        return;
    }
    for i in 0..rows {
        let row = &mut dst[i * ld..i * ld + cols];
        for (j, v) in row.iter_mut().enumerate() {
            *v = src[j * rows + i];
        }
    }
}

/// Views an interleaved `[re, im, re, im, ..]` buffer as complex values.
///
/// Fails if the length is odd or the buffer is not aligned for `Complex<R>`.
pub fn as_complex<R: Pod>(buf: &[R]) -> Result<&[Complex<R>], KernelError>
where
    Complex<R>: Pod,
{
    bytemuck::try_cast_slice(buf).map_err(|e| {
        KernelError::LayoutMismatch(format!(
            "paired buffer of {} reals is not a complex buffer: {:?}",
            buf.len(),
            e
        ))
    })
}

/// Mutable counterpart of [`as_complex`].
pub fn as_complex_mut<R: Pod>(buf: &mut [R]) -> Result<&mut [Complex<R>], KernelError>
where
    Complex<R>: Pod,
{
    let len = buf.len();
    bytemuck::try_cast_slice_mut(buf).map_err(|e| {
        KernelError::LayoutMismatch(format!(
            "paired buffer of {} reals is not a complex buffer: {:?}",
            len, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extents() {
        assert_eq!(matrix_extent(0, 5, 5), 0);
        assert_eq!(matrix_extent(3, 0, 5), 0);
        assert_eq!(matrix_extent(3, 2, 2), 6);
        // sub-matrix view: last row only needs `cols` elements
        assert_eq!(matrix_extent(3, 2, 4), 10);
        assert_eq!(vector_extent(0, 3), 0);
        assert_eq!(vector_extent(4, 1), 4);
        assert_eq!(vector_extent(4, -2), 7);
        assert_eq!(dim(-3), 0);
    }

    #[test]
    fn test_col_major_roundtrip_with_padding() {
        // 2 × 3 row-major, ld = 4, padding marked with -1
        let src = [1.0, 2.0, 3.0, -1.0, 4.0, 5.0, 6.0];
        let cm = to_col_major(2, 3, &src, 4);
        assert_eq!(cm, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);

        let mut dst = [0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0];
        from_col_major(2, 3, &cm, &mut dst, 4);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_col_major_empty_shapes() {
        assert!(to_col_major::<f64>(3, 0, &[], 1).is_empty());
        assert!(to_col_major::<f64>(0, 3, &[], 3).is_empty());

        let mut dst: [f64; 0] = [];
        from_col_major(2, 0, &[], &mut dst, 1);
        from_col_major(0, 2, &[], &mut dst, 2);
    }

    #[test]
    fn test_checks() {
        assert!(check_non_negative("f", &[("m", 0), ("n", 3)]).is_ok());
        assert!(matches!(
            check_non_negative("f", &[("m", -1)]),
            Err(KernelError::InvalidArguments(_))
        ));
        assert!(check_leading_dim("f", "lda", 1, 0).is_ok());
        assert!(check_leading_dim("f", "lda", 0, 0).is_err());
        assert!(check_leading_dim("f", "lda", 2, 3).is_err());
        assert!(matches!(
            check_len("f", "A", 4, 3),
            Err(KernelError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_complex_view() {
        let mut raw = [1.0f64, 2.0, 3.0, -4.0];
        let c = as_complex(&raw).unwrap();
        assert_eq!(c, &[Complex::new(1.0, 2.0), Complex::new(3.0, -4.0)]);

        as_complex_mut(&mut raw).unwrap()[1] = Complex::new(0.5, 0.25);
        assert_eq!(raw, [1.0, 2.0, 0.5, 0.25]);

        let odd = [1.0f32, 2.0, 3.0];
        assert!(matches!(
            as_complex(&odd),
            Err(KernelError::LayoutMismatch(_))
        ));
        assert!(as_complex::<f32>(&[]).unwrap().is_empty());
    }
}
