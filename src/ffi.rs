// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **C Surface** - *Flat Foreign-Call Entry Points*
//!
//! One `extern "C"` symbol per operation and scalar kind, for array runtimes that
//! call in through a foreign-function bridge. Symbols end in `_f32`, `_f64`, `_c32`
//! or `_c64`.
//!
//! ## Conventions
//! - Buffers are raw row-major pointers. Complex kinds take interleaved
//!   `[re, im, ..]` real buffers, checked-cast to `Complex<R>` at entry.
//! - Slice lengths are derived from the shape parameters, so a buffer shorter than
//!   its shape addresses is a caller contract violation, exactly as with the vendor
//!   routines themselves.
//! - Factorisations and solvers return an `i32` status: `0` success, negative for
//!   an invalid argument, positive for singularity or non-convergence.
//! - Products return nothing. Rejected arguments are logged and leave the output
//!   untouched.

use core::slice;

use bytemuck::Pod;
use num_complex::{Complex, Complex32, Complex64};

use crate::config::STATUS_OK;
use crate::errors::{to_status, KernelError};
use crate::kernels::scientific::matrix::{
    eigen_values, eigen_values_split, inverse_matrix, matrix_dot, matrix_vector_dot,
    plu_matrix, qr_matrix, solve_linear_system,
};
use crate::kernels::scientific::vector::vector_dot;
use crate::traits::scalar::LinalgScalar;
use crate::utils::{as_complex, as_complex_mut, dim, matrix_extent, vector_extent};

/// Scalar kinds as they cross the C boundary.
///
/// Real kinds pass their own buffers; complex kinds pass `LANES = 2` reals per value.
pub trait RawKind: LinalgScalar {
    /// Element type of the raw buffer.
    type Raw: Pod;

    /// Raw elements per scalar.
    const LANES: usize;

    fn view(raw: &[Self::Raw]) -> Result<&[Self], KernelError>;

    fn view_mut(raw: &mut [Self::Raw]) -> Result<&mut [Self], KernelError>;
}

macro_rules! impl_raw_real {
    ($t:ty) => {
        impl RawKind for $t {
            type Raw = $t;
            const LANES: usize = 1;

            #[inline(always)]
            fn view(raw: &[$t]) -> Result<&[$t], KernelError> {
                Ok(raw)
            }

            #[inline(always)]
            fn view_mut(raw: &mut [$t]) -> Result<&mut [$t], KernelError> {
                Ok(raw)
            }
        }
    };
}

macro_rules! impl_raw_complex {
    ($t:ty, $real:ty) => {
        impl RawKind for $t {
            type Raw = $real;
            const LANES: usize = 2;

            #[inline(always)]
            fn view(raw: &[$real]) -> Result<&[$t], KernelError> {
                as_complex(raw)
            }

            #[inline(always)]
            fn view_mut(raw: &mut [$real]) -> Result<&mut [$t], KernelError> {
                as_complex_mut(raw)
            }
        }
    };
}

impl_raw_real!(f32);
impl_raw_real!(f64);
impl_raw_complex!(Complex32, f32);
impl_raw_complex!(Complex64, f64);

/// Borrows `len` elements from a raw pointer; null is accepted only for `len == 0`.
///
/// # Safety
/// `ptr` must be null or valid for reads and writes of `len` elements for `'a`, and
/// must not overlap any other slice borrowed for the same call.
unsafe fn plain_slice_mut<'a, E>(
    ptr: *mut E,
    len: usize,
    name: &str,
) -> Result<&'a mut [E], KernelError> {
    if len == 0 {
        return Ok(&mut []);
    }
    if ptr.is_null() {
        return Err(KernelError::NullPointer(name.to_string()));
    }
    Ok(slice::from_raw_parts_mut(ptr, len))
}

/// Borrows `len` scalars of kind `T` from a raw pointer.
///
/// # Safety
/// `ptr` must be null or valid for reads of `len * T::LANES` raw elements for `'a`.
unsafe fn raw_slice<'a, T: RawKind>(
    ptr: *const T::Raw,
    len: usize,
    name: &str,
) -> Result<&'a [T], KernelError> {
    if len == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(KernelError::NullPointer(name.to_string()));
    }
    T::view(slice::from_raw_parts(ptr, len * T::LANES))
}

/// Mutable counterpart of [`raw_slice`].
///
/// # Safety
/// As for [`plain_slice_mut`], over `len * T::LANES` raw elements.
unsafe fn raw_slice_mut<'a, T: RawKind>(
    ptr: *mut T::Raw,
    len: usize,
    name: &str,
) -> Result<&'a mut [T], KernelError> {
    T::view_mut(plain_slice_mut(ptr, len * T::LANES, name)?)
}

unsafe fn dot_raw<T: RawKind>(
    n: i32,
    x: *const T::Raw,
    incx: i32,
    y: *const T::Raw,
    incy: i32,
) -> Result<T, KernelError> {
    let x = raw_slice::<T>(x, vector_extent(dim(n), incx), "x")?;
    let y = raw_slice::<T>(y, vector_extent(dim(n), incy), "y")?;
    vector_dot(n, x, incx, y, incy)
}

unsafe fn solve_raw<T: RawKind>(
    n: i32,
    nrhs: i32,
    a: *mut T::Raw,
    lda: i32,
    b: *mut T::Raw,
    ldb: i32,
) -> Result<(), KernelError> {
    let a = raw_slice_mut::<T>(a, matrix_extent(dim(n), dim(n), dim(lda)), "A")?;
    let b = raw_slice_mut::<T>(b, matrix_extent(dim(n), dim(nrhs), dim(ldb)), "B")?;
    solve_linear_system(n, nrhs, a, lda, b, ldb)
}

unsafe fn inverse_raw<T: RawKind>(n: i32, a: *mut T::Raw, lda: i32) -> Result<(), KernelError> {
    let a = raw_slice_mut::<T>(a, matrix_extent(dim(n), dim(n), dim(lda)), "A")?;
    inverse_matrix(n, a, lda)
}

unsafe fn qr_raw<T: RawKind>(
    m: i32,
    n: i32,
    aq: *mut T::Raw,
    lda: i32,
    r: *mut T::Raw,
) -> Result<(), KernelError> {
    let aq = raw_slice_mut::<T>(aq, matrix_extent(dim(m), dim(n), dim(lda)), "AQ")?;
    let r = raw_slice_mut::<T>(r, dim(m.min(n)) * dim(n), "R")?;
    qr_matrix(m, n, aq, lda, r)
}

unsafe fn plu_raw<T: RawKind>(
    m: i32,
    n: i32,
    a: *mut T::Raw,
    lda: i32,
    ipiv: *mut i32,
) -> Result<(), KernelError> {
    let a = raw_slice_mut::<T>(a, matrix_extent(dim(m), dim(n), dim(lda)), "A")?;
    let ipiv = plain_slice_mut(ipiv, dim(m.min(n)), "ipiv")?;
    plu_matrix(m, n, a, lda, ipiv)
}

unsafe fn matrix_dot_raw<T: RawKind>(
    trans_a: bool,
    offset_a: i32,
    a: *const T::Raw,
    lda: i32,
    m: i32,
    n: i32,
    k: i32,
    trans_b: bool,
    offset_b: i32,
    b: *const T::Raw,
    ldb: i32,
    c: *mut T::Raw,
) -> Result<(), KernelError> {
    let (rows_a, cols_a) = if trans_a { (k, m) } else { (m, k) };
    let (rows_b, cols_b) = if trans_b { (n, k) } else { (k, n) };
    let a_len = dim(offset_a) + matrix_extent(dim(rows_a), dim(cols_a), dim(lda));
    let b_len = dim(offset_b) + matrix_extent(dim(rows_b), dim(cols_b), dim(ldb));
    let a = raw_slice::<T>(a, a_len, "A")?;
    let b = raw_slice::<T>(b, b_len, "B")?;
    let c = raw_slice_mut::<T>(c, dim(m) * dim(n), "C")?;
    matrix_dot(trans_a, offset_a, a, lda, m, n, k, trans_b, offset_b, b, ldb, c)
}

unsafe fn matrix_vector_dot_raw<T: RawKind>(
    trans_a: bool,
    offset_a: i32,
    a: *const T::Raw,
    lda: i32,
    m: i32,
    n: i32,
    x: *const T::Raw,
    incx: i32,
    y: *mut T::Raw,
) -> Result<(), KernelError> {
    let (len_x, len_y) = if trans_a { (m, n) } else { (n, m) };
    let a_len = dim(offset_a) + matrix_extent(dim(m), dim(n), dim(lda));
    let a = raw_slice::<T>(a, a_len, "A")?;
    let x = raw_slice::<T>(x, vector_extent(dim(len_x), incx), "x")?;
    let y = raw_slice_mut::<T>(y, dim(len_y), "y")?;
    matrix_vector_dot(trans_a, offset_a, a, lda, m, n, x, incx, y)
}

unsafe fn eigen_values_complex_raw<T>(
    n: i32,
    a: *const T::Raw,
    lda: i32,
    w: *mut T::Real,
) -> Result<(), KernelError>
where
    T: RawKind,
    Complex<T::Real>: Pod,
{
    let a = raw_slice::<T>(a, matrix_extent(dim(n), dim(n), dim(lda)), "A")?;
    // n complex values of the kind's real type, 2n reals
    let w = plain_slice_mut(w, 2 * dim(n), "w")?;
    eigen_values(n, a, lda, as_complex_mut(w)?)
}

/// Surface shared by every kind: solve, invert, QR, PLU and both products.
macro_rules! export_kernels {
    (
        $t:ty, $raw:ty,
        $solve:ident, $inverse:ident, $qr:ident, $plu:ident, $gemm:ident, $gemv:ident
    ) => {
        /// Solves `A·X = B`; `A` becomes its LU factors and `B` the solution.
        ///
        /// # Safety
        /// `a` and `b` must address `n × n` (row stride `lda`) and `n × nrhs`
        /// (row stride `ldb`) elements and must not overlap.
        #[no_mangle]
        pub unsafe extern "C" fn $solve(
            n: i32,
            nrhs: i32,
            a: *mut $raw,
            lda: i32,
            b: *mut $raw,
            ldb: i32,
        ) -> i32 {
            to_status(solve_raw::<$t>(n, nrhs, a, lda, b, ldb))
        }

        /// Inverts the `n × n` matrix in place.
        ///
        /// # Safety
        /// `a` must address `n × n` elements with row stride `lda`.
        #[no_mangle]
        pub unsafe extern "C" fn $inverse(n: i32, a: *mut $raw, lda: i32) -> i32 {
            to_status(inverse_raw::<$t>(n, a, lda))
        }

        /// QR decomposition: Q replaces the first `min(m, n)` columns of `aq`, R is
        /// written densely to `r` (`min(m, n) × n`).
        ///
        /// # Safety
        /// `aq` must address `m × n` elements with row stride `lda`; `r` must address
        /// `min(m, n) × n` elements. The buffers must not overlap.
        #[no_mangle]
        pub unsafe extern "C" fn $qr(
            m: i32,
            n: i32,
            aq: *mut $raw,
            lda: i32,
            r: *mut $raw,
        ) -> i32 {
            to_status(qr_raw::<$t>(m, n, aq, lda, r))
        }

        /// LU decomposition with partial pivoting, in place; pivots go to `ipiv`.
        ///
        /// # Safety
        /// `a` must address `m × n` elements with row stride `lda`; `ipiv` must hold
        /// `min(m, n)` entries.
        #[no_mangle]
        pub unsafe extern "C" fn $plu(
            m: i32,
            n: i32,
            a: *mut $raw,
            lda: i32,
            ipiv: *mut i32,
        ) -> i32 {
            to_status(plu_raw::<$t>(m, n, a, lda, ipiv))
        }

        /// `C = op(A)·op(B)`, `C` dense `m × n`.
        ///
        /// # Safety
        /// Operands must address the extents their shapes, offsets and leading
        /// dimensions describe; `c` must not overlap `a` or `b`.
        #[no_mangle]
        pub unsafe extern "C" fn $gemm(
            trans_a: bool,
            offset_a: i32,
            a: *const $raw,
            lda: i32,
            m: i32,
            n: i32,
            k: i32,
            trans_b: bool,
            offset_b: i32,
            b: *const $raw,
            ldb: i32,
            c: *mut $raw,
        ) {
            let res = matrix_dot_raw::<$t>(
                trans_a, offset_a, a, lda, m, n, k, trans_b, offset_b, b, ldb, c,
            );
            if let Err(e) = res {
                log::warn!("{}: {}", stringify!($gemm), e);
            }
        }

        /// `y = op(A)·x`, `y` unit stride.
        ///
        /// # Safety
        /// Operands must address the extents their shapes, offset, leading dimension
        /// and stride describe; `y` must not overlap `a` or `x`.
        #[no_mangle]
        pub unsafe extern "C" fn $gemv(
            trans_a: bool,
            offset_a: i32,
            a: *const $raw,
            lda: i32,
            m: i32,
            n: i32,
            x: *const $raw,
            incx: i32,
            y: *mut $raw,
        ) {
            let res = matrix_vector_dot_raw::<$t>(trans_a, offset_a, a, lda, m, n, x, incx, y);
            if let Err(e) = res {
                log::warn!("{}: {}", stringify!($gemv), e);
            }
        }
    };
}

export_kernels!(
    f32, f32,
    linalg_solve_linear_system_f32, linalg_inverse_matrix_f32, linalg_qr_matrix_f32,
    linalg_plu_matrix_f32, linalg_matrix_dot_f32, linalg_matrix_vector_dot_f32
);
export_kernels!(
    f64, f64,
    linalg_solve_linear_system_f64, linalg_inverse_matrix_f64, linalg_qr_matrix_f64,
    linalg_plu_matrix_f64, linalg_matrix_dot_f64, linalg_matrix_vector_dot_f64
);
export_kernels!(
    Complex32, f32,
    linalg_solve_linear_system_c32, linalg_inverse_matrix_c32, linalg_qr_matrix_c32,
    linalg_plu_matrix_c32, linalg_matrix_dot_c32, linalg_matrix_vector_dot_c32
);
export_kernels!(
    Complex64, f64,
    linalg_solve_linear_system_c64, linalg_inverse_matrix_c64, linalg_qr_matrix_c64,
    linalg_plu_matrix_c64, linalg_matrix_dot_c64, linalg_matrix_vector_dot_c64
);

// Dot products

/// Real inner product. Rejected arguments yield zero.
///
/// # Safety
/// `x` and `y` must address `n` elements at strides `incx` and `incy`.
#[no_mangle]
pub unsafe extern "C" fn linalg_vector_dot_f32(
    n: i32,
    x: *const f32,
    incx: i32,
    y: *const f32,
    incy: i32,
) -> f32 {
    dot_raw::<f32>(n, x, incx, y, incy).unwrap_or_else(|e| {
        log::warn!("linalg_vector_dot_f32: {}", e);
        0.0
    })
}

/// Real inner product. Rejected arguments yield zero.
///
/// # Safety
/// `x` and `y` must address `n` elements at strides `incx` and `incy`.
#[no_mangle]
pub unsafe extern "C" fn linalg_vector_dot_f64(
    n: i32,
    x: *const f64,
    incx: i32,
    y: *const f64,
    incy: i32,
) -> f64 {
    dot_raw::<f64>(n, x, incx, y, incy).unwrap_or_else(|e| {
        log::warn!("linalg_vector_dot_f64: {}", e);
        0.0
    })
}

/// Conjugated complex inner product, written to `out` as `[re, im]`.
///
/// # Safety
/// `x` and `y` must address `n` interleaved complex values at strides `incx` and
/// `incy`; `out` must be valid for two writes.
#[no_mangle]
pub unsafe extern "C" fn linalg_vector_dot_c32(
    n: i32,
    x: *const f32,
    incx: i32,
    y: *const f32,
    incy: i32,
    out: *mut f32,
) -> i32 {
    write_complex(dot_raw::<Complex32>(n, x, incx, y, incy), out)
}

/// Conjugated complex inner product, written to `out` as `[re, im]`.
///
/// # Safety
/// `x` and `y` must address `n` interleaved complex values at strides `incx` and
/// `incy`; `out` must be valid for two writes.
#[no_mangle]
pub unsafe extern "C" fn linalg_vector_dot_c64(
    n: i32,
    x: *const f64,
    incx: i32,
    y: *const f64,
    incy: i32,
    out: *mut f64,
) -> i32 {
    write_complex(dot_raw::<Complex64>(n, x, incx, y, incy), out)
}

unsafe fn write_complex<R: Copy>(res: Result<Complex<R>, KernelError>, out: *mut R) -> i32 {
    if out.is_null() {
        return to_status(Err(KernelError::NullPointer("out".to_string())));
    }
    match res {
        Ok(z) => {
            out.write(z.re);
            out.add(1).write(z.im);
            STATUS_OK
        }
        Err(e) => e.status(),
    }
}

// Eigenvalues

/// Eigenvalues of a real general matrix as separate real and imaginary parts.
///
/// # Safety
/// `a` must address `n × n` elements with row stride `lda`; `wr` and `wi` must each
/// hold `n` elements.
#[no_mangle]
pub unsafe extern "C" fn linalg_eigen_values_f32(
    n: i32,
    a: *const f32,
    lda: i32,
    wr: *mut f32,
    wi: *mut f32,
) -> i32 {
    to_status(eigen_split_raw::<f32>(n, a, lda, wr, wi))
}

/// Eigenvalues of a real general matrix as separate real and imaginary parts.
///
/// # Safety
/// `a` must address `n × n` elements with row stride `lda`; `wr` and `wi` must each
/// hold `n` elements.
#[no_mangle]
pub unsafe extern "C" fn linalg_eigen_values_f64(
    n: i32,
    a: *const f64,
    lda: i32,
    wr: *mut f64,
    wi: *mut f64,
) -> i32 {
    to_status(eigen_split_raw::<f64>(n, a, lda, wr, wi))
}

/// Eigenvalues of a complex general matrix, interleaved into `w`.
///
/// # Safety
/// `a` must address `n × n` interleaved complex values with row stride `lda`;
/// `w` must hold `2n` reals.
#[no_mangle]
pub unsafe extern "C" fn linalg_eigen_values_c32(
    n: i32,
    a: *const f32,
    lda: i32,
    w: *mut f32,
) -> i32 {
    to_status(eigen_values_complex_raw::<Complex32>(n, a, lda, w))
}

/// Eigenvalues of a complex general matrix, interleaved into `w`.
///
/// # Safety
/// `a` must address `n × n` interleaved complex values with row stride `lda`;
/// `w` must hold `2n` reals.
#[no_mangle]
pub unsafe extern "C" fn linalg_eigen_values_c64(
    n: i32,
    a: *const f64,
    lda: i32,
    w: *mut f64,
) -> i32 {
    to_status(eigen_values_complex_raw::<Complex64>(n, a, lda, w))
}

unsafe fn eigen_split_raw<T>(
    n: i32,
    a: *const T,
    lda: i32,
    wr: *mut T,
    wi: *mut T,
) -> Result<(), KernelError>
where
    T: RawKind<Raw = T> + LinalgScalar<Real = T>,
{
    let a = raw_slice::<T>(a, matrix_extent(dim(n), dim(n), dim(lda)), "A")?;
    let wr = raw_slice_mut::<T>(wr, dim(n), "wr")?;
    let wi = raw_slice_mut::<T>(wi, dim(n), "wi")?;
    eigen_values_split(n, a, lda, wr, wi)
}
