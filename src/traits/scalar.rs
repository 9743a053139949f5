//! # **LinalgScalar trait** - *Per-kind BLAS/LAPACK dispatch*

// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

use core::fmt::Debug;

use bytemuck::Pod;
use num_complex::Complex;
use num_traits::{Float, One, Zero};

/// Vendor routine names for one scalar kind, used in logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutineNames {
    pub gesv: &'static str,
    pub getrf: &'static str,
    pub getri: &'static str,
    pub geqrf: &'static str,
    /// `?orgqr` for real kinds, `?ungqr` for complex kinds.
    pub orgqr: &'static str,
    pub geev: &'static str,
}

/// Scalar kinds with a BLAS/LAPACK binding: `f32`, `f64`, `Complex32` and `Complex64`.
///
/// Each method forwards to the kind's vendor entry point with Fortran (column-major)
/// semantics. Implementations live in `kernels::scientific::blas_lapack`; the generic
/// row-major kernels in `kernels::scientific::{vector, matrix}` are written once
/// against this trait.
///
/// # Safety
/// All methods are `unsafe` for the same reason the vendor bindings are: the vendor
/// reads and writes through the slices according to the shape arguments and does
/// not look at slice lengths. Callers must have checked every extent.
pub trait LinalgScalar:
    Copy + Zero + One + PartialEq + Debug + Send + Sync + Pod + 'static
{
    /// Underlying real type (`Self` for real kinds).
    type Real: Float + Pod + Debug + Send + Sync + 'static;

    /// Short kind tag used in logs: `f32`, `f64`, `c32` or `c64`.
    const KIND: &'static str;

    /// Vendor routine names for this kind.
    const NAMES: RoutineNames;

    /// Reads the optimal workspace length out of element 0 of a workspace query.
    fn workspace_len(self) -> usize;

    /// Level 1 inner product. Complex kinds conjugate `x` (`?dotc`).
    unsafe fn dot(n: i32, x: &[Self], incx: i32, y: &[Self], incy: i32) -> Self;

    /// `C ← α·op(A)·op(B) + β·C`.
    unsafe fn gemm(
        trans_a: u8,
        trans_b: u8,
        m: i32,
        n: i32,
        k: i32,
        alpha: Self,
        a: &[Self],
        lda: i32,
        b: &[Self],
        ldb: i32,
        beta: Self,
        c: &mut [Self],
        ldc: i32,
    );

    /// `y ← α·op(A)·x + β·y`.
    unsafe fn gemv(
        trans: u8,
        m: i32,
        n: i32,
        alpha: Self,
        a: &[Self],
        lda: i32,
        x: &[Self],
        incx: i32,
        beta: Self,
        y: &mut [Self],
        incy: i32,
    );

    unsafe fn gesv(
        n: i32,
        nrhs: i32,
        a: &mut [Self],
        lda: i32,
        ipiv: &mut [i32],
        b: &mut [Self],
        ldb: i32,
        info: &mut i32,
    );

    unsafe fn getrf(m: i32, n: i32, a: &mut [Self], lda: i32, ipiv: &mut [i32], info: &mut i32);

    unsafe fn getri(
        n: i32,
        a: &mut [Self],
        lda: i32,
        ipiv: &[i32],
        work: &mut [Self],
        lwork: i32,
        info: &mut i32,
    );

    unsafe fn geqrf(
        m: i32,
        n: i32,
        a: &mut [Self],
        lda: i32,
        tau: &mut [Self],
        work: &mut [Self],
        lwork: i32,
        info: &mut i32,
    );

    /// Forms the explicit orthogonal (unitary) factor from `geqrf` reflectors.
    unsafe fn orgqr(
        m: i32,
        n: i32,
        k: i32,
        a: &mut [Self],
        lda: i32,
        tau: &[Self],
        work: &mut [Self],
        lwork: i32,
        info: &mut i32,
    );

    /// Eigenvalues of a general square matrix (`?geev`, no eigenvectors).
    ///
    /// Destroys `a`. Writes `n` eigenvalues to `w` and returns the vendor `info`.
    /// Owns its workspace query and scratch since the real and complex drivers
    /// take different scratch arguments.
    unsafe fn geev_values(n: i32, a: &mut [Self], lda: i32, w: &mut [Complex<Self::Real>])
        -> i32;
}
