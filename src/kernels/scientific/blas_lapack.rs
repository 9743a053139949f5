// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **BLAS/LAPACK Integration Module** - *Per-Kind Vendor Dispatch*
//!
//! Binds [`LinalgScalar`] to the vendor entry points for each supported scalar kind.
//! This is the only module that calls into `blas` and `lapack`; everything above it
//! is generic.
//!
//! ## Dispatch table
//!
//! | Operation     | `f32`    | `f64`    | `Complex32` | `Complex64` |
//! |---------------|----------|----------|-------------|-------------|
//! | dot           | `sdot`   | `ddot`   | `cdotc`     | `zdotc`     |
//! | gemm          | `sgemm`  | `dgemm`  | `cgemm`     | `zgemm`     |
//! | gemv          | `sgemv`  | `dgemv`  | `cgemv`     | `zgemv`     |
//! | gesv          | `sgesv`  | `dgesv`  | `cgesv`     | `zgesv`     |
//! | getrf / getri | `sgetr*` | `dgetr*` | `cgetr*`    | `zgetr*`    |
//! | geqrf         | `sgeqrf` | `dgeqrf` | `cgeqrf`    | `zgeqrf`    |
//! | orgqr         | `sorgqr` | `dorgqr` | `cungqr`    | `zungqr`    |
//! | geev          | `sgeev`  | `dgeev`  | `cgeev`     | `zgeev`     |
//!
//! ## External Dependencies
//!
//! This module requires linking against BLAS and LAPACK.
//!
//! Supported implementations include:
//! - OpenBLAS - linked by the default `linear_algebra` feature
//! - Intel MKL - optimal for Intel processors
//! - ATLAS, Accelerate, or system-provided BLAS/LAPACK
use blas::*;
use lapack::*;
use num_complex::{Complex, Complex32, Complex64};
use num_traits::ToPrimitive;

use crate::config::{GEEV_WORKSPACE_FACTOR, MIN_WORKSPACE};
use crate::traits::scalar::{LinalgScalar, RoutineNames};

macro_rules! impl_real_scalar {
    (
        $t:ty, $kind:literal,
        $dot:ident, $gemm:ident, $gemv:ident, $gesv:ident, $getrf:ident, $getri:ident,
        $geqrf:ident, $orgqr:ident, $geev:ident
    ) => {
        impl LinalgScalar for $t {
            type Real = $t;

            const KIND: &'static str = $kind;

            const NAMES: RoutineNames = RoutineNames {
                gesv: stringify!($gesv),
                getrf: stringify!($getrf),
                getri: stringify!($getri),
                geqrf: stringify!($geqrf),
                orgqr: stringify!($orgqr),
                geev: stringify!($geev),
            };

            #[inline(always)]
            fn workspace_len(self) -> usize {
                self.to_usize().unwrap_or(0)
            }

            #[inline(always)]
            unsafe fn dot(n: i32, x: &[Self], incx: i32, y: &[Self], incy: i32) -> Self {
                $dot(n, x, incx, y, incy)
            }

            #[inline(always)]
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
            ) {
                $gemm(trans_a, trans_b, m, n, k, alpha, a, lda, b, ldb, beta, c, ldc)
            }

            #[inline(always)]
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
            ) {
                $gemv(trans, m, n, alpha, a, lda, x, incx, beta, y, incy)
            }

            #[inline(always)]
            unsafe fn gesv(
                n: i32,
                nrhs: i32,
                a: &mut [Self],
                lda: i32,
                ipiv: &mut [i32],
                b: &mut [Self],
                ldb: i32,
                info: &mut i32,
            ) {
                $gesv(n, nrhs, a, lda, ipiv, b, ldb, info)
            }

            #[inline(always)]
            unsafe fn getrf(
                m: i32,
                n: i32,
                a: &mut [Self],
                lda: i32,
                ipiv: &mut [i32],
                info: &mut i32,
            ) {
                $getrf(m, n, a, lda, ipiv, info)
            }

            #[inline(always)]
            unsafe fn getri(
                n: i32,
                a: &mut [Self],
                lda: i32,
                ipiv: &[i32],
                work: &mut [Self],
                lwork: i32,
                info: &mut i32,
            ) {
                $getri(n, a, lda, ipiv, work, lwork, info)
            }

            #[inline(always)]
            unsafe fn geqrf(
                m: i32,
                n: i32,
                a: &mut [Self],
                lda: i32,
                tau: &mut [Self],
                work: &mut [Self],
                lwork: i32,
                info: &mut i32,
            ) {
                $geqrf(m, n, a, lda, tau, work, lwork, info)
            }

            #[inline(always)]
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
            ) {
                $orgqr(m, n, k, a, lda, tau, work, lwork, info)
            }

            unsafe fn geev_values(
                n: i32,
                a: &mut [Self],
                lda: i32,
                w: &mut [Complex<Self::Real>],
            ) -> i32 {
                let nu = n.max(0) as usize;
                let mut wr = vec![0.0 as $t; nu.max(1)];
                let mut wi = vec![0.0 as $t; nu.max(1)];
                // not referenced with jobvl = jobvr = 'N'
                let mut vl = [0.0 as $t; 1];
                let mut vr = [0.0 as $t; 1];
                let mut info = 0;

                // Workspace query
                let mut work_q = [0.0 as $t];
                $geev(
                    b'N', b'N', n, a, lda, &mut wr, &mut wi, &mut vl, 1, &mut vr, 1,
                    &mut work_q, -1, &mut info,
                );
                if info != 0 {
                    return info;
                }

                let lwork = work_q[0]
                    .workspace_len()
                    .max(GEEV_WORKSPACE_FACTOR * nu)
                    .max(MIN_WORKSPACE);
                let mut work = vec![0.0 as $t; lwork];
                $geev(
                    b'N', b'N', n, a, lda, &mut wr, &mut wi, &mut vl, 1, &mut vr, 1,
                    &mut work, lwork as i32, &mut info,
                );
                if info >= 0 {
                    for (dst, (&re, &im)) in w.iter_mut().zip(wr.iter().zip(wi.iter())).take(nu) {
                        *dst = Complex::new(re, im);
                    }
                }
                info
            }
        }
    };
}

macro_rules! impl_complex_scalar {
    (
        $t:ty, $real:ty, $kind:literal,
        $dotc:ident, $gemm:ident, $gemv:ident, $gesv:ident, $getrf:ident, $getri:ident,
        $geqrf:ident, $ungqr:ident, $geev:ident
    ) => {
        impl LinalgScalar for $t {
            type Real = $real;

            const KIND: &'static str = $kind;

            const NAMES: RoutineNames = RoutineNames {
                gesv: stringify!($gesv),
                getrf: stringify!($getrf),
                getri: stringify!($getri),
                geqrf: stringify!($geqrf),
                orgqr: stringify!($ungqr),
                geev: stringify!($geev),
            };

            #[inline(always)]
            fn workspace_len(self) -> usize {
                self.re.to_usize().unwrap_or(0)
            }

            #[inline(always)]
            unsafe fn dot(n: i32, x: &[Self], incx: i32, y: &[Self], incy: i32) -> Self {
                // complex dot returns through an out-slot in the Fortran binding
                let mut res = [<$t>::new(0.0, 0.0)];
                $dotc(&mut res, n, x, incx, y, incy);
                res[0]
            }

            #[inline(always)]
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
            ) {
                $gemm(trans_a, trans_b, m, n, k, alpha, a, lda, b, ldb, beta, c, ldc)
            }

            #[inline(always)]
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
            ) {
                $gemv(trans, m, n, alpha, a, lda, x, incx, beta, y, incy)
            }

            #[inline(always)]
            unsafe fn gesv(
                n: i32,
                nrhs: i32,
                a: &mut [Self],
                lda: i32,
                ipiv: &mut [i32],
                b: &mut [Self],
                ldb: i32,
                info: &mut i32,
            ) {
                $gesv(n, nrhs, a, lda, ipiv, b, ldb, info)
            }

            #[inline(always)]
            unsafe fn getrf(
                m: i32,
                n: i32,
                a: &mut [Self],
                lda: i32,
                ipiv: &mut [i32],
                info: &mut i32,
            ) {
                $getrf(m, n, a, lda, ipiv, info)
            }

            #[inline(always)]
            unsafe fn getri(
                n: i32,
                a: &mut [Self],
                lda: i32,
                ipiv: &[i32],
                work: &mut [Self],
                lwork: i32,
                info: &mut i32,
            ) {
                $getri(n, a, lda, ipiv, work, lwork, info)
            }

            #[inline(always)]
            unsafe fn geqrf(
                m: i32,
                n: i32,
                a: &mut [Self],
                lda: i32,
                tau: &mut [Self],
                work: &mut [Self],
                lwork: i32,
                info: &mut i32,
            ) {
                $geqrf(m, n, a, lda, tau, work, lwork, info)
            }

            #[inline(always)]
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
            ) {
                $ungqr(m, n, k, a, lda, tau, work, lwork, info)
            }

            unsafe fn geev_values(
                n: i32,
                a: &mut [Self],
                lda: i32,
                w: &mut [Complex<Self::Real>],
            ) -> i32 {
                let nu = n.max(0) as usize;
                let zero = <$t>::new(0.0, 0.0);
                let mut vl = [zero; 1];
                let mut vr = [zero; 1];
                let mut rwork = vec![0.0 as $real; (2 * nu).max(1)];
                let mut info = 0;

                // Workspace query
                let mut work_q = [zero];
                $geev(
                    b'N', b'N', n, a, lda, w, &mut vl, 1, &mut vr, 1, &mut work_q, -1,
                    &mut rwork, &mut info,
                );
                if info != 0 {
                    return info;
                }

                let lwork = work_q[0]
                    .workspace_len()
                    .max(GEEV_WORKSPACE_FACTOR * nu)
                    .max(MIN_WORKSPACE);
                let mut work = vec![zero; lwork];
                $geev(
                    b'N', b'N', n, a, lda, w, &mut vl, 1, &mut vr, 1, &mut work,
                    lwork as i32, &mut rwork, &mut info,
                );
                info
            }
        }
    };
}

impl_real_scalar!(f32, "f32", sdot, sgemm, sgemv, sgesv, sgetrf, sgetri, sgeqrf, sorgqr, sgeev);
impl_real_scalar!(f64, "f64", ddot, dgemm, dgemv, dgesv, dgetrf, dgetri, dgeqrf, dorgqr, dgeev);
impl_complex_scalar!(
    Complex32, f32, "c32", cdotc, cgemm, cgemv, cgesv, cgetrf, cgetri, cgeqrf, cungqr, cgeev
);
impl_complex_scalar!(
    Complex64, f64, "c64", zdotc, zgemm, zgemv, zgesv, zgetrf, zgetri, zgeqrf, zungqr, zgeev
);
