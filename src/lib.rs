// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under the Mozilla Public License (MPL) 2.0.
// See LICENSE for details.

//! # **linalg-kernels** - *Row-major BLAS/LAPACK adapter*
//!
//! Dense linear algebra over row-major buffers for `f32`, `f64`, `Complex32` and
//! `Complex64`, backed by the Fortran BLAS/LAPACK interface:
//!
//! - [`vector_dot`]: strided inner product (conjugated for complex kinds)
//! - [`matrix_dot`], [`matrix_vector_dot`]: GEMM and GEMV with element offsets
//! - [`solve_linear_system`], [`inverse_matrix`], [`qr_matrix`], [`plu_matrix`]
//! - [`eigen_values`], [`eigen_values_split`]: GEEV without eigenvectors
//!
//! The same operations are exported over a C ABI in [`ffi`].

// Link OpenBLAS when linear_algebra feature is enabled.
// This forces the linker to include the OpenBLAS symbols.
#[cfg(feature = "linear_algebra")]
extern crate openblas_src;

pub mod kernels {
    pub mod scientific {
        pub mod blas_lapack;
        pub mod matrix;
        pub mod vector;
    }
}

pub mod traits {
    pub mod scalar;
}

pub mod config;
pub mod errors;
pub mod ffi;
pub mod utils;

pub use errors::KernelError;
pub use kernels::scientific::matrix::{
    eigen_values, eigen_values_split, inverse_matrix, matrix_dot, matrix_vector_dot,
    plu_matrix, qr_matrix, solve_linear_system,
};
pub use kernels::scientific::vector::vector_dot;
pub use traits::scalar::LinalgScalar;
