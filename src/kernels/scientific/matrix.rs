// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Matrix Kernels Module** - *Row-Major Products, Factorisations and Solvers*
//!
//! Generic row-major front ends over the vendor routines bound in
//! [`blas_lapack`](super::blas_lapack). One implementation serves every
//! [`LinalgScalar`] kind.
//!
//! ## Conventions
//! - Every matrix is row-major with an explicit leading dimension (`ld* >= cols`),
//!   so sub-matrix views pass through unchanged.
//! - Products overwrite their output (`α = 1`, `β = 0`).
//! - Factorisations work in place. LAPACK runs on a column-major scratch copy which
//!   is written back before returning, so callers only ever see row-major data.
//! - Scratch (pivots, reflector scalars, workspace, layout copies) is heap-allocated
//!   per call and dropped on every return path.
//! - Vendor status is returned as `KernelError`; [`KernelError::status`] recovers
//!   the integer code.

use num_complex::Complex;

use crate::config::MIN_WORKSPACE;
use crate::errors::{check_info, no_convergence, singular, KernelError};
use crate::traits::scalar::LinalgScalar;
use crate::utils::{
    check_leading_dim, check_len, check_non_negative, dim, from_col_major, matrix_extent,
    to_col_major, trans_char, vector_extent,
};

/// Matrix–matrix product: C ← op(A)·op(B) (row-major).
///
/// `op(X)` is `X` or `Xᵀ` per the transpose flags. No conjugation is applied to
/// complex operands. `C` is `m × n`, dense, leading dimension `n`; its previous
/// contents are ignored.
///
/// Arguments
/// - `trans_a`:  If true, A is stored `k × m` and transposed; otherwise stored `m × k`.
/// - `offset_a`: Element offset of A's first entry within `a`.
/// - `lda`:      Row stride of the stored A.
/// - `m`, `n`, `k`: `op(A)` is `m × k`, `op(B)` is `k × n`.
/// - `trans_b`, `offset_b`, `ldb`: as for A, with B stored `k × n` (or `n × k`).
///
/// A nonzero offset is equivalent to slicing the operand first.
///
/// Returns
/// - `Ok(())` on success.
/// - `Err(KernelError::InvalidArguments | OutOfBounds)` if a shape or buffer is invalid.
#[inline(always)]
pub fn matrix_dot<T: LinalgScalar>(
    trans_a: bool,
    offset_a: i32,
    a: &[T],
    lda: i32,
    m: i32,
    n: i32,
    k: i32,
    trans_b: bool,
    offset_b: i32,
    b: &[T],
    ldb: i32,
    c: &mut [T],
) -> Result<(), KernelError> {
    const FNAME: &str = "matrix_dot";
    check_non_negative(
        FNAME,
        &[("m", m), ("n", n), ("k", k), ("offset_a", offset_a), ("offset_b", offset_b)],
    )?;

    // stored shapes
    let (rows_a, cols_a) = if trans_a { (k, m) } else { (m, k) };
    let (rows_b, cols_b) = if trans_b { (n, k) } else { (k, n) };
    check_leading_dim(FNAME, "lda", lda, cols_a)?;
    check_leading_dim(FNAME, "ldb", ldb, cols_b)?;

    let (off_a, off_b) = (offset_a as usize, offset_b as usize);
    check_len(
        FNAME,
        "A",
        off_a + matrix_extent(dim(rows_a), dim(cols_a), lda as usize),
        a.len(),
    )?;
    check_len(
        FNAME,
        "B",
        off_b + matrix_extent(dim(rows_b), dim(cols_b), ldb as usize),
        b.len(),
    )?;
    check_len(FNAME, "C", dim(m) * dim(n), c.len())?;

    if m == 0 || n == 0 {
        return Ok(());
    }

    // Row-major C is column-major Cᵀ = op(B)ᵀ·op(A)ᵀ, and each row-major operand
    // already reads as its own transpose in column-major, so the operands swap
    // and the flags carry over unchanged.
    unsafe {
        T::gemm(
            trans_char(trans_b),
            trans_char(trans_a),
            n,
            m,
            k,
            T::one(),
            &b[off_b..],
            ldb,
            &a[off_a..],
            lda,
            T::zero(),
            c,
            n,
        );
    }
    Ok(())
}

/// Matrix–vector product: y ← op(A)·x (row-major).
///
/// A is stored `m × n` with row stride `lda`, starting `offset_a` elements into `a`.
/// The product has `m` entries when `trans_a` is false and `n` entries when true;
/// `x` has the other length and stride `incx`. `y` is written with unit stride.
///
/// Returns
/// - `Ok(())` on success.
/// - `Err(KernelError::InvalidArguments | OutOfBounds)` if a shape or buffer is invalid.
#[inline(always)]
pub fn matrix_vector_dot<T: LinalgScalar>(
    trans_a: bool,
    offset_a: i32,
    a: &[T],
    lda: i32,
    m: i32,
    n: i32,
    x: &[T],
    incx: i32,
    y: &mut [T],
) -> Result<(), KernelError> {
    const FNAME: &str = "matrix_vector_dot";
    check_non_negative(FNAME, &[("m", m), ("n", n), ("offset_a", offset_a)])?;
    check_leading_dim(FNAME, "lda", lda, n)?;
    if incx == 0 {
        return Err(KernelError::InvalidArguments(format!(
            "{} => incx must be non-zero",
            FNAME
        )));
    }

    let (len_x, len_y) = if trans_a { (m, n) } else { (n, m) };
    let off_a = offset_a as usize;
    check_len(
        FNAME,
        "A",
        off_a + matrix_extent(dim(m), dim(n), lda as usize),
        a.len(),
    )?;
    check_len(FNAME, "x", vector_extent(dim(len_x), incx), x.len())?;
    check_len(FNAME, "y", dim(len_y), y.len())?;

    if m == 0 || n == 0 {
        // empty inner dimension: the product is all zeros
        y[..dim(len_y)].fill(T::zero());
        return Ok(());
    }

    // Row-major A is column-major Aᵀ (n × m), so the flag inverts.
    unsafe {
        T::gemv(
            trans_char(!trans_a),
            n,
            m,
            T::one(),
            &a[off_a..],
            lda,
            x,
            incx,
            T::zero(),
            y,
            1,
        );
    }
    Ok(())
}

/// Solves A·X = B via LU factorisation with partial pivoting.
///
/// `A` is `n × n` (row stride `lda`) and is overwritten by its L and U factors.
/// `B` is `n × nrhs` (row stride `ldb`) and is overwritten by the solution X.
/// The pivot sequence is internal scratch and is discarded.
///
/// Returns
/// - `Ok(())` on success.
/// - `Err(KernelError::Singular { pivot, .. })` if `U(pivot, pivot)` is exactly zero;
///   the system has no unique solution and `B` holds no solution.
/// - `Err(KernelError::InvalidArguments | OutOfBounds | IllegalValue)` on bad input.
pub fn solve_linear_system<T: LinalgScalar>(
    n: i32,
    nrhs: i32,
    a: &mut [T],
    lda: i32,
    b: &mut [T],
    ldb: i32,
) -> Result<(), KernelError> {
    const FNAME: &str = "solve_linear_system";
    check_non_negative(FNAME, &[("n", n), ("nrhs", nrhs)])?;
    check_leading_dim(FNAME, "lda", lda, n)?;
    check_leading_dim(FNAME, "ldb", ldb, nrhs)?;
    let (nu, nrhs_u) = (n as usize, nrhs as usize);
    check_len(FNAME, "A", matrix_extent(nu, nu, lda as usize), a.len())?;
    check_len(FNAME, "B", matrix_extent(nu, nrhs_u, ldb as usize), b.len())?;

    log::trace!("{}: {} n={} nrhs={}", FNAME, T::NAMES.gesv, n, nrhs);

    let ld = n.max(1);
    let mut a_cm = to_col_major(nu, nu, a, lda as usize);
    let mut b_cm = to_col_major(nu, nrhs_u, b, ldb as usize);
    let mut ipiv = vec![0i32; nu.max(1)];
    let mut info = 0;
    unsafe { T::gesv(n, nrhs, &mut a_cm, ld, &mut ipiv, &mut b_cm, ld, &mut info) };

    if info >= 0 {
        from_col_major(nu, nu, &a_cm, a, lda as usize);
        from_col_major(nu, nrhs_u, &b_cm, b, ldb as usize);
    }
    check_info(T::NAMES.gesv, info, singular)
}

/// Inverts a square matrix in place (GETRF then GETRI).
///
/// If the factorisation reports a failure, that status is returned and the
/// inversion step is not attempted; `A` then holds the LU factors.
///
/// Returns
/// - `Ok(())` on success, with `A` replaced by `A⁻¹`.
/// - `Err(KernelError::Singular { .. })` if `A` is singular.
/// - `Err(KernelError::InvalidArguments | OutOfBounds | IllegalValue)` on bad input.
pub fn inverse_matrix<T: LinalgScalar>(n: i32, a: &mut [T], lda: i32) -> Result<(), KernelError> {
    const FNAME: &str = "inverse_matrix";
    check_non_negative(FNAME, &[("n", n)])?;
    check_leading_dim(FNAME, "lda", lda, n)?;
    let nu = n as usize;
    check_len(FNAME, "A", matrix_extent(nu, nu, lda as usize), a.len())?;

    log::trace!("{}: {}+{} n={}", FNAME, T::NAMES.getrf, T::NAMES.getri, n);

    let ld = n.max(1);
    let mut a_cm = to_col_major(nu, nu, a, lda as usize);
    let mut ipiv = vec![0i32; nu.max(1)];
    let mut info = 0;

    unsafe { T::getrf(n, n, &mut a_cm, ld, &mut ipiv, &mut info) };
    if info != 0 {
        if info > 0 {
            from_col_major(nu, nu, &a_cm, a, lda as usize);
        }
        return check_info(T::NAMES.getrf, info, singular);
    }

    // Workspace query
    let mut work_q = [T::zero()];
    unsafe { T::getri(n, &mut a_cm, ld, &ipiv, &mut work_q, -1, &mut info) };
    check_info(T::NAMES.getri, info, singular)?;

    let lwork = work_q[0].workspace_len().max(nu).max(MIN_WORKSPACE);
    let mut work = vec![T::zero(); lwork];
    unsafe { T::getri(n, &mut a_cm, ld, &ipiv, &mut work, lwork as i32, &mut info) };

    if info >= 0 {
        from_col_major(nu, nu, &a_cm, a, lda as usize);
    }
    check_info(T::NAMES.getri, info, singular)
}

/// QR decomposition: A = Q·R.
///
/// On entry `aq` holds the `m × n` matrix A (row stride `lda`). On success:
/// - the first `min(m, n)` columns of `aq` hold Q, with orthonormal columns
///   (unitary for complex kinds);
/// - `r` holds R as a dense row-major `min(m, n) × n` matrix with leading dimension `n`,
///   zero below the diagonal.
///
/// R is extracted from the compact GEQRF result before Q is formed, since forming Q
/// overwrites the triangle. If GEQRF fails the call returns at once: `r` is untouched
/// and Q is not formed.
///
/// Returns
/// - `Ok(())` on success.
/// - `Err(KernelError::InvalidArguments | OutOfBounds | IllegalValue)` on bad input.
pub fn qr_matrix<T: LinalgScalar>(
    m: i32,
    n: i32,
    aq: &mut [T],
    lda: i32,
    r: &mut [T],
) -> Result<(), KernelError> {
    const FNAME: &str = "qr_matrix";
    check_non_negative(FNAME, &[("m", m), ("n", n)])?;
    check_leading_dim(FNAME, "lda", lda, n)?;
    let (mu, nu) = (m as usize, n as usize);
    let k = m.min(n);
    let ku = k as usize;
    check_len(FNAME, "AQ", matrix_extent(mu, nu, lda as usize), aq.len())?;
    check_len(FNAME, "R", ku * nu, r.len())?;

    log::trace!("{}: {}+{} m={} n={}", FNAME, T::NAMES.geqrf, T::NAMES.orgqr, m, n);

    let ld = m.max(1);
    let mut a_cm = to_col_major(mu, nu, aq, lda as usize);
    let mut tau = vec![T::zero(); ku.max(1)];
    let mut info = 0;

    // 1. compact factorisation: R on and above the diagonal, reflectors below
    let mut work_q = [T::zero()];
    unsafe { T::geqrf(m, n, &mut a_cm, ld, &mut tau, &mut work_q, -1, &mut info) };
    check_info(T::NAMES.geqrf, info, singular)?;
    let lwork = work_q[0].workspace_len().max(nu).max(MIN_WORKSPACE);
    let mut work = vec![T::zero(); lwork];
    unsafe { T::geqrf(m, n, &mut a_cm, ld, &mut tau, &mut work, lwork as i32, &mut info) };
    check_info(T::NAMES.geqrf, info, singular)?;

    // 2. extract R while the triangle is still intact
    for i in 0..ku {
        let row = &mut r[i * nu..(i + 1) * nu];
        row[..i].fill(T::zero());
        for (j, v) in row.iter_mut().enumerate().skip(i) {
            *v = a_cm[j * mu + i];
        }
    }

    // 3. expand the first k reflectors into Q; columns k.. keep the GEQRF output
    let mut work_q = [T::zero()];
    unsafe { T::orgqr(m, k, k, &mut a_cm, ld, &tau, &mut work_q, -1, &mut info) };
    check_info(T::NAMES.orgqr, info, singular)?;
    let lwork = work_q[0].workspace_len().max(ku).max(MIN_WORKSPACE);
    let mut work = vec![T::zero(); lwork];
    unsafe { T::orgqr(m, k, k, &mut a_cm, ld, &tau, &mut work, lwork as i32, &mut info) };
    check_info(T::NAMES.orgqr, info, singular)?;

    from_col_major(mu, nu, &a_cm, aq, lda as usize);
    Ok(())
}

/// LU decomposition with partial pivoting: P·A = L·U, in place.
///
/// On exit the strict lower triangle of `a` holds L (unit diagonal implied) and the
/// upper triangle holds U. `ipiv[i]` (1-based) is the row interchanged with row `i + 1`.
/// `ipiv` must hold at least `min(m, n)` entries.
///
/// Returns
/// - `Ok(())` on success.
/// - `Err(KernelError::Singular { pivot, .. })` if `U(pivot, pivot)` is exactly zero.
///   The factorisation is still complete and written back.
/// - `Err(KernelError::InvalidArguments | OutOfBounds | IllegalValue)` on bad input.
pub fn plu_matrix<T: LinalgScalar>(
    m: i32,
    n: i32,
    a: &mut [T],
    lda: i32,
    ipiv: &mut [i32],
) -> Result<(), KernelError> {
    const FNAME: &str = "plu_matrix";
    check_non_negative(FNAME, &[("m", m), ("n", n)])?;
    check_leading_dim(FNAME, "lda", lda, n)?;
    let (mu, nu) = (m as usize, n as usize);
    check_len(FNAME, "A", matrix_extent(mu, nu, lda as usize), a.len())?;
    check_len(FNAME, "ipiv", mu.min(nu), ipiv.len())?;

    log::trace!("{}: {} m={} n={}", FNAME, T::NAMES.getrf, m, n);

    let mut a_cm = to_col_major(mu, nu, a, lda as usize);
    let mut info = 0;
    unsafe { T::getrf(m, n, &mut a_cm, m.max(1), ipiv, &mut info) };

    if info >= 0 {
        from_col_major(mu, nu, &a_cm, a, lda as usize);
    }
    check_info(T::NAMES.getrf, info, singular)
}

/// Eigenvalues of a general (non-symmetric) square matrix.
///
/// Writes the `n` eigenvalues to `w` as complex values for every scalar kind. For real
/// kinds complex eigenvalues come in conjugate pairs, the one with positive imaginary
/// part first. `a` is read only; the vendor routine works on a private copy.
///
/// Returns
/// - `Ok(())` on success.
/// - `Err(KernelError::NoConvergence { index, .. })` if the QR algorithm failed;
///   entries `index..n` of `w` then hold the eigenvalues that did converge.
/// - `Err(KernelError::InvalidArguments | OutOfBounds | IllegalValue)` on bad input.
pub fn eigen_values<T: LinalgScalar>(
    n: i32,
    a: &[T],
    lda: i32,
    w: &mut [Complex<T::Real>],
) -> Result<(), KernelError> {
    const FNAME: &str = "eigen_values";
    check_non_negative(FNAME, &[("n", n)])?;
    check_leading_dim(FNAME, "lda", lda, n)?;
    let nu = n as usize;
    check_len(FNAME, "A", matrix_extent(nu, nu, lda as usize), a.len())?;
    check_len(FNAME, "w", nu, w.len())?;

    log::trace!("{}: {} n={}", FNAME, T::NAMES.geev, n);

    // GEEV destroys its input, so it runs on the scratch copy
    let mut a_cm = to_col_major(nu, nu, a, lda as usize);
    let info = unsafe { T::geev_values(n, &mut a_cm, n.max(1), w) };
    check_info(T::NAMES.geev, info, no_convergence)
}

/// Eigenvalues of a real general matrix as separate real and imaginary parts.
///
/// Same contract as [`eigen_values`]; `wr[i] + i·wi[i]` is the `i`-th eigenvalue.
pub fn eigen_values_split<T>(
    n: i32,
    a: &[T],
    lda: i32,
    wr: &mut [T],
    wi: &mut [T],
) -> Result<(), KernelError>
where
    T: LinalgScalar<Real = T>,
{
    const FNAME: &str = "eigen_values_split";
    check_non_negative(FNAME, &[("n", n)])?;
    let nu = n as usize;
    check_len(FNAME, "wr", nu, wr.len())?;
    check_len(FNAME, "wi", nu, wi.len())?;

    let mut w = vec![Complex::new(T::zero(), T::zero()); nu];
    let res = eigen_values(n, a, lda, &mut w);
    if matches!(res, Ok(()) | Err(KernelError::NoConvergence { .. })) {
        for (i, z) in w.iter().enumerate() {
            wr[i] = z.re;
            wi[i] = z.im;
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use num_complex::Complex64;

    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn test_matrix_dot_identity() {
        let id = [1.0f64, 0.0, 0.0, 1.0];
        let b = [3.0f64, -1.0, 2.5, 7.0];
        let mut c = [f64::NAN; 4];
        matrix_dot(false, 0, &id, 2, 2, 2, 2, false, 0, &b, 2, &mut c).unwrap();
        assert_eq!(c, b);
    }

    #[test]
    fn test_matrix_dot_rectangular_row_major() {
        // A: 2×3, B: 3×2
        let a = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [7.0f64, 8.0, 9.0, 10.0, 11.0, 12.0];
        let mut c = [0.0f64; 4];
        matrix_dot(false, 0, &a, 3, 2, 2, 3, false, 0, &b, 2, &mut c).unwrap();
        assert_eq!(c, [58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn test_matrix_dot_transposes() {
        // Aᵀ stored as 3×2, Bᵀ stored as 2×3; same product as above
        let at = [1.0f64, 4.0, 2.0, 5.0, 3.0, 6.0];
        let bt = [7.0f64, 9.0, 11.0, 8.0, 10.0, 12.0];
        let mut c = [0.0f64; 4];
        matrix_dot(true, 0, &at, 2, 2, 2, 3, true, 0, &bt, 3, &mut c).unwrap();
        assert_eq!(c, [58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn test_matrix_dot_offset_matches_preslice() {
        // 3×4 parent; take the 2×2 block at (1, 1) with lda = 4
        let parent = [
            0.0f64, 0.0, 0.0, 0.0, //
            0.0, 1.0, 2.0, 0.0, //
            0.0, 3.0, 4.0, 0.0,
        ];
        let b = [5.0f64, 6.0, 7.0, 8.0];
        let mut via_offset = [0.0f64; 4];
        matrix_dot(false, 5, &parent, 4, 2, 2, 2, false, 0, &b, 2, &mut via_offset).unwrap();

        let mut via_slice = [0.0f64; 4];
        matrix_dot(false, 0, &parent[5..], 4, 2, 2, 2, false, 0, &b, 2, &mut via_slice)
            .unwrap();

        assert_eq!(via_offset, via_slice);
        assert_eq!(via_offset, [19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_matrix_dot_rejects_bad_shapes() {
        let a = [1.0f64; 4];
        let mut c = [0.0f64; 4];
        assert!(matches!(
            matrix_dot(false, 0, &a, 1, 2, 2, 2, false, 0, &a, 2, &mut c),
            Err(KernelError::InvalidArguments(_))
        ));
        assert!(matches!(
            matrix_dot(false, 1, &a, 2, 2, 2, 2, false, 0, &a, 2, &mut c),
            Err(KernelError::OutOfBounds(_))
        ));
        assert!(matches!(
            matrix_dot(false, 0, &a, 2, 2, 2, 2, false, 0, &a, 2, &mut c[..3]),
            Err(KernelError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_matrix_vector_dot() {
        let a = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0]; // 2×3
        let x = [1.0f64, 0.0, -1.0];
        let mut y = [0.0f64; 2];
        matrix_vector_dot(false, 0, &a, 3, 2, 3, &x, 1, &mut y).unwrap();
        assert_eq!(y, [-2.0, -2.0]);

        let x2 = [1.0f64, 1.0];
        let mut y2 = [0.0f64; 3];
        matrix_vector_dot(true, 0, &a, 3, 2, 3, &x2, 1, &mut y2).unwrap();
        assert_eq!(y2, [5.0, 7.0, 9.0]);
    }

    #[test]
    fn test_matrix_vector_dot_strided_x_and_offset() {
        // 2×2 block at offset 1 inside a 2×3 buffer
        let a = [9.0f64, 1.0, 2.0, 9.0, 3.0, 4.0];
        let x = [1.0f64, 99.0, 2.0];
        let mut y = [0.0f64; 2];
        matrix_vector_dot(false, 1, &a, 3, 2, 2, &x, 2, &mut y).unwrap();
        assert_eq!(y, [5.0, 11.0]);
    }

    #[test]
    fn test_matrix_vector_dot_empty_inner_dimension() {
        let a: [f64; 0] = [];
        let x: [f64; 0] = [];
        let mut y = [7.0f64; 3];
        matrix_vector_dot(false, 0, &a, 1, 3, 0, &x, 1, &mut y).unwrap();
        assert_eq!(y, [0.0; 3]);
    }

    #[test]
    fn test_solve_linear_system() {
        let mut a = [2.0f64, 1.0, 1.0, 3.0];
        let mut b = [3.0f64, 5.0];
        solve_linear_system(2, 1, &mut a, 2, &mut b, 1).unwrap();
        assert!(approx_eq(b[0], 0.8, 1e-12));
        assert!(approx_eq(b[1], 1.4, 1e-12));
    }

    #[test]
    fn test_solve_multiple_rhs_with_padding() {
        // A = diag(2, 4) stored with lda = 3, B is 2×2 with ldb = 3
        let mut a = [2.0f64, 0.0, -1.0, 0.0, 4.0];
        let mut b = [2.0f64, 4.0, -1.0, 8.0, 12.0];
        solve_linear_system(2, 2, &mut a, 3, &mut b, 3).unwrap();
        assert_eq!(b, [1.0, 2.0, -1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_solve_singular_reports_positive_status() {
        let mut a = [1.0f64, 2.0, 0.0, 0.0];
        let mut b = [1.0f64, 1.0];
        let err = solve_linear_system(2, 1, &mut a, 2, &mut b, 1).unwrap_err();
        assert!(matches!(err, KernelError::Singular { routine: "dgesv", .. }));
        assert!(err.status() > 0);
    }

    #[test]
    fn test_inverse_matrix() {
        let mut a = [4.0f64, 7.0, 2.0, 6.0];
        inverse_matrix(2, &mut a, 2).unwrap();
        let expected = [0.6, -0.7, -0.2, 0.4];
        for (got, want) in a.iter().zip(expected.iter()) {
            assert!(approx_eq(*got, *want, 1e-12), "{got} vs {want}");
        }
    }

    #[test]
    fn test_inverse_singular_stops_after_factorisation() {
        let mut a = [1.0f64, 2.0, 2.0, 4.0];
        let err = inverse_matrix(2, &mut a, 2).unwrap_err();
        assert!(matches!(err, KernelError::Singular { routine: "dgetrf", pivot: 2 }));
    }

    #[test]
    fn test_qr_square() {
        let mut aq = [12.0f64, -51.0, 4.0, 6.0, 167.0, -68.0, -4.0, 24.0, -41.0];
        let mut r = [0.0f64; 9];
        qr_matrix(3, 3, &mut aq, 3, &mut r).unwrap();

        for i in 0..3 {
            for j in 0..i {
                assert_eq!(r[i * 3 + j], 0.0);
            }
        }
        // R is unique up to the sign of each row
        let r_abs = [14.0, 21.0, 14.0, 0.0, 175.0, 70.0, 0.0, 0.0, 35.0];
        for (got, want) in r.iter().zip(r_abs.iter()) {
            assert!(approx_eq(got.abs(), *want, 1e-10), "{got} vs {want}");
        }
        // first column of Q is A's first column over |R(0,0)|
        for (i, want) in [12.0, 6.0, -4.0].iter().enumerate() {
            assert!(approx_eq(aq[i * 3] * r[0], *want, 1e-10));
        }
    }

    #[test]
    fn test_qr_clears_stale_lower_triangle() {
        let mut aq = [1.0f64, 2.0, 3.0, 4.0];
        let mut r = [f64::NAN; 4];
        qr_matrix(2, 2, &mut aq, 2, &mut r).unwrap();
        assert_eq!(r[2], 0.0);
        assert!(r.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_qr_rejects_short_r() {
        let mut aq = [1.0f64; 6];
        let mut r = [0.0f64; 3];
        assert!(matches!(
            qr_matrix(3, 2, &mut aq, 2, &mut r),
            Err(KernelError::OutOfBounds(_))
        ));
        // nothing touched on rejection
        assert_eq!(aq, [1.0; 6]);
    }

    #[test]
    fn test_plu_matrix() {
        let mut a = [1.0f64, 2.0, 3.0, 4.0];
        let mut ipiv = [0i32; 2];
        plu_matrix(2, 2, &mut a, 2, &mut ipiv).unwrap();
        // partial pivoting brings row 2 (|3| > |1|) to the top
        assert_eq!(ipiv, [2, 2]);
        assert!(approx_eq(a[0], 3.0, 1e-12));
        assert!(approx_eq(a[1], 4.0, 1e-12));
        assert!(approx_eq(a[2], 1.0 / 3.0, 1e-12));
        assert!(approx_eq(a[3], 2.0 - 4.0 / 3.0, 1e-12));
    }

    #[test]
    fn test_zero_width_factorisations() {
        // rows but no columns: nothing to factor, nothing to write back
        let mut ipiv: [i32; 0] = [];
        assert_eq!(plu_matrix::<f64>(2, 0, &mut [], 1, &mut ipiv), Ok(()));

        let mut r: [f64; 0] = [];
        assert_eq!(qr_matrix::<f64>(3, 0, &mut [], 1, &mut r), Ok(()));

        let mut a = [2.0f64, 1.0, 1.0, 3.0];
        assert_eq!(solve_linear_system::<f64>(2, 0, &mut a, 2, &mut [], 1), Ok(()));
    }

    #[test]
    fn test_zero_height_factorisations() {
        let mut ipiv: [i32; 0] = [];
        assert_eq!(plu_matrix::<f32>(0, 3, &mut [], 3, &mut ipiv), Ok(()));

        let mut r: [f32; 0] = [];
        assert_eq!(qr_matrix::<f32>(0, 2, &mut [], 2, &mut r), Ok(()));
        assert_eq!(inverse_matrix::<f32>(0, &mut [], 1), Ok(()));
    }

    #[test]
    fn test_plu_rejects_short_pivots() {
        let mut a = [1.0f64; 6];
        let mut ipiv = [0i32; 1];
        assert!(matches!(
            plu_matrix(2, 3, &mut a, 3, &mut ipiv),
            Err(KernelError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_eigen_values_triangular() {
        let a = [2.0f64, 1.0, 0.0, 3.0];
        let mut w = [Complex64::new(0.0, 0.0); 2];
        eigen_values(2, &a, 2, &mut w).unwrap();
        let mut re: Vec<f64> = w.iter().map(|z| z.re).collect();
        re.sort_by(|x, y| x.partial_cmp(y).unwrap());
        assert!(approx_eq(re[0], 2.0, 1e-12));
        assert!(approx_eq(re[1], 3.0, 1e-12));
        assert!(w.iter().all(|z| z.im == 0.0));
        // input untouched
        assert_eq!(a, [2.0, 1.0, 0.0, 3.0]);
    }

    #[test]
    fn test_eigen_values_split_rotation() {
        // 90° rotation: eigenvalues ±i
        let a = [0.0f64, -1.0, 1.0, 0.0];
        let mut wr = [9.0f64; 2];
        let mut wi = [9.0f64; 2];
        eigen_values_split(2, &a, 2, &mut wr, &mut wi).unwrap();
        assert!(approx_eq(wr[0], 0.0, 1e-12) && approx_eq(wr[1], 0.0, 1e-12));
        assert!(approx_eq(wi[0], 1.0, 1e-12));
        assert!(approx_eq(wi[1], -1.0, 1e-12));
    }
}
