#![allow(unused)]

use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Relative closeness with an absolute floor of `tol` near zero; NaN matches only NaN.
fn within(got: f64, want: f64, tol: f64) -> bool {
    if want.is_nan() {
        return got.is_nan();
    }
    (got - want).abs() <= tol * want.abs().max(1.0)
}

pub fn assert_close(got: f64, want: f64, tol: f64) {
    assert!(within(got, want, tol), "got {got}, want {want} (tol {tol})");
}

pub fn assert_slice_close(got: &[f64], want: &[f64], tol: f64) {
    assert_eq!(got.len(), want.len(), "length differs");
    for (i, (&g, &w)) in got.iter().zip(want).enumerate() {
        assert!(within(g, w, tol), "[{i}] got {g}, want {w} (tol {tol})");
    }
}

pub fn assert_slice_close_f32(a: &[f32], e: &[f32], tol: f32) {
    let a: Vec<f64> = a.iter().map(|&v| v as f64).collect();
    let e: Vec<f64> = e.iter().map(|&v| v as f64).collect();
    assert_slice_close(&a, &e, tol as f64);
}

pub fn assert_complex_slice_close(a: &[Complex64], e: &[Complex64], tol: f64) {
    assert_eq!(a.len(), e.len(), "len mismatch");
    for (i, (ai, ei)) in a.iter().zip(e.iter()).enumerate() {
        let scale = 1.0_f64.max(ei.norm());
        let ok = (ai - ei).norm() <= tol * scale;
        assert!(ok, "idx {i}: got {ai}, expect {ei} (tol={tol})");
    }
}

/// Routes the kernels' `log` output to the test harness. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Seeded generator so failures reproduce.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random `n × n` row-major matrix with a dominant diagonal, hence well conditioned.
pub fn well_conditioned(rng: &mut StdRng, n: usize) -> Vec<f64> {
    let mut a: Vec<f64> = (0..n * n).map(|_| rng.gen_range(-1.0..1.0)).collect();
    for i in 0..n {
        a[i * n + i] += n as f64 + 1.0;
    }
    a
}

/// Complex counterpart of [`well_conditioned`].
pub fn well_conditioned_complex(rng: &mut StdRng, n: usize) -> Vec<Complex64> {
    let mut a: Vec<Complex64> = (0..n * n)
        .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect();
    for i in 0..n {
        a[i * n + i] += Complex64::new(2.0 * n as f64, 0.0);
    }
    a
}

pub fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Vec<f64> {
    (0..rows * cols).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

pub fn identity(n: usize) -> Vec<f64> {
    let mut a = vec![0.0; n * n];
    for i in 0..n {
        a[i * n + i] = 1.0;
    }
    a
}

/// Naive row-major product of dense `m × k` and `k × n` matrices.
pub fn matmul(a: &[f64], b: &[f64], m: usize, k: usize, n: usize) -> Vec<f64> {
    let mut c = vec![0.0; m * n];
    for i in 0..m {
        for j in 0..n {
            c[i * n + j] = (0..k).map(|p| a[i * k + p] * b[p * n + j]).sum();
        }
    }
    c
}

pub fn matmul_complex(
    a: &[Complex64],
    b: &[Complex64],
    m: usize,
    k: usize,
    n: usize,
) -> Vec<Complex64> {
    let mut c = vec![Complex64::new(0.0, 0.0); m * n];
    for i in 0..m {
        for j in 0..n {
            c[i * n + j] = (0..k).map(|p| a[i * k + p] * b[p * n + j]).sum();
        }
    }
    c
}

/// Copies the leading `rows × cols` block out of a row-major buffer with row stride `ld`.
pub fn block<T: Copy>(src: &[T], rows: usize, cols: usize, ld: usize) -> Vec<T> {
    (0..rows)
        .flat_map(|i| src[i * ld..i * ld + cols].iter().copied())
        .collect()
}
