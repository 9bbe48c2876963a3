//! Symmetric eigendecomposition via cyclic Jacobi rotations.
//!
//! The shrink step needs the SVD of the sketch buffer B. Because the
//! buffer has few rows (l) and many columns (m), we eigendecompose the
//! small Gram matrix G = B*B^T instead: the eigenvalues of G are the
//! squared singular values of B and its eigenvectors are B's left
//! singular vectors.
//!
//! Rotations are applied in a fixed cyclic order and the output uses a
//! descending eigenvalue sort with a stable index tie-break plus a fixed
//! eigenvector sign convention, so results are deterministic for a given
//! input.
//!
//! # References
//!
//! - Golub, G. H., & Van Loan, C. F. (2013). Matrix Computations, §8.5.

use crate::error::{EsbozarError, Result};
use crate::primitives::Matrix;

/// Maximum number of full Jacobi sweeps before giving up.
const MAX_SWEEPS: usize = 100;

/// Eigendecomposition of a symmetric matrix.
///
/// Returns eigenvalues in descending order and the matching eigenvectors
/// as the columns of the returned matrix. Accumulation happens in f64 to
/// keep the f32 inputs well conditioned.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the matrix is not square.
pub fn symmetric_eigen(m: &Matrix<f32>) -> Result<(Vec<f32>, Matrix<f32>)> {
    let (rows, cols) = m.shape();
    if rows != cols {
        return Err(EsbozarError::DimensionMismatch {
            expected: "square matrix".to_string(),
            actual: format!("{rows}x{cols}"),
        });
    }
    let n = rows;
    if n == 0 {
        return Ok((Vec::new(), Matrix::zeros(0, 0)));
    }

    let mut a: Vec<f64> = m.as_slice().iter().map(|&x| f64::from(x)).collect();
    let mut v = vec![0.0_f64; n * n];
    for i in 0..n {
        v[i * n + i] = 1.0;
    }

    let fro_sq: f64 = a.iter().map(|x| x * x).sum();
    let tol = f64::EPSILON * f64::EPSILON * (1.0 + fro_sq);

    for _sweep in 0..MAX_SWEEPS {
        let off: f64 = off_diagonal_sq(&a, n);
        if off <= tol {
            break;
        }

        for p in 0..n - 1 {
            for q in p + 1..n {
                let apq = a[p * n + q];
                if apq == 0.0 {
                    continue;
                }
                let app = a[p * n + p];
                let aqq = a[q * n + q];

                let theta = (aqq - app) / (2.0 * apq);
                let t = if theta >= 0.0 {
                    1.0 / (theta + (theta * theta + 1.0).sqrt())
                } else {
                    -1.0 / (-theta + (theta * theta + 1.0).sqrt())
                };
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                rotate(&mut a, n, p, q, c, s);
                rotate_columns(&mut v, n, p, q, c, s);
            }
        }
    }

    // Collect (eigenvalue, column) pairs sorted descending; ties keep the
    // lower original index first.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| {
        let li = a[i * n + i];
        let lj = a[j * n + j];
        lj.partial_cmp(&li)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(i.cmp(&j))
    });

    let eigenvalues: Vec<f32> = order.iter().map(|&i| a[i * n + i] as f32).collect();

    let mut vectors = Matrix::zeros(n, n);
    for (out_col, &src_col) in order.iter().enumerate() {
        // Sign convention: largest-magnitude component is positive.
        let mut pivot = 0;
        let mut pivot_abs = 0.0_f64;
        for r in 0..n {
            let x = v[r * n + src_col].abs();
            if x > pivot_abs {
                pivot_abs = x;
                pivot = r;
            }
        }
        let flip = if v[pivot * n + src_col] < 0.0 { -1.0 } else { 1.0 };
        for r in 0..n {
            vectors.set(r, out_col, (v[r * n + src_col] * flip) as f32);
        }
    }

    Ok((eigenvalues, vectors))
}

fn off_diagonal_sq(a: &[f64], n: usize) -> f64 {
    let mut sum = 0.0;
    for i in 0..n {
        for j in 0..n {
            if i != j {
                sum += a[i * n + j] * a[i * n + j];
            }
        }
    }
    sum
}

/// Applies the two-sided rotation J^T * A * J on rows/columns p and q.
fn rotate(a: &mut [f64], n: usize, p: usize, q: usize, c: f64, s: f64) {
    for k in 0..n {
        let akp = a[k * n + p];
        let akq = a[k * n + q];
        a[k * n + p] = c * akp - s * akq;
        a[k * n + q] = s * akp + c * akq;
    }
    for k in 0..n {
        let apk = a[p * n + k];
        let aqk = a[q * n + k];
        a[p * n + k] = c * apk - s * aqk;
        a[q * n + k] = s * apk + c * aqk;
    }
}

/// Accumulates the rotation into the eigenvector matrix (columns p, q).
fn rotate_columns(v: &mut [f64], n: usize, p: usize, q: usize, c: f64, s: f64) {
    for k in 0..n {
        let vkp = v[k * n + p];
        let vkq = v[k * n + q];
        v[k * n + p] = c * vkp - s * vkq;
        v[k * n + q] = s * vkp + c * vkq;
    }
}

#[cfg(test)]
#[path = "eigen_tests.rs"]
mod tests;
