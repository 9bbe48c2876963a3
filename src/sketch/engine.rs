//! Streaming low-rank row sketch (Frequent Directions).
//!
//! Maintains a bounded buffer of l rows. Incoming rows fill free slots
//! directly; when the buffer is full, a shrink step removes the energy of
//! the median direction, freeing exactly l/2 slots while bounding the
//! approximation error of the retained row space.
//!
//! # References
//!
//! - Liberty, E. (2013). Simple and deterministic matrix sketching. KDD.
//! - Ghashami, M., et al. (2016). Frequent Directions: Simple and
//!   deterministic matrix sketching. SIAM J. Computing.

use log::debug;

use super::eigen::symmetric_eigen;
use crate::error::{EsbozarError, Result};
use crate::primitives::Matrix;

/// Transient working state of one streaming sketch.
///
/// Rows are absorbed in index order; the order is significant and the
/// input may not be re-sorted without changing the output.
#[derive(Debug, Clone)]
pub struct SketchBuffer {
    b: Matrix<f32>,
    l: usize,
    occupied: usize,
    dropped: usize,
}

impl SketchBuffer {
    /// Creates an empty buffer of `l` rows and `cols` columns.
    #[must_use]
    pub fn new(l: usize, cols: usize) -> Self {
        Self {
            b: Matrix::zeros(l, cols),
            l,
            occupied: 0,
            dropped: 0,
        }
    }

    /// Number of currently occupied buffer rows.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    /// Number of source rows dropped by the early-stop rule so far.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Counts rows with non-zero squared norm (the occupancy the
    /// counter is meant to mirror).
    #[must_use]
    pub fn nonzero_rows(&self) -> usize {
        (0..self.l).filter(|&i| self.b.row_norm_sq(i) > 0.0).count()
    }

    /// Absorbs all rows of `a` in index order.
    ///
    /// If fewer than l/2 source rows remain when the buffer is full,
    /// processing stops and the remainder is dropped. This truncation is
    /// a documented approximation trade-off of the streaming scheme, not
    /// an accident; the dropped count is retained for inspection.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the column counts differ, and
    /// propagates shrink-step failures.
    pub fn absorb(&mut self, a: &Matrix<f32>) -> Result<()> {
        let (n, cols) = a.shape();
        if cols != self.b.n_cols() {
            return Err(EsbozarError::DimensionMismatch {
                expected: format!("{} columns", self.b.n_cols()),
                actual: format!("{cols} columns"),
            });
        }
        if self.l == 0 {
            self.dropped += n;
            return Ok(());
        }

        for i in 0..n {
            if self.occupied < self.l {
                self.b.set_row(self.occupied, a.row_slice(i));
                self.occupied += 1;
            } else {
                if n - i < self.l / 2 {
                    self.dropped += n - i;
                    debug!(
                        "sketch early stop: dropping {} of {} source rows (l = {})",
                        n - i,
                        n,
                        self.l
                    );
                    break;
                }
                self.shrink()?;
                self.b.set_row(self.occupied, a.row_slice(i));
                self.occupied += 1;
            }
        }
        Ok(())
    }

    /// Executes one shrink step on a full buffer.
    ///
    /// Squared singular values of B (eigenvalues of B*B^T) are reduced by
    /// the value at rank index l/2 and clamped at zero, and B is rebuilt
    /// as diag(sigma_hat) * U^T. Rows at indices >= l/2 become zero, so
    /// exactly l/2 slots are freed.
    ///
    /// # Errors
    ///
    /// Propagates eigensolver failures.
    pub fn shrink(&mut self) -> Result<()> {
        let ind = self.l / 2;
        let cols = self.b.n_cols();
        let (sigma_sq, w) = symmetric_eigen(&self.b.gram())?;
        let theta = sigma_sq[ind].max(0.0);

        let mut shrunk = Matrix::zeros(self.l, cols);
        for i in 0..self.l {
            let sq = sigma_sq[i].max(0.0);
            let hat_sq = sq - theta;
            if hat_sq <= 0.0 {
                continue;
            }
            // Row i of diag(sigma_hat) * U^T equals
            // sqrt(hat_sq / sq) * (W^T B) row i.
            let scale = (hat_sq / sq).sqrt();
            let dst = shrunk.row_slice_mut(i);
            for k in 0..self.l {
                let c = w.get(k, i) * scale;
                if c == 0.0 {
                    continue;
                }
                for (d, s) in dst.iter_mut().zip(self.b.row_slice(k)) {
                    *d += c * s;
                }
            }
        }

        self.b = shrunk;
        self.occupied = ind;
        Ok(())
    }

    /// Consumes the buffer and returns the sketch matrix.
    #[must_use]
    pub fn into_matrix(self) -> Matrix<f32> {
        self.b
    }
}

/// Sketches an n x m row matrix down to l rows.
///
/// The caller guarantees l <= n for a meaningful reduction; with l >= n
/// the buffer simply holds the source rows (trailing rows stay zero when
/// l > n) and no shrink ever runs.
///
/// # Errors
///
/// Propagates buffer errors.
pub fn sketch_rows(a: &Matrix<f32>, l: usize) -> Result<Matrix<f32>> {
    let mut buffer = SketchBuffer::new(l, a.n_cols());
    buffer.absorb(a)?;
    Ok(buffer.into_matrix())
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
