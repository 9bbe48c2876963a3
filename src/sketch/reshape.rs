//! Tensor flattening for the streaming sketch.
//!
//! Convolution weights are 4D (out, in, kH, kW); the sketch engine works
//! on row matrices. Flattening is a raw row-major reinterpretation of
//! the buffer with the sketched dimension's extent as the row count —
//! deliberately not a transpose — and restore is the inverse
//! reinterpretation with the sketched extent replaced by l.
//!
//! When the filter dimension is sketched with batch-norm pairing, the bn
//! weight and bias vectors ride along as two trailing columns so each
//! (filter, bn-weight, bn-bias) triple is one logical row and the
//! filter's compression stays coupled to its affine parameters.

use super::engine::sketch_rows;
use super::norm::{weight_norm_tensor, NormMethod};
use crate::error::{EsbozarError, Result};
use crate::primitives::{Matrix, Tensor, Vector};

/// Which convolution dimension the sketch reduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchDim {
    /// Output-channel axis (dim 0).
    Filter,
    /// Input-channel axis (dim 1).
    Channel,
}

/// Result of [`sketch_tensor`]: the reduced weight and, when batch-norm
/// columns were fused, the co-sketched affine vectors.
#[derive(Debug, Clone)]
pub struct SketchOutput {
    /// Reduced convolution weight.
    pub weight: Tensor,
    /// Co-sketched (bn weight, bn bias), both of length l.
    pub bn: Option<(Vector<f32>, Vector<f32>)>,
}

/// Flattens a 4D convolution weight into the engine's row-matrix form.
///
/// # Errors
///
/// Returns `DimensionMismatch` for non-4D weights, for batch-norm fusion
/// on the channel dimension, or for bn vectors whose length differs from
/// the filter count.
pub fn flatten(
    weight: &Tensor,
    dim: SketchDim,
    bn: Option<(&Tensor, &Tensor)>,
) -> Result<Matrix<f32>> {
    if weight.dim() != 4 {
        return Err(EsbozarError::DimensionMismatch {
            expected: "4D convolution weight".to_string(),
            actual: format!("{}D tensor", weight.dim()),
        });
    }

    let rows = match dim {
        SketchDim::Filter => weight.size(0),
        SketchDim::Channel => weight.size(1),
    };
    let cols = weight.numel() / rows;

    match (dim, bn) {
        (SketchDim::Filter, Some((bn_weight, bn_bias))) => {
            if bn_weight.numel() != rows || bn_bias.numel() != rows {
                return Err(EsbozarError::DimensionMismatch {
                    expected: format!("bn vectors of length {rows}"),
                    actual: format!("{} / {}", bn_weight.numel(), bn_bias.numel()),
                });
            }
            let mut data = Vec::with_capacity(rows * (cols + 2));
            let flat = weight.as_slice();
            for r in 0..rows {
                data.extend_from_slice(&flat[r * cols..(r + 1) * cols]);
                data.push(bn_weight.as_slice()[r]);
                data.push(bn_bias.as_slice()[r]);
            }
            Matrix::from_vec(rows, cols + 2, data).map_err(|e| EsbozarError::DimensionMismatch {
                expected: "rows * (cols + 2) elements".to_string(),
                actual: e.to_string(),
            })
        }
        (SketchDim::Channel, Some(_)) => Err(EsbozarError::DimensionMismatch {
            expected: "batch-norm fusion on the filter dimension".to_string(),
            actual: "channel-dimension sketch with bn pairing".to_string(),
        }),
        (_, None) => Matrix::from_vec(rows, cols, weight.as_slice().to_vec()).map_err(|e| {
            EsbozarError::DimensionMismatch {
                expected: "rows * cols elements".to_string(),
                actual: e.to_string(),
            }
        }),
    }
}

/// Restores a sketched row matrix to tensor form.
///
/// `original` supplies the non-sketched extents. With `had_bn`, the two
/// trailing columns are split back into length-l affine vectors.
///
/// # Errors
///
/// Returns `DimensionMismatch` when the matrix cannot be reinterpreted
/// under the restored shape.
pub fn restore(
    b: Matrix<f32>,
    original: &Tensor,
    dim: SketchDim,
    had_bn: bool,
) -> Result<(Tensor, Option<(Vector<f32>, Vector<f32>)>)> {
    let l = b.n_rows();
    let (c, kh, kw) = (original.size(1), original.size(2), original.size(3));
    let n = original.size(0);

    match dim {
        SketchDim::Filter if had_bn => {
            let split = c * kh * kw;
            if b.n_cols() != split + 2 {
                return Err(EsbozarError::DimensionMismatch {
                    expected: format!("{} columns (flat weight + 2 bn)", split + 2),
                    actual: format!("{} columns", b.n_cols()),
                });
            }
            let mut weight_data = Vec::with_capacity(l * split);
            let mut bn_weight = Vector::zeros(l);
            let mut bn_bias = Vector::zeros(l);
            for r in 0..l {
                let row = b.row_slice(r);
                weight_data.extend_from_slice(&row[..split]);
                bn_weight[r] = row[split];
                bn_bias[r] = row[split + 1];
            }
            let weight = Tensor::new(&[l, c, kh, kw], weight_data)?;
            Ok((weight, Some((bn_weight, bn_bias))))
        }
        SketchDim::Filter => {
            let weight = Tensor::new(&[l, c, kh, kw], b.into_vec())?;
            Ok((weight, None))
        }
        SketchDim::Channel => {
            // Inverse raw reinterpretation: the (l x n*kH*kW) buffer is
            // read back as (n, l, kH, kW).
            let weight = Tensor::new(&[n, l, kh, kw], b.into_vec())?;
            Ok((weight, None))
        }
    }
}

/// Sketches one convolution weight along the given dimension down to l,
/// optionally co-sketching its batch-norm affine pair, then applies the
/// configured weight normalization.
///
/// # Errors
///
/// Propagates flatten/restore and engine errors.
pub fn sketch_tensor(
    weight: &Tensor,
    l: usize,
    dim: SketchDim,
    bn: Option<(&Tensor, &Tensor)>,
    method: NormMethod,
    per_filter: bool,
) -> Result<SketchOutput> {
    let had_bn = bn.is_some();
    let a = flatten(weight, dim, bn)?;
    let b = sketch_rows(&a, l)?;
    let (mut restored, bn_out) = restore(b, weight, dim, had_bn)?;
    weight_norm_tensor(&mut restored, method, per_filter);
    Ok(SketchOutput {
        weight: restored,
        bn: bn_out,
    })
}

#[cfg(test)]
#[path = "reshape_tests.rs"]
mod tests;
