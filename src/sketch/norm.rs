//! Post-sketch weight normalization.
//!
//! Rescales a sketched weight by a method-selected divisor, either per
//! row (per filter) or over the whole weight. The `Sum` and `L2Sq`
//! methods compute their divisor over the whole pre-normalization weight
//! even in per-row mode; the remaining methods use each row's own values.
//! That asymmetry is part of the sketch contract and is preserved here.

use log::warn;

use crate::error::{EsbozarError, Result};
use crate::primitives::{Matrix, Tensor};

/// Divisor selection for [`weight_norm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormMethod {
    /// No rescaling (divisor 1).
    #[default]
    None,
    /// max(|x|)
    Max,
    /// sum(|x|) over the whole pre-normalization weight.
    Sum,
    /// sqrt(sum(x^2))
    L2,
    /// sqrt(sum(|x|))
    L1,
    /// sum(x^2) over the whole pre-normalization weight.
    L2Sq,
    /// 2 * max(|x|)
    TwoMax,
}

impl NormMethod {
    /// Resolves a configuration string ("max", "sum", "l2", "l1",
    /// "l2_2", "2max"); `None` selects no rescaling.
    ///
    /// # Errors
    ///
    /// Returns `UnknownArchitecture`-class configuration errors for
    /// unrecognized method names.
    pub fn from_config(name: Option<&str>) -> Result<Self> {
        match name {
            None | Some("none") => Ok(NormMethod::None),
            Some("max") => Ok(NormMethod::Max),
            Some("sum") => Ok(NormMethod::Sum),
            Some("l2") => Ok(NormMethod::L2),
            Some("l1") => Ok(NormMethod::L1),
            Some("l2_2") => Ok(NormMethod::L2Sq),
            Some("2max") => Ok(NormMethod::TwoMax),
            Some(other) => Err(EsbozarError::UnknownArchitecture {
                name: format!("weight norm method '{other}'"),
            }),
        }
    }

    fn divisor(self, values: &[f32]) -> f32 {
        match self {
            NormMethod::None => 1.0,
            NormMethod::Max => values.iter().fold(0.0_f32, |m, x| m.max(x.abs())),
            NormMethod::Sum => values.iter().map(|x| x.abs()).sum(),
            NormMethod::L2 => values.iter().map(|x| x * x).sum::<f32>().sqrt(),
            NormMethod::L1 => values.iter().map(|x| x.abs()).sum::<f32>().sqrt(),
            NormMethod::L2Sq => values.iter().map(|x| x * x).sum(),
            NormMethod::TwoMax => 2.0 * values.iter().fold(0.0_f32, |m, x| m.max(x.abs())),
        }
    }
}

/// Guards the zero-divisor degeneracy: a fully zero row (a genuinely
/// redundant direction) normalizes as a no-op instead of dividing by 0.
fn guarded(divisor: f32) -> f32 {
    if divisor == 0.0 || !divisor.is_finite() {
        warn!("weight norm divisor degenerate ({divisor}); treating as 1");
        1.0
    } else {
        divisor
    }
}

fn scale(values: &mut [f32], divisor: f32) {
    let d = guarded(divisor);
    for x in values {
        *x /= d;
    }
}

/// Normalizes a matrix in place.
///
/// With `per_row` set, each row is divided by its method-selected
/// divisor; otherwise one divisor rescales the whole matrix.
pub fn weight_norm(weight: &mut Matrix<f32>, method: NormMethod, per_row: bool) {
    if method == NormMethod::None {
        return;
    }
    if per_row {
        // Whole-weight divisor for the asymmetric methods, captured
        // before any row is rescaled.
        let global = match method {
            NormMethod::Sum | NormMethod::L2Sq => Some(method.divisor(weight.as_slice())),
            _ => None,
        };
        for i in 0..weight.n_rows() {
            let d = global.unwrap_or_else(|| method.divisor(weight.row_slice(i)));
            scale(weight.row_slice_mut(i), d);
        }
    } else {
        let d = method.divisor(weight.as_slice());
        for i in 0..weight.n_rows() {
            scale(weight.row_slice_mut(i), d);
        }
    }
}

/// Normalizes a tensor in place, treating the leading dimension as the
/// row (filter) axis.
pub fn weight_norm_tensor(weight: &mut Tensor, method: NormMethod, per_filter: bool) {
    if method == NormMethod::None || weight.numel() == 0 {
        return;
    }
    let rows = weight.size(0);
    let cols = weight.numel() / rows;
    if per_filter {
        let global = match method {
            NormMethod::Sum | NormMethod::L2Sq => Some(method.divisor(weight.as_slice())),
            _ => None,
        };
        let data = weight.as_mut_slice();
        for i in 0..rows {
            let row = &mut data[i * cols..(i + 1) * cols];
            let d = global.unwrap_or_else(|| method.divisor(row));
            scale(row, d);
        }
    } else {
        let d = method.divisor(weight.as_slice());
        scale(weight.as_mut_slice(), d);
    }
}

#[cfg(test)]
#[path = "norm_tests.rs"]
mod tests;
