//! Named-weight tensor type.
//!
//! A `Tensor` is an immutable-by-convention multi-dimensional array of
//! `f32` values with a fixed shape: (out, in, kH, kW) for convolution
//! weights, (out, in) for linear weights, (C,) for batch-norm affine
//! parameters and running statistics.

use serde::{Deserialize, Serialize};

use crate::error::{EsbozarError, Result};

/// Multi-dimensional array of f32 values, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    shape: Vec<usize>,
    data: Vec<f32>,
}

impl Tensor {
    /// Creates a tensor from a shape and row-major data.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the data length doesn't match the
    /// shape's element count.
    pub fn new(shape: &[usize], data: Vec<f32>) -> Result<Self> {
        let numel: usize = shape.iter().product();
        if data.len() != numel {
            return Err(EsbozarError::DimensionMismatch {
                expected: format!("{numel} elements for shape {shape:?}"),
                actual: format!("{} elements", data.len()),
            });
        }
        Ok(Self {
            shape: shape.to_vec(),
            data,
        })
    }

    /// Creates a zero-filled tensor.
    #[must_use]
    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            data: vec![0.0; shape.iter().product()],
        }
    }

    /// Creates a one-filled tensor.
    #[must_use]
    pub fn ones(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            data: vec![1.0; shape.iter().product()],
        }
    }

    /// Returns the shape.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the number of dimensions.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.shape.len()
    }

    /// Returns the extent of dimension `d`.
    ///
    /// # Panics
    ///
    /// Panics if `d` is out of range.
    #[must_use]
    pub fn size(&self, d: usize) -> usize {
        self.shape[d]
    }

    /// Returns the total number of elements.
    #[must_use]
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns the underlying data as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the tensor and returns its row-major data.
    #[must_use]
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

#[cfg(test)]
#[path = "tensor_tests.rs"]
mod tests;
