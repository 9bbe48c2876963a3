//! Matrix type for 2D numeric data.

use serde::{Deserialize, Serialize};

/// A 2D matrix of floating-point values (row-major storage).
///
/// Rows are the unit of work for the streaming sketch: the engine reads,
/// overwrites, and rescales whole rows in place.
///
/// # Examples
///
/// ```
/// use esbozar::primitives::Matrix;
///
/// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("data length matches rows * cols");
/// assert_eq!(m.shape(), (2, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Matrix<T> {
    /// Creates a new matrix from a vector of data.
    ///
    /// # Errors
    ///
    /// Returns an error if data length doesn't match rows * cols.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, &'static str> {
        if data.len() != rows * cols {
            return Err("Data length must equal rows * cols");
        }
        Ok(Self { data, rows, cols })
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Gets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    /// Sets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    /// Returns a row as a borrowed slice.
    #[must_use]
    pub fn row_slice(&self, row_idx: usize) -> &[T] {
        let start = row_idx * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Returns a row as a mutable slice.
    pub fn row_slice_mut(&mut self, row_idx: usize) -> &mut [T] {
        let start = row_idx * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// Overwrites a row with the given values.
    ///
    /// # Panics
    ///
    /// Panics if the value count doesn't match the column count.
    pub fn set_row(&mut self, row_idx: usize, values: &[T]) {
        assert_eq!(values.len(), self.cols, "row length must equal cols");
        self.row_slice_mut(row_idx).copy_from_slice(values);
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consumes the matrix and returns the underlying row-major data.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl Matrix<f32> {
    /// Creates a matrix of zeros.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Squared Euclidean norm of a row.
    #[must_use]
    pub fn row_norm_sq(&self, row_idx: usize) -> f32 {
        self.row_slice(row_idx).iter().map(|x| x * x).sum()
    }

    /// Gram matrix G = self * self^T.
    ///
    /// The shrink step eigendecomposes this (rows x rows) matrix instead
    /// of taking the SVD of the full (rows x cols) buffer.
    #[must_use]
    pub fn gram(&self) -> Self {
        let n = self.rows;
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            let ri = self.row_slice(i);
            for j in i..n {
                let rj = self.row_slice(j);
                let dot: f32 = ri.iter().zip(rj.iter()).map(|(a, b)| a * b).sum();
                data[i * n + j] = dot;
                data[j * n + i] = dot;
            }
        }
        Self {
            data,
            rows: n,
            cols: n,
        }
    }
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;
