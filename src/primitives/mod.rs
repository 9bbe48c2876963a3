//! Core compute primitives (Vector, Matrix, Tensor).
//!
//! These types provide the foundation for the sketching engine and the
//! weight stores.

mod matrix;
mod tensor;
mod vector;

pub use matrix::Matrix;
pub use tensor::Tensor;
pub use vector::Vector;
