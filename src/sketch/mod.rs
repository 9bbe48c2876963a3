//! Streaming low-rank sketching of weight matrices.
//!
//! The engine ([`SketchBuffer`], [`sketch_rows`]) is a pure function
//! over row matrices with no knowledge of network topology; the reshaper
//! ([`flatten`], [`restore`], [`sketch_tensor`]) bridges 4D convolution
//! weights to the engine's row form, with optional batch-norm fusion.

mod eigen;
mod engine;
mod norm;
mod reshape;

pub use eigen::symmetric_eigen;
pub use engine::{sketch_rows, SketchBuffer};
pub use norm::{weight_norm, weight_norm_tensor, NormMethod};
pub use reshape::{flatten, restore, sketch_tensor, SketchDim, SketchOutput};
