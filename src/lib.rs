//! Esbozar: streaming weight sketching for convolutional networks in pure Rust.
//!
//! Esbozar compresses pretrained convolution weights with a streaming
//! low-rank sketch and transplants them into a structurally smaller
//! model of the same family, so the reduced model starts from
//! information-preserving weights instead of a fresh initialization.
//!
//! # Quick Start
//!
//! ```
//! use esbozar::prelude::*;
//!
//! // A pretrained 8-filter convolution over 2 input channels.
//! let weight = Tensor::new(
//!     &[8, 2, 3, 3],
//!     (0..144).map(|i| (i as f32 * 0.37).sin()).collect(),
//! ).unwrap();
//!
//! // Sketch it down to 4 filters.
//! let out = sketch_tensor(
//!     &weight,
//!     4,
//!     SketchDim::Filter,
//!     None,
//!     NormMethod::None,
//!     false,
//! ).unwrap();
//! assert_eq!(out.weight.shape(), &[4, 2, 3, 3]);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector, Matrix and Tensor types
//! - [`sketch`]: Streaming sketch engine, eigensolver, normalization, reshaping
//! - [`plan`]: Architecture-aware transplant planning
//! - [`store`]: Name-indexed weight collections
//! - [`checkpoint`]: Checkpoint persistence
//! - [`error`]: Error taxonomy

pub mod checkpoint;
pub mod error;
pub mod plan;
pub mod prelude;
pub mod primitives;
pub mod sketch;
pub mod store;
