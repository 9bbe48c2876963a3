//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use esbozar::prelude::*;
//! ```

pub use crate::checkpoint::{load, save, CheckpointMeta};
pub use crate::error::{EsbozarError, Result};
pub use crate::plan::{transplant, transplant_from_checkpoint, Architecture, SketchConfig};
pub use crate::primitives::{Matrix, Tensor, Vector};
pub use crate::sketch::{sketch_rows, sketch_tensor, NormMethod, SketchDim};
pub use crate::store::WeightStore;
