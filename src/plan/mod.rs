//! Architecture-aware transplant planning.
//!
//! A transplant takes a pretrained full-size *source* store and a
//! freshly initialized reduced *target* store, walks the architecture's
//! layer sequence, and fills the target: sketchable convolutions are
//! reduced with the streaming sketch, width-pinned ones are sketched on
//! one axis only, and everything else is copied or left at its fresh
//! initialization by the completeness pass.

mod config;
mod dense;
mod descriptor;
mod inception;
mod resnet;
mod vgg;
mod walker;

use std::path::Path;

use log::info;

use crate::checkpoint;
use crate::error::Result;
use crate::store::WeightStore;

pub use config::{Architecture, SketchConfig};
pub use descriptor::{BranchKind, LayerDescriptor, LayerRole};

/// Transplants `source` into the shape of `target_init`.
///
/// The returned store is complete: it holds exactly the names of
/// `target_init`, each with its declared shape.
///
/// # Errors
///
/// Fails when a layer named by the architecture is missing from the
/// source, when a produced tensor does not match the target's declared
/// shape, or on sketch-engine errors.
pub fn transplant(
    arch: &Architecture,
    cfg: &SketchConfig,
    source: &WeightStore,
    target_init: &WeightStore,
) -> Result<WeightStore> {
    let descriptors = arch.descriptors(cfg);
    info!(
        "transplanting {arch:?}: {} descriptors, {} source tensors, {} target tensors",
        descriptors.len(),
        source.len(),
        target_init.len()
    );
    walker::run_walk(&descriptors, source, target_init, cfg)
}

/// Loads a source checkpoint and transplants it into `target_init`.
///
/// # Errors
///
/// Fails with `UnknownArchitecture` for unregistered names and with
/// `MissingCheckpoint` before any sketching when the path does not
/// exist; otherwise as [`transplant`].
pub fn transplant_from_checkpoint<P: AsRef<Path>>(
    arch_name: &str,
    cfg: &SketchConfig,
    path: P,
    target_init: &WeightStore,
) -> Result<WeightStore> {
    let arch = Architecture::from_config(arch_name)?;
    let (source, meta) = checkpoint::load(path)?;
    if let Some(acc) = meta.best_acc {
        info!("source checkpoint best accuracy: {acc:.2}");
    }
    transplant(&arch, cfg, &source, target_init)
}
