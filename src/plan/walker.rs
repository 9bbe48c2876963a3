//! The transplant walk: preserve chain, per-layer sketching, and the
//! completeness pass.
//!
//! The walk consumes the architecture's descriptor sequence in order,
//! carrying a single `preserve` flag between regular convolutions: a
//! convolution copied verbatim (because the target width already covers
//! its flattened input) leaves its output channels untouched, so the
//! next convolution must not sketch its input axis either. Sketching a
//! convolution clears the flag.

use std::collections::BTreeSet;

use log::{debug, info};

use crate::error::{EsbozarError, Result};
use crate::plan::config::SketchConfig;
use crate::plan::descriptor::{BranchKind, LayerDescriptor, LayerRole};
use crate::primitives::Tensor;
use crate::sketch::{sketch_tensor, SketchDim};
use crate::store::WeightStore;

/// Parameter suffixes of a batch-norm module.
const BN_SUFFIXES: [&str; 4] = ["weight", "bias", "running_mean", "running_var"];

/// Looks up a convolution weight and checks it is 4D before any axis
/// extent is read, so a malformed store fails instead of panicking.
fn require_conv<'a>(store: &'a WeightStore, name: &str) -> Result<&'a Tensor> {
    let tensor = store.require(name)?;
    if tensor.dim() != 4 {
        return Err(EsbozarError::DimensionMismatch {
            expected: format!("4D convolution weight at '{name}'"),
            actual: format!("{}D tensor", tensor.dim()),
        });
    }
    Ok(tensor)
}

/// Runs the transplant walk over `descriptors`.
///
/// `target_init` is the target model's freshly initialized store and
/// doubles as the declared shape table; the result always matches it
/// shape-for-shape.
///
/// # Errors
///
/// Fails on missing source tensors for sketched layers, on shape
/// mismatches between a produced tensor and the target declaration, and
/// on sketch-engine errors.
pub(crate) fn run_walk(
    descriptors: &[LayerDescriptor],
    source: &WeightStore,
    target_init: &WeightStore,
    cfg: &SketchConfig,
) -> Result<WeightStore> {
    let mut target = target_init.clone();
    let mut written: BTreeSet<String> = BTreeSet::new();
    let mut preserve = false;

    for d in descriptors {
        match d.role {
            // Populated by the completeness pass.
            LayerRole::FirstConv | LayerRole::BatchNorm => {}
            LayerRole::Linear { reset } => {
                // A reset linear layer keeps its fresh initialization
                // even when the source shape coincides.
                if reset {
                    for suffix in ["weight", "bias"] {
                        written.insert(format!("{}.{suffix}", d.name));
                    }
                }
            }
            LayerRole::RegularConv { block_first } => {
                let weight_name = format!("{}.weight", d.name);
                let ori = require_conv(source, &weight_name)?;
                let l = require_conv(&target, &weight_name)?.size(0);
                let flat_input = ori.size(1) * ori.size(2) * ori.size(3);

                if l < flat_input {
                    let bn_pair = match (&d.bn, cfg.sketch_bn) {
                        (Some(bn), true) => Some((
                            source.require(&format!("{bn}.weight"))?,
                            source.require(&format!("{bn}.bias"))?,
                        )),
                        _ => None,
                    };
                    let out = sketch_tensor(
                        ori,
                        l,
                        SketchDim::Filter,
                        bn_pair,
                        cfg.norm_method,
                        cfg.per_filter_norm,
                    )?;
                    if let (Some(bn), Some((bn_weight, bn_bias))) = (&d.bn, out.bn) {
                        target.insert_checked(
                            &format!("{bn}.weight"),
                            Tensor::new(&[l], bn_weight.into_vec())?,
                        )?;
                        target.insert_checked(
                            &format!("{bn}.bias"),
                            Tensor::new(&[l], bn_bias.into_vec())?,
                        )?;
                    }
                    // A filter-sketched conv invalidates its bn either
                    // way: affine pairs come from the co-sketch when
                    // enabled, and running statistics always keep the
                    // target's fresh initialization.
                    if let Some(bn) = &d.bn {
                        mark_bn_written(&mut written, bn);
                    }

                    let reduced = if preserve || block_first {
                        debug!("{}: filter sketch to {l} (input width preserved)", d.name);
                        out.weight
                    } else {
                        let l_in = target.require(&weight_name)?.size(1);
                        debug!("{}: filter sketch to {l}, channel sketch to {l_in}", d.name);
                        sketch_tensor(
                            &out.weight,
                            l_in,
                            SketchDim::Channel,
                            None,
                            cfg.norm_method,
                            cfg.per_filter_norm,
                        )?
                        .weight
                    };
                    target.insert_checked(&weight_name, reduced)?;
                    preserve = false;
                } else {
                    debug!(
                        "{}: target width {l} covers flattened input {flat_input}, copying",
                        d.name
                    );
                    target.insert_checked(&weight_name, ori.clone())?;
                    preserve = true;
                }
                written.insert(weight_name);
            }
            LayerRole::LastConv => {
                let weight_name = format!("{}.weight", d.name);
                let ori = require_conv(source, &weight_name)?;
                let l_in = require_conv(&target, &weight_name)?.size(1);
                let out = sketch_tensor(
                    ori,
                    l_in,
                    SketchDim::Channel,
                    None,
                    cfg.norm_method,
                    cfg.per_filter_norm,
                )?;
                target.insert_checked(&weight_name, out.weight)?;
                written.insert(weight_name);
                // Output width is pinned, so the chain state carries
                // through unchanged.
            }
            LayerRole::Branch(kind) => {
                let weight_name = format!("{}.weight", d.name);
                let ori = require_conv(source, &weight_name)?;
                let declared = require_conv(&target, &weight_name)?;
                let (l_out, l_in) = (declared.size(0), declared.size(1));

                let reduced = match kind {
                    BranchKind::FilterOnly => {
                        sketch_tensor(
                            ori,
                            l_out,
                            SketchDim::Filter,
                            None,
                            cfg.norm_method,
                            cfg.per_filter_norm,
                        )?
                        .weight
                    }
                    BranchKind::ChannelOnly => {
                        sketch_tensor(
                            ori,
                            l_in,
                            SketchDim::Channel,
                            None,
                            cfg.norm_method,
                            cfg.per_filter_norm,
                        )?
                        .weight
                    }
                    BranchKind::FilterAndChannel => {
                        let filtered = sketch_tensor(
                            ori,
                            l_out,
                            SketchDim::Filter,
                            None,
                            cfg.norm_method,
                            cfg.per_filter_norm,
                        )?
                        .weight;
                        sketch_tensor(
                            &filtered,
                            l_in,
                            SketchDim::Channel,
                            None,
                            cfg.norm_method,
                            cfg.per_filter_norm,
                        )?
                        .weight
                    }
                };
                target.insert_checked(&weight_name, reduced)?;
                written.insert(weight_name);
                // Filter-dim sketching invalidates the paired bn.
                if !matches!(kind, BranchKind::ChannelOnly) {
                    if let Some(bn) = &d.bn {
                        mark_bn_written(&mut written, bn);
                    }
                }
            }
        }
    }

    let copied = fill_untouched(&mut target, &written, source);
    info!(
        "transplant walk complete: {} sketched, {} copied, {} kept at init",
        written.len(),
        copied,
        target.len() - written.len() - copied
    );

    target.validate_against(target_init)?;
    Ok(target)
}

fn mark_bn_written(written: &mut BTreeSet<String>, bn: &str) {
    for suffix in BN_SUFFIXES {
        written.insert(format!("{bn}.{suffix}"));
    }
}

/// Completeness pass: every declared target tensor the walk did not
/// touch is copied verbatim from the source when the source has the
/// same name with the same shape; otherwise it keeps the target's
/// fresh initialization. Returns the number of tensors copied.
fn fill_untouched(
    target: &mut WeightStore,
    written: &BTreeSet<String>,
    source: &WeightStore,
) -> usize {
    let mut copied = 0;
    let names: Vec<String> = target.names().cloned().collect();
    for name in names {
        if written.contains(&name) {
            continue;
        }
        match source.get(&name) {
            Some(src) if src.shape() == target.get(&name).map(Tensor::shape).unwrap_or(&[]) => {
                target.insert(name, src.clone());
                copied += 1;
            }
            Some(src) => {
                debug!(
                    "{name}: source shape {:?} differs from target, keeping init",
                    src.shape()
                );
            }
            None => {
                debug!("{name}: absent from source, keeping init");
            }
        }
    }
    copied
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
