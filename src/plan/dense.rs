//! Descriptor builder for densely connected stacks.
//!
//! Each dense layer contributes one convolution whose output is
//! concatenated onto the running feature map, so no width inside a
//! block is pinned by a residual contract; the generic preserve chain
//! applies unchanged. The stack is pre-activation: each `bn1`
//! normalizes its convolution's *input*, not its output, so it is not
//! paired for co-sketching and the completeness pass carries it along
//! with the transition convolutions and the final batch norm.

use crate::plan::descriptor::LayerDescriptor;

pub(crate) fn descriptors(blocks: usize, layers_per_block: usize) -> Vec<LayerDescriptor> {
    let mut out = Vec::with_capacity(blocks * layers_per_block + 2);
    out.push(LayerDescriptor::first_conv("conv1", None));
    for block in 1..=blocks {
        for layer in 0..layers_per_block {
            out.push(LayerDescriptor::regular(
                format!("dense{block}.{layer}.conv1"),
                None,
                false,
            ));
        }
    }
    out.push(LayerDescriptor::linear("fc"));
    out
}

#[cfg(test)]
#[path = "dense_tests.rs"]
mod tests;
