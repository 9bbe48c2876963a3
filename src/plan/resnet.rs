//! Descriptor builders for residual families.
//!
//! Within each block the first convolution opens the preserve chain
//! (`block_first`, never channel-sketched) and the closing convolution
//! is channel-only, since its output width is pinned by the residual
//! add. Stem and downsample parameters are left to the completeness
//! pass.

use crate::plan::descriptor::LayerDescriptor;

/// CIFAR-style net: stem conv, three stages of two-conv basic blocks,
/// then a linear classifier.
pub(crate) fn basic_descriptors(blocks: &[usize; 3]) -> Vec<LayerDescriptor> {
    let total: usize = blocks.iter().sum();
    let mut out = Vec::with_capacity(2 * total + 3);
    out.push(LayerDescriptor::first_conv("conv1", Some("bn1".to_string())));
    for (stage, &num) in blocks.iter().enumerate() {
        for block in 0..num {
            let base = format!("layer{}.{block}", stage + 1);
            out.push(LayerDescriptor::regular(
                format!("{base}.conv1"),
                Some(format!("{base}.bn1")),
                true,
            ));
            out.push(LayerDescriptor::last_conv(
                format!("{base}.conv2"),
                Some(format!("{base}.bn2")),
            ));
        }
    }
    out.push(LayerDescriptor::linear("fc"));
    out
}

/// ImageNet-style net with four stages; `convs_per_block` is 2 for
/// basic blocks and 3 for bottleneck blocks.
pub(crate) fn imagenet_descriptors(blocks: &[usize; 4], convs_per_block: usize) -> Vec<LayerDescriptor> {
    let total: usize = blocks.iter().sum();
    let mut out = Vec::with_capacity(convs_per_block * total + 3);
    out.push(LayerDescriptor::first_conv("conv1", Some("bn1".to_string())));
    for (stage, &num) in blocks.iter().enumerate() {
        for block in 0..num {
            let base = format!("layer{}.{block}", stage + 1);
            for conv in 1..=convs_per_block {
                let name = format!("{base}.conv{conv}");
                let bn = Some(format!("{base}.bn{conv}"));
                let descriptor = if conv == convs_per_block {
                    LayerDescriptor::last_conv(name, bn)
                } else {
                    LayerDescriptor::regular(name, bn, conv == 1)
                };
                out.push(descriptor);
            }
        }
    }
    out.push(LayerDescriptor::linear("fc"));
    out
}

#[cfg(test)]
#[path = "resnet_tests.rs"]
mod tests;
