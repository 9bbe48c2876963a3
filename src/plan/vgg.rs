//! Descriptor builder for the plain VGG-16 stack.

use crate::plan::config::SketchConfig;
use crate::plan::descriptor::LayerDescriptor;

/// Sequential indices of the 13 convolutions inside `features`; each is
/// immediately followed by its batch norm at the next index.
const CONV_INDICES: [usize; 13] = [0, 3, 7, 10, 14, 17, 20, 24, 27, 30, 34, 37, 40];

pub(crate) fn descriptors(cfg: &SketchConfig) -> Vec<LayerDescriptor> {
    let last = CONV_INDICES.len() - 1;
    let mut out = Vec::with_capacity(CONV_INDICES.len() + 1);
    for (pos, &idx) in CONV_INDICES.iter().enumerate() {
        let name = format!("features.{idx}");
        let bn = Some(format!("features.{}", idx + 1));
        let descriptor = if pos == 0 {
            LayerDescriptor::first_conv(name, bn)
        } else if pos == last && !cfg.sketch_lastconv {
            // The tail conv feeds the classifier through pooling, so its
            // output width stays fixed unless explicitly overridden.
            LayerDescriptor::last_conv(name, bn)
        } else {
            LayerDescriptor::regular(name, bn, false)
        };
        out.push(descriptor);
    }
    // Sketching the tail conv changes the classifier's input contract.
    if cfg.sketch_lastconv {
        out.push(LayerDescriptor::linear_reset("classifier"));
    } else {
        out.push(LayerDescriptor::linear("classifier"));
    }
    out
}

#[cfg(test)]
#[path = "vgg_tests.rs"]
mod tests;
