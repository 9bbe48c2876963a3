//! Descriptor builder for GoogLeNet's Inception modules.
//!
//! Branch widths are configured independently per module, so the
//! preserve chain never applies here; every branch sub-path carries a
//! fixed sketch kind instead. Within a sub-path, convolutions sit at
//! even indices and their batch norms at the following odd index. The
//! 1x1 and pooling branches keep their widths and are handled by the
//! completeness pass.

use crate::plan::descriptor::{BranchKind, LayerDescriptor};

/// Inception modules in topological order.
const MODULES: [&str; 9] = ["a3", "b3", "a4", "b4", "c4", "d4", "e4", "a5", "b5"];

pub(crate) fn descriptors() -> Vec<LayerDescriptor> {
    let mut out = Vec::with_capacity(MODULES.len() * 5 + 1);
    for module in MODULES {
        // 3x3 branch: reduce conv then the 3x3 conv.
        out.push(LayerDescriptor::branch(
            format!("{module}.branch3x3.0"),
            Some(format!("{module}.branch3x3.1")),
            BranchKind::FilterOnly,
        ));
        out.push(LayerDescriptor::branch(
            format!("{module}.branch3x3.3"),
            None,
            BranchKind::ChannelOnly,
        ));
        // 5x5 branch: reduce conv, then two stacked 3x3 convs.
        out.push(LayerDescriptor::branch(
            format!("{module}.branch5x5.0"),
            Some(format!("{module}.branch5x5.1")),
            BranchKind::FilterOnly,
        ));
        out.push(LayerDescriptor::branch(
            format!("{module}.branch5x5.3"),
            Some(format!("{module}.branch5x5.4")),
            BranchKind::FilterAndChannel,
        ));
        out.push(LayerDescriptor::branch(
            format!("{module}.branch5x5.6"),
            None,
            BranchKind::ChannelOnly,
        ));
    }
    out.push(LayerDescriptor::linear("linear"));
    out
}

#[cfg(test)]
#[path = "inception_tests.rs"]
mod tests;
