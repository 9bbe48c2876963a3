//! Layer descriptors driving the transplant walk.
//!
//! Each supported architecture resolves, once, into a flat sequence of
//! descriptors in topological order. The walker consumes the sequence
//! without ever inspecting module types at runtime; every sketch
//! decision is encoded in the descriptor's role.

/// Fixed sketch treatment of a statically enumerated Inception branch
/// sub-path. Branch widths are configured independently, so the
/// preserve chain does not apply to branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    /// Sketch the output-channel axis only.
    FilterOnly,
    /// Sketch the input-channel axis only.
    ChannelOnly,
    /// Sketch both axes, filter first.
    FilterAndChannel,
}

/// Sketch treatment of one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerRole {
    /// The stack's very first convolution: input channels are fixed by
    /// the dataset, so it is never sketched (copied verbatim).
    FirstConv,
    /// An ordinary sketchable convolution. `block_first` marks the
    /// first convolution of a residual block, whose input width is
    /// fixed by the block contract and therefore never channel-sketched.
    RegularConv {
        /// First convolution in its block.
        block_first: bool,
    },
    /// The closing convolution of a block (or the tail convolution
    /// before pooling): its output width is fixed by the residual-add
    /// contract, so only the channel axis is sketched.
    LastConv,
    /// An Inception branch sub-path with a fixed sketch kind.
    Branch(BranchKind),
    /// A standalone batch-norm layer; populated by the completeness
    /// pass.
    BatchNorm,
    /// A fully-connected layer; copied verbatim unless its input width
    /// changed underneath it.
    Linear {
        /// Keep the target's fresh initialization even when the source
        /// shape coincides; set when an upstream filter sketch broke
        /// the layer's input contract.
        reset: bool,
    },
}

/// Architecture-specific metadata for one layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerDescriptor {
    /// Module name; the weight lives at `<name>.weight`.
    pub name: String,
    /// Paired batch-norm module name, when the layer has one.
    pub bn: Option<String>,
    /// Sketch treatment.
    pub role: LayerRole,
}

impl LayerDescriptor {
    /// Stack-leading convolution, never sketched.
    pub fn first_conv(name: impl Into<String>, bn: Option<String>) -> Self {
        Self {
            name: name.into(),
            bn,
            role: LayerRole::FirstConv,
        }
    }

    /// Ordinary sketchable convolution.
    pub fn regular(name: impl Into<String>, bn: Option<String>, block_first: bool) -> Self {
        Self {
            name: name.into(),
            bn,
            role: LayerRole::RegularConv { block_first },
        }
    }

    /// Block-closing convolution, channel-sketched only.
    pub fn last_conv(name: impl Into<String>, bn: Option<String>) -> Self {
        Self {
            name: name.into(),
            bn,
            role: LayerRole::LastConv,
        }
    }

    /// Inception branch sub-path with a fixed sketch kind.
    pub fn branch(name: impl Into<String>, bn: Option<String>, kind: BranchKind) -> Self {
        Self {
            name: name.into(),
            bn,
            role: LayerRole::Branch(kind),
        }
    }

    /// Standalone batch-norm layer.
    pub fn batch_norm(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bn: None,
            role: LayerRole::BatchNorm,
        }
    }

    /// Fully-connected layer, carried by the completeness pass.
    pub fn linear(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bn: None,
            role: LayerRole::Linear { reset: false },
        }
    }

    /// Fully-connected layer whose input contract was broken upstream;
    /// it keeps the target's fresh initialization.
    pub fn linear_reset(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bn: None,
            role: LayerRole::Linear { reset: true },
        }
    }
}
