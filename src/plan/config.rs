//! Transplant configuration and the architecture registry.

use crate::error::{EsbozarError, Result};
use crate::plan::descriptor::LayerDescriptor;
use crate::plan::{dense, inception, resnet, vgg};
use crate::sketch::NormMethod;

/// Options controlling how a transplant sketches each layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SketchConfig {
    /// Co-sketch each convolution's batch-norm scale and shift as two
    /// extra columns of the filter matrix.
    pub sketch_bn: bool,
    /// Treat the tail convolution of a plain stack as sketchable
    /// instead of channel-only. When set, the classifier that consumes
    /// its output keeps the target's fresh initialization.
    pub sketch_lastconv: bool,
    /// Normalization applied to sketched weights.
    pub norm_method: NormMethod,
    /// Normalize per output filter instead of over the whole weight.
    pub per_filter_norm: bool,
}

/// A supported model family, resolved from its configuration name.
///
/// Each variant carries just enough structure to enumerate the family's
/// layers as descriptors; parameter shapes come from the weight stores
/// at transplant time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Architecture {
    /// A plain convolution stack with interleaved batch norm (VGG-16).
    PlainStack,
    /// CIFAR-style residual net built from three stages of two-conv
    /// basic blocks.
    ResNetBasic {
        /// Blocks per stage.
        blocks: [usize; 3],
    },
    /// ImageNet-style residual net with four stages.
    ResNetImageNet {
        /// Blocks per stage.
        blocks: [usize; 4],
        /// Convolutions per block: 2 for basic blocks, 3 for
        /// bottleneck blocks.
        convs_per_block: usize,
    },
    /// GoogLeNet with its nine statically enumerated Inception modules.
    Inception,
    /// Densely connected stack of single-conv layers.
    DenseStack {
        /// Number of dense blocks.
        blocks: usize,
        /// Layers per dense block.
        layers_per_block: usize,
    },
}

impl Architecture {
    /// Resolves a configuration name into an architecture.
    ///
    /// # Errors
    ///
    /// Returns `UnknownArchitecture` for names outside the registry.
    pub fn from_config(name: &str) -> Result<Self> {
        match name {
            "vgg16" => Ok(Self::PlainStack),
            "resnet56" => Ok(Self::ResNetBasic { blocks: [9, 9, 9] }),
            "resnet110" => Ok(Self::ResNetBasic {
                blocks: [18, 18, 18],
            }),
            "resnet18" => Ok(Self::ResNetImageNet {
                blocks: [2, 2, 2, 2],
                convs_per_block: 2,
            }),
            "resnet34" => Ok(Self::ResNetImageNet {
                blocks: [3, 4, 6, 3],
                convs_per_block: 2,
            }),
            "resnet50" => Ok(Self::ResNetImageNet {
                blocks: [3, 4, 6, 3],
                convs_per_block: 3,
            }),
            "resnet101" => Ok(Self::ResNetImageNet {
                blocks: [3, 4, 23, 3],
                convs_per_block: 3,
            }),
            "resnet152" => Ok(Self::ResNetImageNet {
                blocks: [3, 8, 36, 3],
                convs_per_block: 3,
            }),
            "googlenet" => Ok(Self::Inception),
            "densenet40" => Ok(Self::DenseStack {
                blocks: 3,
                layers_per_block: 12,
            }),
            other => Err(EsbozarError::UnknownArchitecture {
                name: other.to_string(),
            }),
        }
    }

    /// Enumerates the family's layers in topological order.
    #[must_use]
    pub fn descriptors(&self, cfg: &SketchConfig) -> Vec<LayerDescriptor> {
        match self {
            Self::PlainStack => vgg::descriptors(cfg),
            Self::ResNetBasic { blocks } => resnet::basic_descriptors(blocks),
            Self::ResNetImageNet {
                blocks,
                convs_per_block,
            } => resnet::imagenet_descriptors(blocks, *convs_per_block),
            Self::Inception => inception::descriptors(),
            Self::DenseStack {
                blocks,
                layers_per_block,
            } => dense::descriptors(*blocks, *layers_per_block),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
