pub(crate) use super::*;

use crate::plan::descriptor::LayerRole;

#[test]
fn test_basic_stage_layout() {
    let d = basic_descriptors(&[9, 9, 9]);
    // Stem + 27 blocks of 2 convs + classifier.
    assert_eq!(d.len(), 1 + 27 * 2 + 1);
    assert_eq!(d[0].name, "conv1");
    assert_eq!(d[0].role, LayerRole::FirstConv);
    assert_eq!(d[d.len() - 1].name, "fc");
    assert_eq!(d[d.len() - 1].role, LayerRole::Linear { reset: false });
}

#[test]
fn test_basic_block_roles() {
    let d = basic_descriptors(&[9, 9, 9]);
    // First block of stage 1 sits right after the stem.
    assert_eq!(d[1].name, "layer1.0.conv1");
    assert_eq!(d[1].role, LayerRole::RegularConv { block_first: true });
    assert_eq!(d[1].bn.as_deref(), Some("layer1.0.bn1"));
    assert_eq!(d[2].name, "layer1.0.conv2");
    assert_eq!(d[2].role, LayerRole::LastConv);
    assert_eq!(d[2].bn.as_deref(), Some("layer1.0.bn2"));
}

#[test]
fn test_basic_stage_boundaries() {
    let d = basic_descriptors(&[18, 18, 18]);
    assert_eq!(d.len(), 1 + 54 * 2 + 1);
    // First block of stage 2 follows the 18 blocks of stage 1.
    assert_eq!(d[1 + 18 * 2].name, "layer2.0.conv1");
    assert_eq!(d[1 + 36 * 2].name, "layer3.0.conv1");
}

#[test]
fn test_imagenet_basic_blocks() {
    let d = imagenet_descriptors(&[2, 2, 2, 2], 2);
    assert_eq!(d.len(), 1 + 8 * 2 + 1);
    assert_eq!(d[1].name, "layer1.0.conv1");
    assert_eq!(d[1].role, LayerRole::RegularConv { block_first: true });
    assert_eq!(d[2].name, "layer1.0.conv2");
    assert_eq!(d[2].role, LayerRole::LastConv);
}

#[test]
fn test_imagenet_bottleneck_blocks() {
    let d = imagenet_descriptors(&[3, 4, 6, 3], 3);
    assert_eq!(d.len(), 1 + 16 * 3 + 1);
    // Bottleneck: conv1 opens, conv2 is interior, conv3 closes.
    assert_eq!(d[1].role, LayerRole::RegularConv { block_first: true });
    assert_eq!(d[2].name, "layer1.0.conv2");
    assert_eq!(d[2].role, LayerRole::RegularConv { block_first: false });
    assert_eq!(d[3].name, "layer1.0.conv3");
    assert_eq!(d[3].role, LayerRole::LastConv);
    assert_eq!(d[3].bn.as_deref(), Some("layer1.0.bn3"));
}

#[test]
fn test_deep_bottleneck_counts() {
    assert_eq!(
        imagenet_descriptors(&[3, 4, 23, 3], 3).len(),
        1 + 33 * 3 + 1
    );
    assert_eq!(
        imagenet_descriptors(&[3, 8, 36, 3], 3).len(),
        1 + 50 * 3 + 1
    );
}
