pub(crate) use super::*;

use crate::plan::descriptor::LayerRole;

#[test]
fn test_thirteen_convs_plus_classifier() {
    let d = descriptors(&SketchConfig::default());
    assert_eq!(d.len(), 14);
    assert_eq!(d[0].name, "features.0");
    assert_eq!(d[0].role, LayerRole::FirstConv);
    assert_eq!(d[13].name, "classifier");
    assert_eq!(d[13].role, LayerRole::Linear { reset: false });
}

#[test]
fn test_bn_follows_each_conv() {
    let d = descriptors(&SketchConfig::default());
    for (pos, &idx) in CONV_INDICES.iter().enumerate() {
        assert_eq!(d[pos].name, format!("features.{idx}"));
        assert_eq!(d[pos].bn.as_deref(), Some(format!("features.{}", idx + 1).as_str()));
    }
}

#[test]
fn test_tail_conv_is_channel_only_by_default() {
    let d = descriptors(&SketchConfig::default());
    assert_eq!(d[12].name, "features.40");
    assert_eq!(d[12].role, LayerRole::LastConv);
}

#[test]
fn test_sketch_lastconv_promotes_tail_conv() {
    let cfg = SketchConfig {
        sketch_lastconv: true,
        ..SketchConfig::default()
    };
    let d = descriptors(&cfg);
    assert_eq!(d[12].role, LayerRole::RegularConv { block_first: false });
    // The classifier's input contract is broken, so it keeps its init.
    assert_eq!(d[13].role, LayerRole::Linear { reset: true });
}

#[test]
fn test_interior_convs_are_regular() {
    let d = descriptors(&SketchConfig::default());
    for item in &d[1..12] {
        assert_eq!(item.role, LayerRole::RegularConv { block_first: false });
    }
}
