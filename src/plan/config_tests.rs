pub(crate) use super::*;

use crate::error::EsbozarError;

#[test]
fn test_registry_resolves_known_names() {
    assert_eq!(
        Architecture::from_config("vgg16").expect("registered"),
        Architecture::PlainStack
    );
    assert_eq!(
        Architecture::from_config("resnet56").expect("registered"),
        Architecture::ResNetBasic { blocks: [9, 9, 9] }
    );
    assert_eq!(
        Architecture::from_config("resnet110").expect("registered"),
        Architecture::ResNetBasic {
            blocks: [18, 18, 18]
        }
    );
    assert_eq!(
        Architecture::from_config("googlenet").expect("registered"),
        Architecture::Inception
    );
    assert_eq!(
        Architecture::from_config("densenet40").expect("registered"),
        Architecture::DenseStack {
            blocks: 3,
            layers_per_block: 12
        }
    );
}

#[test]
fn test_imagenet_resnet_depths() {
    let r18 = Architecture::from_config("resnet18").expect("registered");
    assert_eq!(
        r18,
        Architecture::ResNetImageNet {
            blocks: [2, 2, 2, 2],
            convs_per_block: 2
        }
    );
    let r50 = Architecture::from_config("resnet50").expect("registered");
    assert_eq!(
        r50,
        Architecture::ResNetImageNet {
            blocks: [3, 4, 6, 3],
            convs_per_block: 3
        }
    );
    let r101 = Architecture::from_config("resnet101").expect("registered");
    assert_eq!(
        r101,
        Architecture::ResNetImageNet {
            blocks: [3, 4, 23, 3],
            convs_per_block: 3
        }
    );
    let r152 = Architecture::from_config("resnet152").expect("registered");
    assert_eq!(
        r152,
        Architecture::ResNetImageNet {
            blocks: [3, 8, 36, 3],
            convs_per_block: 3
        }
    );
}

#[test]
fn test_unknown_name_is_rejected() {
    let err = Architecture::from_config("alexnet").expect_err("not registered");
    assert!(matches!(err, EsbozarError::UnknownArchitecture { .. }));
    assert!(err.to_string().contains("alexnet"));
}

#[test]
fn test_default_config_sketches_nothing_extra() {
    let cfg = SketchConfig::default();
    assert!(!cfg.sketch_bn);
    assert!(!cfg.sketch_lastconv);
    assert_eq!(cfg.norm_method, NormMethod::None);
    assert!(!cfg.per_filter_norm);
}
