pub(crate) use super::*;

fn sample_store() -> WeightStore {
    let mut store = WeightStore::new();
    store.insert("conv1.weight", Tensor::zeros(&[16, 3, 3, 3]));
    store.insert("bn1.weight", Tensor::ones(&[16]));
    store.insert("fc.weight", Tensor::zeros(&[10, 64]));
    store
}

#[test]
fn test_insert_and_get() {
    let store = sample_store();
    assert_eq!(store.len(), 3);
    assert!(store.contains("conv1.weight"));
    assert_eq!(
        store.get("conv1.weight").expect("inserted above").shape(),
        &[16, 3, 3, 3]
    );
    assert!(store.get("conv2.weight").is_none());
}

#[test]
fn test_require_missing() {
    let store = sample_store();
    let err = store.require("conv9.weight").expect_err("name is absent");
    assert!(err.to_string().contains("conv9.weight"));
}

#[test]
fn test_insert_overwrites() {
    let mut store = sample_store();
    store.insert("bn1.weight", Tensor::zeros(&[16]));
    assert!(store
        .get("bn1.weight")
        .expect("still present")
        .as_slice()
        .iter()
        .all(|&x| x == 0.0));
    assert_eq!(store.len(), 3);
}

#[test]
fn test_insert_checked_accepts_declared_shape() {
    let mut store = sample_store();
    store
        .insert_checked("bn1.weight", Tensor::zeros(&[16]))
        .expect("shape matches declaration");
}

#[test]
fn test_insert_checked_rejects_shape_change() {
    let mut store = sample_store();
    let err = store
        .insert_checked("bn1.weight", Tensor::zeros(&[8]))
        .expect_err("shape differs from declaration");
    assert!(matches!(err, EsbozarError::ShapeMismatch { .. }));
}

#[test]
fn test_insert_checked_rejects_undeclared_name() {
    let mut store = sample_store();
    assert!(store
        .insert_checked("conv2.weight", Tensor::zeros(&[8, 16, 3, 3]))
        .is_err());
}

#[test]
fn test_validate_against_complete_store() {
    let declared = sample_store();
    let store = sample_store();
    store
        .validate_against(&declared)
        .expect("identical stores validate");
}

#[test]
fn test_validate_against_detects_missing_name() {
    let declared = sample_store();
    let mut store = WeightStore::new();
    store.insert("conv1.weight", Tensor::zeros(&[16, 3, 3, 3]));
    assert!(store.validate_against(&declared).is_err());
}

#[test]
fn test_validate_against_detects_shape_mismatch() {
    let declared = sample_store();
    let mut store = sample_store();
    store.insert("fc.weight", Tensor::zeros(&[10, 32]));
    let err = store
        .validate_against(&declared)
        .expect_err("fc shape differs");
    assert!(matches!(err, EsbozarError::ShapeMismatch { .. }));
}

#[test]
fn test_iteration_is_name_ordered() {
    let store = sample_store();
    let names: Vec<&String> = store.names().collect();
    assert_eq!(names, vec!["bn1.weight", "conv1.weight", "fc.weight"]);
}
