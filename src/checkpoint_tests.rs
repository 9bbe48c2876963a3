pub(crate) use super::*;

fn sample_store() -> WeightStore {
    let mut store = WeightStore::new();
    store.insert(
        "conv1.weight",
        Tensor::new(&[2, 1, 2, 2], vec![1.0, -2.0, 3.0, -4.0, 5.0, -6.0, 7.0, -8.0])
            .expect("8 elements fit a 2x1x2x2 shape"),
    );
    store.insert(
        "bn1.weight",
        Tensor::new(&[2], vec![0.5, 1.5]).expect("2 elements fit shape [2]"),
    );
    store
}

#[test]
fn test_round_trip() {
    let dir = tempfile::tempdir().expect("temp dir creation succeeds");
    let path = dir.path().join("model.safetensors");

    let store = sample_store();
    let meta = CheckpointMeta {
        best_acc: Some(93.27),
        epoch: Some(150),
    };
    save(&path, &store, &meta).expect("save to temp dir succeeds");

    let (loaded, loaded_meta) = load(&path).expect("file written above");
    assert_eq!(loaded, store);
    assert_eq!(loaded_meta, meta);
}

#[test]
fn test_round_trip_without_meta() {
    let dir = tempfile::tempdir().expect("temp dir creation succeeds");
    let path = dir.path().join("bare.safetensors");

    save(&path, &sample_store(), &CheckpointMeta::default()).expect("save succeeds");
    let (loaded, meta) = load(&path).expect("file written above");
    assert_eq!(loaded.len(), 2);
    assert_eq!(meta, CheckpointMeta::default());
}

#[test]
fn test_missing_path_is_fatal() {
    let err = load("/nonexistent/model.safetensors").expect_err("path does not exist");
    assert!(matches!(err, EsbozarError::MissingCheckpoint { .. }));
}

#[test]
fn test_truncated_file_rejected() {
    let dir = tempfile::tempdir().expect("temp dir creation succeeds");
    let path = dir.path().join("short.safetensors");
    std::fs::write(&path, [0_u8; 4]).expect("write succeeds");
    let err = load(&path).expect_err("file shorter than header");
    assert!(matches!(err, EsbozarError::FormatError { .. }));
}

#[test]
fn test_lying_header_length_rejected() {
    let dir = tempfile::tempdir().expect("temp dir creation succeeds");
    let path = dir.path().join("lying.safetensors");
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&1000_u64.to_le_bytes());
    bytes.extend_from_slice(b"{}");
    std::fs::write(&path, bytes).expect("write succeeds");
    let err = load(&path).expect_err("header length exceeds file");
    assert!(matches!(err, EsbozarError::FormatError { .. }));
}
