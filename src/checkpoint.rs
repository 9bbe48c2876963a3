//! Checkpoint persistence for weight stores.
//!
//! Uses the `SafeTensors` container layout:
//! ```text
//! [8-byte header: u64 metadata length (little-endian)]
//! [JSON metadata: tensor names, dtypes, shapes, data_offsets]
//! [Raw tensor data: F32 values in little-endian]
//! ```
//! Transplant bookkeeping (best accuracy, epoch) rides in the standard
//! `__metadata__` string map.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EsbozarError, Result};
use crate::primitives::Tensor;
use crate::store::WeightStore;

/// Metadata for a single tensor in the container.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TensorMetadata {
    /// Data type of the tensor; only "F32" is produced or accepted.
    dtype: String,
    /// Shape of the tensor.
    shape: Vec<usize>,
    /// Data offsets `[start, end]` in the raw data section.
    data_offsets: [usize; 2],
}

/// Optional bookkeeping carried alongside a checkpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckpointMeta {
    /// Best accuracy observed by the training loop that produced this
    /// checkpoint, if recorded.
    pub best_acc: Option<f32>,
    /// Epoch the checkpoint was taken at, if recorded.
    pub epoch: Option<u32>,
}

impl CheckpointMeta {
    fn to_string_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        if let Some(acc) = self.best_acc {
            map.insert("best_acc".to_string(), acc.to_string());
        }
        if let Some(epoch) = self.epoch {
            map.insert("epoch".to_string(), epoch.to_string());
        }
        map
    }

    fn from_string_map(map: &BTreeMap<String, String>) -> Self {
        Self {
            best_acc: map.get("best_acc").and_then(|s| s.parse().ok()),
            epoch: map.get("epoch").and_then(|s| s.parse().ok()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum HeaderEntry {
    Tensor(TensorMetadata),
    Meta(BTreeMap<String, String>),
}

/// Saves a weight store (and optional bookkeeping) to a checkpoint file.
///
/// # Errors
///
/// Returns `Serialization` if the header can't be encoded and `Io` on
/// write failures.
pub fn save<P: AsRef<Path>>(
    path: P,
    store: &WeightStore,
    meta: &CheckpointMeta,
) -> Result<()> {
    let mut header: BTreeMap<String, HeaderEntry> = BTreeMap::new();
    let mut raw_data = Vec::new();
    let mut offset = 0;

    let string_map = meta.to_string_map();
    if !string_map.is_empty() {
        header.insert("__metadata__".to_string(), HeaderEntry::Meta(string_map));
    }

    for (name, tensor) in store.iter() {
        let start = offset;
        let end = start + tensor.numel() * 4;
        header.insert(
            name.clone(),
            HeaderEntry::Tensor(TensorMetadata {
                dtype: "F32".to_string(),
                shape: tensor.shape().to_vec(),
                data_offsets: [start, end],
            }),
        );
        for &value in tensor.as_slice() {
            raw_data.extend_from_slice(&value.to_le_bytes());
        }
        offset = end;
    }

    let header_json =
        serde_json::to_string(&header).map_err(|e| EsbozarError::Serialization(e.to_string()))?;
    let header_bytes = header_json.as_bytes();

    let mut output = Vec::with_capacity(8 + header_bytes.len() + raw_data.len());
    output.extend_from_slice(&(header_bytes.len() as u64).to_le_bytes());
    output.extend_from_slice(header_bytes);
    output.extend_from_slice(&raw_data);

    fs::write(path, output)?;
    Ok(())
}

/// Loads a weight store and its bookkeeping from a checkpoint file.
///
/// Fails with `MissingCheckpoint` before reading anything when the path
/// does not exist; no sketching may begin without a source store.
///
/// # Errors
///
/// Returns `MissingCheckpoint`, `FormatError` for truncated or malformed
/// containers, and `Io` on read failures.
pub fn load<P: AsRef<Path>>(path: P) -> Result<(WeightStore, CheckpointMeta)> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(EsbozarError::MissingCheckpoint {
            path: path.display().to_string(),
        });
    }

    let bytes = fs::read(path)?;
    if bytes.len() < 8 {
        return Err(EsbozarError::FormatError {
            message: "file shorter than the 8-byte header".to_string(),
        });
    }

    let header_len = u64::from_le_bytes(
        bytes[..8]
            .try_into()
            .expect("slice of length 8 converts to [u8; 8]"),
    ) as usize;
    if bytes.len() < 8 + header_len {
        return Err(EsbozarError::FormatError {
            message: format!(
                "declared header length {header_len} exceeds file size {}",
                bytes.len()
            ),
        });
    }

    let header: BTreeMap<String, HeaderEntry> =
        serde_json::from_slice(&bytes[8..8 + header_len])
            .map_err(|e| EsbozarError::Serialization(e.to_string()))?;
    let data = &bytes[8 + header_len..];

    let mut store = WeightStore::new();
    let mut meta = CheckpointMeta::default();

    for (name, entry) in header {
        match entry {
            HeaderEntry::Meta(map) => {
                if name == "__metadata__" {
                    meta = CheckpointMeta::from_string_map(&map);
                } else {
                    return Err(EsbozarError::FormatError {
                        message: format!("unexpected string-map entry '{name}'"),
                    });
                }
            }
            HeaderEntry::Tensor(tm) => {
                if tm.dtype != "F32" {
                    return Err(EsbozarError::FormatError {
                        message: format!("tensor '{name}' has unsupported dtype {}", tm.dtype),
                    });
                }
                let [start, end] = tm.data_offsets;
                if end < start || end > data.len() {
                    return Err(EsbozarError::FormatError {
                        message: format!("tensor '{name}' offsets [{start}, {end}] out of range"),
                    });
                }
                let values: Vec<f32> = data[start..end]
                    .chunks_exact(4)
                    .map(|c| f32::from_le_bytes(c.try_into().expect("chunks_exact yields 4 bytes")))
                    .collect();
                let tensor = Tensor::new(&tm.shape, values)?;
                store.insert(name, tensor);
            }
        }
    }

    Ok((store, meta))
}

#[cfg(test)]
#[path = "checkpoint_tests.rs"]
mod tests;
