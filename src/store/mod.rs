//! Name-indexed weight collection ("state dict").
//!
//! A [`WeightStore`] holds one model's complete parameter set as a
//! mapping from parameter name (e.g. `layer2.1.conv2.weight`) to tensor.
//! Two stores coexist during a transplant: the full-size pretrained
//! *source* and the reduced *target*, which starts from the target
//! architecture's freshly initialized parameters and doubles as the
//! declared shape table.

use std::collections::BTreeMap;

use crate::error::{EsbozarError, Result};
use crate::primitives::Tensor;

/// Mapping from parameter names to tensors.
///
/// Uses `BTreeMap` for deterministic iteration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightStore {
    tensors: BTreeMap<String, Tensor>,
}

impl WeightStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tensors: BTreeMap::new(),
        }
    }

    /// Number of named tensors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tensors.len()
    }

    /// Returns true if the store holds no tensors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensors.is_empty()
    }

    /// Inserts or overwrites a named tensor.
    pub fn insert(&mut self, name: impl Into<String>, tensor: Tensor) {
        self.tensors.insert(name.into(), tensor);
    }

    /// Inserts a tensor after checking it against the declared shape for
    /// that name.
    ///
    /// # Errors
    ///
    /// Returns `MissingTensor` if the name was never declared and
    /// `ShapeMismatch` if the declared shape differs.
    pub fn insert_checked(&mut self, name: &str, tensor: Tensor) -> Result<()> {
        let declared = self
            .tensors
            .get(name)
            .ok_or_else(|| EsbozarError::MissingTensor {
                name: name.to_string(),
            })?;
        if declared.shape() != tensor.shape() {
            return Err(EsbozarError::ShapeMismatch {
                name: name.to_string(),
                expected: declared.shape().to_vec(),
                actual: tensor.shape().to_vec(),
            });
        }
        self.tensors.insert(name.to_string(), tensor);
        Ok(())
    }

    /// Looks up a tensor by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Tensor> {
        self.tensors.get(name)
    }

    /// Looks up a tensor by name, failing if absent.
    ///
    /// # Errors
    ///
    /// Returns `MissingTensor` for unknown names.
    pub fn require(&self, name: &str) -> Result<&Tensor> {
        self.get(name).ok_or_else(|| EsbozarError::MissingTensor {
            name: name.to_string(),
        })
    }

    /// Returns true if a name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tensors.contains_key(name)
    }

    /// Iterates (name, tensor) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Tensor)> {
        self.tensors.iter()
    }

    /// Iterates names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.tensors.keys()
    }

    /// Validates this store against a declared shape table: every
    /// declared name must exist with exactly the declared shape.
    ///
    /// # Errors
    ///
    /// Returns `MissingTensor` or `ShapeMismatch` on the first
    /// violation.
    pub fn validate_against(&self, declared: &WeightStore) -> Result<()> {
        for (name, want) in declared.iter() {
            let tensor = self.require(name)?;
            if tensor.shape() != want.shape() {
                return Err(EsbozarError::ShapeMismatch {
                    name: name.clone(),
                    expected: want.shape().to_vec(),
                    actual: tensor.shape().to_vec(),
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, Tensor)> for WeightStore {
    fn from_iter<I: IntoIterator<Item = (String, Tensor)>>(iter: I) -> Self {
        Self {
            tensors: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
