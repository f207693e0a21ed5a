//! Boundary inputs: path → value assignments applied before an evaluation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from dotted path (or alias name) to a scalar value.
///
/// Applied in path order; every path must resolve to a writable inward,
/// unconnected port field or alias of the target network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundaryInputs(BTreeMap<String, f64>);

impl BoundaryInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, path: impl Into<String>, value: f64) -> Self {
        self.0.insert(path.into(), value);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, value: f64) -> Option<f64> {
        self.0.insert(path.into(), value)
    }

    pub fn get(&self, path: &str) -> Option<f64> {
        self.0.get(path).copied()
    }

    /// Overlay `other` on top of `self`; `other` wins on shared paths.
    pub fn extend(&mut self, other: &BoundaryInputs) {
        for (k, v) in other.iter() {
            self.0.insert(k.to_string(), v);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for BoundaryInputs {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
