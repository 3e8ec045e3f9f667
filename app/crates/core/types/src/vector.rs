//! Witness vector

use serde::{Deserialize, Serialize};

/// Ordered decimal-string witness values
///
/// The order is the compatibility contract with the circuit: entries are
/// never sorted, deduplicated or reordered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldVector(Vec<String>);

impl FieldVector {
    /// Create an empty vector
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append entries, preserving their order
    pub fn extend<I: IntoIterator<Item = String>>(&mut self, values: I) {
        self.0.extend(values);
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the entries
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Take the entries
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    /// Space-separated argument list, as taken by a witness tool
    pub fn to_witness_args(&self) -> String {
        self.0.join(" ")
    }
}

impl From<Vec<String>> for FieldVector {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}
