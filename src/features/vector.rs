//! Named feature rows

use serde::Serialize;

/// Ordered mapping from feature name to value
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EncodedFeatureVector {
    names: Vec<String>,
    values: Vec<f32>,
}

impl EncodedFeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        EncodedFeatureVector {
            names: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Append a feature at the end of the row
    pub fn push(&mut self, name: impl Into<String>, value: f32) {
        self.names.push(name.into());
        self.values.push(value);
    }

    /// Concatenate another row after this one
    pub fn extend(&mut self, other: EncodedFeatureVector) {
        self.names.extend(other.names);
        self.values.extend(other.values);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Value of the first feature with this name
    pub fn get(&self, name: &str) -> Option<f32> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.values[idx])
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.names
            .iter()
            .map(|n| n.as_str())
            .zip(self.values.iter().copied())
    }
}
