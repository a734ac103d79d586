//! Reindexing encoded rows onto the model's feature list
//!
//! A single request only lights up a handful of one-hot levels, and the
//! encoder's vocabulary need not match the model's feature list exactly.
//! Alignment makes the row the model sees independent of both.

use std::collections::HashMap;

use super::EncodedFeatureVector;

/// Conform `vector` to `expected`: same names, same order.
///
/// Expected features missing from `vector` are filled with 0, features not in
/// `expected` are dropped. The first occurrence wins for duplicated names.
pub fn align(vector: &EncodedFeatureVector, expected: &[String]) -> EncodedFeatureVector {
    let mut lookup: HashMap<&str, f32> = HashMap::with_capacity(vector.len());
    for (name, value) in vector.iter() {
        lookup.entry(name).or_insert(value);
    }

    let mut aligned = EncodedFeatureVector::with_capacity(expected.len());
    for name in expected {
        let value = lookup.get(name.as_str()).copied().unwrap_or(0.0);
        aligned.push(name.clone(), value);
    }
    aligned
}

/// True when `vector` already has exactly the expected names in order
pub fn is_aligned(vector: &EncodedFeatureVector, expected: &[String]) -> bool {
    vector.names() == expected
}
