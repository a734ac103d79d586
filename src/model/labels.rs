//! Class index to label string decoding

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{FeistaError, Result};

/// Labels known at training time, indexed by the model's class id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelDecoder {
    classes: Vec<String>,
}

impl LabelDecoder {
    pub fn new(classes: Vec<String>) -> Result<Self> {
        if classes.is_empty() {
            return Err(FeistaError::mismatch("label decoder has no classes"));
        }
        let unique: HashSet<_> = classes.iter().collect();
        if unique.len() != classes.len() {
            return Err(FeistaError::mismatch("label decoder has duplicate classes"));
        }
        Ok(LabelDecoder { classes })
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn contains(&self, label: &str) -> bool {
        self.classes.iter().any(|c| c == label)
    }

    /// Map a class index back to its label
    pub fn decode(&self, class_index: usize) -> Result<&str> {
        self.classes
            .get(class_index)
            .map(|s| s.as_str())
            .ok_or_else(|| {
                FeistaError::mismatch(format!(
                    "class index {} outside the {} trained labels",
                    class_index,
                    self.classes.len()
                ))
            })
    }
}
