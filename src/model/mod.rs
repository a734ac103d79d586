//! Trained model artifacts
//!
//! The classifier network and the label decoder that turns its class index
//! back into a food category.

pub mod classifier;
pub mod labels;

pub use classifier::{Classifier, MlpClassifier, MlpClassifierConfig};
pub use labels::LabelDecoder;

/// CPU backend used for inference
pub type InferenceBackend = burn::backend::NdArray<f32>;
