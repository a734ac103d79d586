//! Prediction and inference
//!
//! Run the trained classifier on an aligned feature row and decode its label.

pub mod display;
pub mod handler;
pub mod inference;

use serde::Serialize;

pub use display::{format_prediction, Celebration};
pub use handler::RequestHandler;
pub use inference::Predictor;

/// Decoded model output for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionResult {
    /// Food category label from the trained label set
    pub label: String,
    /// Class index the model produced
    pub class_index: usize,
}
