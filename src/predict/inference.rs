//! Model inference for predictions

use std::sync::Arc;

use super::PredictionResult;
use crate::artifacts::ArtifactContext;
use crate::features::align::is_aligned;
use crate::features::EncodedFeatureVector;
use crate::{FeistaError, Result};

/// Predictor for food category labels
pub struct Predictor {
    ctx: Arc<ArtifactContext>,
}

impl Predictor {
    pub fn new(ctx: Arc<ArtifactContext>) -> Self {
        Predictor { ctx }
    }

    /// Classify an aligned feature row and decode the class label.
    ///
    /// An index the label decoder cannot resolve means the artifacts were not
    /// trained together; there is no fallback label.
    pub fn predict(&self, vector: &EncodedFeatureVector) -> Result<PredictionResult> {
        if !is_aligned(vector, self.ctx.feature_names()) {
            return Err(FeistaError::mismatch(format!(
                "feature row with {} columns is not aligned to the {} expected features",
                vector.len(),
                self.ctx.feature_names().len()
            )));
        }

        let class_index = self.ctx.model().classify(vector.values())?;
        let label = self.ctx.labels().decode(class_index)?.to_string();
        log::debug!("predicted class {} ({})", class_index, label);

        Ok(PredictionResult { label, class_index })
    }
}
