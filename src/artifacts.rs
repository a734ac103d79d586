//! Trained artifacts loaded once at startup
//!
//! The schema, categorical encoder, classifier and label decoder come from one
//! training run. They are checked against each other on construction and are
//! never mutated afterwards, so a single `Arc<ArtifactContext>` can back every
//! request.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::data::SchemaRegistry;
use crate::features::CategoricalEncoder;
use crate::model::{Classifier, InferenceBackend, LabelDecoder, MlpClassifier, MlpClassifierConfig};
use crate::{ArtifactsConfig, FeistaError, Result};

/// On-disk description of the trained artifacts (weights are stored separately)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactBundle {
    #[serde(flatten)]
    pub schema: SchemaRegistry,
    /// Class labels in class index order
    pub labels: Vec<String>,
    /// Classifier hidden layer widths
    #[serde(default)]
    pub hidden_dims: Vec<usize>,
}

impl ArtifactBundle {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn classifier_config(&self) -> MlpClassifierConfig {
        MlpClassifierConfig {
            input_dim: self.schema.feature_names.len(),
            hidden_dims: self.hidden_dims.clone(),
            num_classes: self.labels.len(),
        }
    }
}

/// Immutable bundle of everything inference needs
pub struct ArtifactContext {
    schema: SchemaRegistry,
    encoder: CategoricalEncoder,
    model: Box<dyn Classifier>,
    labels: LabelDecoder,
}

impl ArtifactContext {
    /// Assemble a context, rejecting artifacts that were not trained together
    pub fn new(
        schema: SchemaRegistry,
        model: Box<dyn Classifier>,
        labels: LabelDecoder,
    ) -> Result<Self> {
        schema.validate()?;

        if model.input_dim() != schema.feature_names.len() {
            return Err(FeistaError::mismatch(format!(
                "classifier takes {} features but {} feature names are expected",
                model.input_dim(),
                schema.feature_names.len()
            )));
        }
        if model.num_classes() != labels.len() {
            return Err(FeistaError::mismatch(format!(
                "classifier has {} classes but the label decoder knows {}",
                model.num_classes(),
                labels.len()
            )));
        }

        let encoder = CategoricalEncoder::from_schema(&schema);
        let ctx = ArtifactContext {
            schema,
            encoder,
            model,
            labels,
        };

        let unreachable = ctx.unreachable_features();
        if unreachable.len() == ctx.schema.feature_names.len() {
            return Err(FeistaError::mismatch(
                "none of the expected features can be produced by the encoder",
            ));
        }
        for name in &unreachable {
            log::warn!("expected feature {} is never produced, it will always be 0", name);
        }

        log::info!(
            "loaded artifacts: {} categorical columns, {} numerical columns, {} features, {} labels",
            ctx.schema.categorical_columns.len(),
            ctx.schema.numerical_columns.len(),
            ctx.schema.feature_names.len(),
            ctx.labels.len()
        );

        Ok(ctx)
    }

    /// Load the bundle and classifier weights named in the config
    pub fn load(config: &ArtifactsConfig) -> Result<Self> {
        let weights_file = format!("{}.mpk", config.weights_path);
        for file in [&config.bundle_path, &weights_file] {
            if !Path::new(file).exists() {
                return Err(FeistaError::MissingArtifacts(file.clone()));
            }
        }

        let bundle = ArtifactBundle::load(&config.bundle_path)?;
        let model = MlpClassifier::<InferenceBackend>::load(
            Default::default(),
            &config.weights_path,
            bundle.classifier_config(),
        )?;
        let labels = LabelDecoder::new(bundle.labels)?;

        Self::new(bundle.schema, Box::new(model), labels)
    }

    pub fn schema(&self) -> &SchemaRegistry {
        &self.schema
    }

    pub fn encoder(&self) -> &CategoricalEncoder {
        &self.encoder
    }

    pub fn model(&self) -> &dyn Classifier {
        self.model.as_ref()
    }

    pub fn labels(&self) -> &LabelDecoder {
        &self.labels
    }

    /// Feature names the model expects, in input order
    pub fn feature_names(&self) -> &[String] {
        &self.schema.feature_names
    }

    /// Expected features the encoder can never emit
    pub fn unreachable_features(&self) -> Vec<&str> {
        let producible: HashSet<String> = self.schema.producible_features().into_iter().collect();
        self.schema
            .feature_names
            .iter()
            .filter(|name| !producible.contains(name.as_str()))
            .map(|name| name.as_str())
            .collect()
    }

    /// Encoder outputs the model ignores
    pub fn ignored_features(&self) -> Vec<String> {
        let expected: HashSet<&str> = self.feature_names().iter().map(|s| s.as_str()).collect();
        self.schema
            .producible_features()
            .into_iter()
            .filter(|name| !expected.contains(name.as_str()))
            .collect()
    }
}
