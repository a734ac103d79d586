//! Event food category prediction
//!
//! Turns a single event description into the feature row a trained classifier
//! expects, runs the classifier and decodes its answer back to a food category
//! label such as "Premium" or "Street".

pub mod artifacts;
pub mod data;
pub mod features;
pub mod model;
pub mod predict;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use artifacts::ArtifactContext;
pub use data::{EventRecord, SchemaRegistry};
pub use features::{align, EncodedFeatureVector, FeatureEncoder};
pub use predict::{PredictionResult, Predictor, RequestHandler};

/// Application-wide errors
#[derive(Debug, Error)]
pub enum FeistaError {
    #[error("Invalid value for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Unseen category for {field}: '{value}' is not in the trained vocabulary")]
    UnseenCategory { field: String, value: String },

    #[error("Artifact mismatch: {0}")]
    ArtifactMismatch(String),

    #[error("Trained artifacts not found: {0} - see `feista init`")]
    MissingArtifacts(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FeistaError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        FeistaError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Build an artifact mismatch error, logging it for operator attention
    pub fn mismatch(message: impl Into<String>) -> Self {
        let message = message.into();
        log::error!("artifact mismatch: {}", message);
        FeistaError::ArtifactMismatch(message)
    }
}

pub type Result<T> = std::result::Result<T, FeistaError>;

/// How free-text columns treat non-blank values the encoder has never seen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPolicy {
    /// Reject with an unseen category error
    Reject,
    /// Replace with the blank sentinel
    Sentinel,
}

impl fmt::Display for UnknownPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownPolicy::Reject => write!(f, "reject"),
            UnknownPolicy::Sentinel => write!(f, "sentinel"),
        }
    }
}

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub artifacts: ArtifactsConfig,
    pub validation: ValidationConfig,
    pub encoding: EncodingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    /// JSON bundle with schema, vocabulary, feature names and labels
    pub bundle_path: String,
    /// Classifier weights (burn adds the .mpk extension)
    pub weights_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub guests_min: u32,
    pub guests_max: u32,
    pub budget_min: f64,
    pub duration_min: f64,
    pub duration_max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingConfig {
    /// Category substituted for blank free-text input
    pub blank_sentinel: String,
    /// Categorical columns that accept free text and may be blank
    pub free_text_columns: Vec<String>,
    pub free_text_unknown: UnknownPolicy,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig {
            guests_min: 10,
            guests_max: 500,
            budget_min: 0.0,
            duration_min: 1.0,
            duration_max: 10.0,
        }
    }
}

impl Default for EncodingConfig {
    fn default() -> Self {
        EncodingConfig {
            blank_sentinel: "None".to_string(),
            free_text_columns: vec![data::record::SPECIAL_REQUESTS.to_string()],
            free_text_unknown: UnknownPolicy::Reject,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            artifacts: ArtifactsConfig {
                bundle_path: "model/artifacts.json".to_string(),
                weights_path: "model/classifier".to_string(),
            },
            validation: ValidationConfig::default(),
            encoding: EncodingConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FeistaError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| FeistaError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FeistaError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
