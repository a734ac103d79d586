//! Event record to model-ready feature row

use std::sync::Arc;

use super::{align, EncodedFeatureVector};
use crate::artifacts::ArtifactContext;
use crate::data::{EventRecord, FieldValue};
use crate::{Config, EncodingConfig, FeistaError, Result, UnknownPolicy, ValidationConfig};

/// Validates, normalizes and encodes event records against the trained schema
pub struct FeatureEncoder {
    ctx: Arc<ArtifactContext>,
    limits: ValidationConfig,
    encoding: EncodingConfig,
}

impl FeatureEncoder {
    /// Create an encoder with default limits and encoding rules
    pub fn new(ctx: Arc<ArtifactContext>) -> Self {
        FeatureEncoder {
            ctx,
            limits: ValidationConfig::default(),
            encoding: EncodingConfig::default(),
        }
    }

    /// Create an encoder using the limits and rules from `config`
    pub fn with_config(ctx: Arc<ArtifactContext>, config: &Config) -> Self {
        FeatureEncoder {
            ctx,
            limits: config.validation.clone(),
            encoding: config.encoding.clone(),
        }
    }

    /// Encode a record into a row aligned with the model's expected features
    pub fn encode(&self, record: &EventRecord) -> Result<EncodedFeatureVector> {
        let expanded = self.expand(record)?;
        let aligned = align(&expanded, self.ctx.feature_names());
        log::debug!(
            "encoded {} features, aligned to {}",
            expanded.len(),
            aligned.len()
        );
        Ok(aligned)
    }

    /// Encode a record without aligning: one-hot levels followed by raw numerics
    pub fn expand(&self, record: &EventRecord) -> Result<EncodedFeatureVector> {
        record.validate(&self.limits)?;

        let categorical = self.normalize(record)?;
        let row: Vec<(&str, &str)> = categorical
            .iter()
            .map(|(column, value)| (column.as_str(), value.as_str()))
            .collect();
        let mut encoded = self.ctx.encoder().transform(&row)?;

        let schema = self.ctx.schema();
        let mut numeric = EncodedFeatureVector::with_capacity(schema.numerical_columns.len());
        for column in &schema.numerical_columns {
            match record.field(column) {
                Some(FieldValue::Number(value)) => numeric.push(column.clone(), value as f32),
                _ => {
                    return Err(FeistaError::mismatch(format!(
                        "schema column {} is not a numeric event field",
                        column
                    )))
                }
            }
        }
        encoded.extend(numeric);

        Ok(encoded)
    }

    /// Categorical (column, value) pairs with blanks and unseen free text resolved.
    ///
    /// Every returned value is in the trained vocabulary.
    pub fn normalize(&self, record: &EventRecord) -> Result<Vec<(String, String)>> {
        let schema = self.ctx.schema();
        let sentinel = self.encoding.blank_sentinel.as_str();
        let mut row = Vec::with_capacity(schema.categorical_columns.len());

        for column in &schema.categorical_columns {
            let text = match record.field(column) {
                Some(FieldValue::Text(text)) => text,
                _ => {
                    return Err(FeistaError::mismatch(format!(
                        "schema column {} is not a categorical event field",
                        column
                    )))
                }
            };

            let value = if self.is_free_text(column) {
                match text.map(str::trim).filter(|t| !t.is_empty()) {
                    None => self.sentinel_for(column)?,
                    Some(t) if schema.is_known(column, t) => t.to_string(),
                    Some(t) => match self.encoding.free_text_unknown {
                        UnknownPolicy::Sentinel => {
                            log::debug!("{} '{}' mapped to '{}'", column, t, sentinel);
                            self.sentinel_for(column)?
                        }
                        UnknownPolicy::Reject => {
                            return Err(FeistaError::UnseenCategory {
                                field: column.clone(),
                                value: t.to_string(),
                            })
                        }
                    },
                }
            } else {
                let value = text.unwrap_or_default();
                if !schema.is_known(column, value) {
                    return Err(FeistaError::UnseenCategory {
                        field: column.clone(),
                        value: value.to_string(),
                    });
                }
                value.to_string()
            };

            row.push((column.clone(), value));
        }

        Ok(row)
    }

    fn is_free_text(&self, column: &str) -> bool {
        self.encoding.free_text_columns.iter().any(|c| c == column)
    }

    fn sentinel_for(&self, column: &str) -> Result<String> {
        let sentinel = &self.encoding.blank_sentinel;
        if self.ctx.schema().is_known(column, sentinel) {
            Ok(sentinel.clone())
        } else {
            Err(FeistaError::mismatch(format!(
                "sentinel '{}' is not a trained category of {}",
                sentinel, column
            )))
        }
    }
}
