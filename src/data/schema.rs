//! Training-time schema shared by the encoder and the classifier

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::record::{CATEGORICAL_COLUMNS, NUMERICAL_COLUMNS};
use crate::{FeistaError, Result};

/// Column layout, category vocabulary and expected model features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaRegistry {
    /// Categorical columns in encoder order
    pub categorical_columns: Vec<String>,
    /// Numerical columns, passed through unscaled
    pub numerical_columns: Vec<String>,
    /// Categories learned per categorical column, in encoder order
    pub categories: BTreeMap<String, Vec<String>>,
    /// Feature names the trained model expects, in model input order
    pub feature_names: Vec<String>,
}

impl SchemaRegistry {
    /// Check the schema against the event record layout
    pub fn validate(&self) -> Result<()> {
        check_exact_columns("categorical", &self.categorical_columns, &CATEGORICAL_COLUMNS)?;
        check_exact_columns("numerical", &self.numerical_columns, &NUMERICAL_COLUMNS)?;

        for column in &self.categorical_columns {
            match self.categories.get(column) {
                Some(vocab) if !vocab.is_empty() => {
                    let unique: HashSet<_> = vocab.iter().collect();
                    if unique.len() != vocab.len() {
                        return Err(FeistaError::mismatch(format!(
                            "duplicate categories for column {}",
                            column
                        )));
                    }
                }
                _ => {
                    return Err(FeistaError::mismatch(format!(
                        "no trained categories for column {}",
                        column
                    )))
                }
            }
        }

        if let Some(extra) = self
            .categories
            .keys()
            .find(|k| !self.categorical_columns.contains(*k))
        {
            return Err(FeistaError::mismatch(format!(
                "vocabulary given for unknown column {}",
                extra
            )));
        }

        if self.feature_names.is_empty() {
            return Err(FeistaError::mismatch("model expects no features"));
        }
        let unique: HashSet<_> = self.feature_names.iter().collect();
        if unique.len() != self.feature_names.len() {
            return Err(FeistaError::mismatch("duplicate expected feature names"));
        }

        Ok(())
    }

    /// Trained categories for a column
    pub fn vocabulary(&self, column: &str) -> Option<&[String]> {
        self.categories.get(column).map(|v| v.as_slice())
    }

    pub fn is_known(&self, column: &str, value: &str) -> bool {
        self.vocabulary(column)
            .is_some_and(|vocab| vocab.iter().any(|c| c == value))
    }

    /// Every feature name the encoder can emit, categorical levels first
    pub fn producible_features(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .categorical_columns
            .iter()
            .flat_map(|column| {
                self.vocabulary(column)
                    .unwrap_or_default()
                    .iter()
                    .map(move |category| crate::features::encoding::feature_name(column, category))
            })
            .collect();
        names.extend(self.numerical_columns.iter().cloned());
        names
    }
}

fn check_exact_columns(kind: &str, actual: &[String], expected: &[&str]) -> Result<()> {
    let actual_set: HashSet<&str> = actual.iter().map(|s| s.as_str()).collect();
    let expected_set: HashSet<&str> = expected.iter().copied().collect();

    if actual_set.len() != actual.len() {
        return Err(FeistaError::mismatch(format!(
            "duplicate {} columns in schema",
            kind
        )));
    }
    if actual_set != expected_set {
        let mut missing: Vec<_> = expected_set.difference(&actual_set).collect();
        let mut extra: Vec<_> = actual_set.difference(&expected_set).collect();
        missing.sort();
        extra.sort();
        return Err(FeistaError::mismatch(format!(
            "{} columns differ from event fields (missing {:?}, extra {:?})",
            kind, missing, extra
        )));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Small schema covering every event field, used across the crate's tests
    pub fn sample_schema() -> SchemaRegistry {
        let vocab: &[(&str, &[&str])] = &[
            ("EventType", &["Birthday", "Corporate", "Wedding"]),
            ("LocationType", &["Home", "Indoor", "Outdoor"]),
            ("Season", &["Summer", "Winter"]),
            ("TimeOfDay", &["Evening", "Morning"]),
            ("FoodType", &["Mixed", "Non-Veg", "Veg"]),
            ("CuisinePreference", &["Continental", "North Indian"]),
            ("AgeGroupOfGuests", &["Adults", "Mixed"]),
            ("ServiceStyle", &["Buffet", "Plated"]),
            ("SpecialRequests", &["Dessert bar", "None"]),
        ];

        let categorical_columns: Vec<String> =
            CATEGORICAL_COLUMNS.iter().map(|c| c.to_string()).collect();
        let numerical_columns: Vec<String> =
            NUMERICAL_COLUMNS.iter().map(|c| c.to_string()).collect();
        let categories: BTreeMap<String, Vec<String>> = vocab
            .iter()
            .map(|(col, cats)| {
                (
                    col.to_string(),
                    cats.iter().map(|c| c.to_string()).collect(),
                )
            })
            .collect();

        let mut schema = SchemaRegistry {
            categorical_columns,
            numerical_columns,
            categories,
            feature_names: Vec::new(),
        };
        schema.feature_names = schema.producible_features();
        schema
    }

    #[test]
    fn test_sample_schema_is_valid() {
        let schema = sample_schema();
        assert!(schema.validate().is_ok());
        // 21 one-hot levels + 3 numerical columns
        assert_eq!(schema.feature_names.len(), 24);
        assert_eq!(schema.feature_names[0], "EventType_Birthday");
        assert_eq!(schema.feature_names[23], "EventDuration");
    }

    #[test]
    fn test_missing_column_is_mismatch() {
        let mut schema = sample_schema();
        schema.numerical_columns.retain(|c| c != "Budget");
        let err = schema.validate().unwrap_err();
        assert!(matches!(err, FeistaError::ArtifactMismatch(_)));
        assert!(err.to_string().contains("Budget"));
    }

    #[test]
    fn test_extra_column_is_mismatch() {
        let mut schema = sample_schema();
        schema.categorical_columns.push("Venue".to_string());
        schema
            .categories
            .insert("Venue".to_string(), vec!["Palace".to_string()]);
        assert!(matches!(
            schema.validate(),
            Err(FeistaError::ArtifactMismatch(_))
        ));
    }

    #[test]
    fn test_empty_vocabulary_is_mismatch() {
        let mut schema = sample_schema();
        schema.categories.insert("Season".to_string(), Vec::new());
        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_duplicate_feature_names_rejected() {
        let mut schema = sample_schema();
        let first = schema.feature_names[0].clone();
        schema.feature_names.push(first);
        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_is_known() {
        let schema = sample_schema();
        assert!(schema.is_known("Season", "Winter"));
        assert!(!schema.is_known("Season", "Monsoon"));
        assert!(!schema.is_known("Venue", "Winter"));
    }
}
