//! One-hot encoding for categorical event fields

use super::EncodedFeatureVector;
use crate::data::SchemaRegistry;
use crate::{FeistaError, Result};

/// Feature name for one level of a categorical column
pub fn feature_name(column: &str, category: &str) -> String {
    format!("{}_{}", column, category)
}

#[derive(Debug, Clone)]
struct EncodedColumn {
    name: String,
    categories: Vec<String>,
}

/// Trained one-hot encoder: one indicator column per learned category
#[derive(Debug, Clone)]
pub struct CategoricalEncoder {
    columns: Vec<EncodedColumn>,
}

impl CategoricalEncoder {
    /// Build from the vocabulary learned at training time
    pub fn from_schema(schema: &SchemaRegistry) -> Self {
        let columns = schema
            .categorical_columns
            .iter()
            .map(|name| EncodedColumn {
                name: name.clone(),
                categories: schema.vocabulary(name).unwrap_or_default().to_vec(),
            })
            .collect();
        CategoricalEncoder { columns }
    }

    /// Number of indicator columns produced per row
    pub fn width(&self) -> usize {
        self.columns.iter().map(|c| c.categories.len()).sum()
    }

    /// Names of the produced indicator columns, in output order
    pub fn feature_names_out(&self) -> Vec<String> {
        self.columns
            .iter()
            .flat_map(|c| c.categories.iter().map(|cat| feature_name(&c.name, cat)))
            .collect()
    }

    /// Encode one categorical row given as (column, value) pairs.
    ///
    /// The row must hold exactly the fitted columns. Values outside the
    /// learned vocabulary are rejected.
    pub fn transform(&self, row: &[(&str, &str)]) -> Result<EncodedFeatureVector> {
        if row.len() != self.columns.len() {
            return Err(FeistaError::mismatch(format!(
                "encoder fitted on {} columns, row has {}",
                self.columns.len(),
                row.len()
            )));
        }

        let mut encoded = EncodedFeatureVector::with_capacity(self.width());
        for column in &self.columns {
            let value = row
                .iter()
                .find(|(name, _)| *name == column.name)
                .map(|(_, value)| *value)
                .ok_or_else(|| {
                    FeistaError::mismatch(format!("row lacks encoder column {}", column.name))
                })?;

            let hot = column
                .categories
                .iter()
                .position(|c| c == value)
                .ok_or_else(|| FeistaError::UnseenCategory {
                    field: column.name.clone(),
                    value: value.to_string(),
                })?;

            for (idx, category) in column.categories.iter().enumerate() {
                let indicator = if idx == hot { 1.0 } else { 0.0 };
                encoded.push(feature_name(&column.name, category), indicator);
            }
        }

        Ok(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::tests::sample_schema;

    fn wedding_row() -> Vec<(&'static str, &'static str)> {
        vec![
            ("EventType", "Wedding"),
            ("LocationType", "Indoor"),
            ("Season", "Winter"),
            ("TimeOfDay", "Evening"),
            ("FoodType", "Mixed"),
            ("CuisinePreference", "North Indian"),
            ("AgeGroupOfGuests", "Mixed"),
            ("ServiceStyle", "Buffet"),
            ("SpecialRequests", "None"),
        ]
    }

    #[test]
    fn test_feature_name() {
        assert_eq!(feature_name("Season", "Winter"), "Season_Winter");
        assert_eq!(
            feature_name("CuisinePreference", "North Indian"),
            "CuisinePreference_North Indian"
        );
    }

    #[test]
    fn test_one_hot_per_column() {
        let encoder = CategoricalEncoder::from_schema(&sample_schema());
        let encoded = encoder.transform(&wedding_row()).unwrap();

        assert_eq!(encoded.len(), encoder.width());
        assert_eq!(encoded.names(), encoder.feature_names_out().as_slice());
        assert_eq!(encoded.get("EventType_Wedding"), Some(1.0));
        assert_eq!(encoded.get("EventType_Birthday"), Some(0.0));
        assert_eq!(encoded.get("SpecialRequests_None"), Some(1.0));

        // Exactly one hot level per categorical column
        let hot: f32 = encoded.values().iter().sum();
        assert_eq!(hot, 9.0);
    }

    #[test]
    fn test_row_order_does_not_matter() {
        let encoder = CategoricalEncoder::from_schema(&sample_schema());
        let mut reversed = wedding_row();
        reversed.reverse();

        assert_eq!(
            encoder.transform(&reversed).unwrap(),
            encoder.transform(&wedding_row()).unwrap()
        );
    }

    #[test]
    fn test_unseen_category_names_field_and_value() {
        let encoder = CategoricalEncoder::from_schema(&sample_schema());
        let mut row = wedding_row();
        row[2] = ("Season", "Monsoon");

        match encoder.transform(&row) {
            Err(FeistaError::UnseenCategory { field, value }) => {
                assert_eq!(field, "Season");
                assert_eq!(value, "Monsoon");
            }
            other => panic!("expected unseen category, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_or_extra_columns_rejected() {
        let encoder = CategoricalEncoder::from_schema(&sample_schema());

        let mut short = wedding_row();
        short.pop();
        assert!(matches!(
            encoder.transform(&short),
            Err(FeistaError::ArtifactMismatch(_))
        ));

        let mut renamed = wedding_row();
        renamed[0] = ("Venue", "Wedding");
        assert!(matches!(
            encoder.transform(&renamed),
            Err(FeistaError::ArtifactMismatch(_))
        ));
    }
}
