//! Single-request orchestration

use std::sync::Arc;

use super::{PredictionResult, Predictor};
use crate::artifacts::ArtifactContext;
use crate::data::EventRecord;
use crate::features::FeatureEncoder;
use crate::{Config, Result};

/// Encodes one record and predicts its food category
pub struct RequestHandler {
    encoder: FeatureEncoder,
    predictor: Predictor,
}

impl RequestHandler {
    pub fn new(ctx: Arc<ArtifactContext>) -> Self {
        RequestHandler {
            encoder: FeatureEncoder::new(ctx.clone()),
            predictor: Predictor::new(ctx),
        }
    }

    pub fn with_config(ctx: Arc<ArtifactContext>, config: &Config) -> Self {
        RequestHandler {
            encoder: FeatureEncoder::with_config(ctx.clone(), config),
            predictor: Predictor::new(ctx),
        }
    }

    pub fn handle(&self, record: &EventRecord) -> Result<PredictionResult> {
        let vector = self.encoder.encode(record)?;
        self.predictor.predict(&vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::tests::{sample_context, wedding_record};
    use crate::data::schema::tests::sample_schema;
    use crate::predict::inference::tests::fixed_context;
    use crate::FeistaError;

    fn handler() -> (Arc<ArtifactContext>, RequestHandler) {
        let ctx = Arc::new(sample_context(sample_schema()));
        (ctx.clone(), RequestHandler::new(ctx))
    }

    #[test]
    fn test_wedding_scenario_yields_one_known_label() {
        let (ctx, handler) = handler();
        let result = handler.handle(&wedding_record()).unwrap();
        assert!(ctx.labels().contains(&result.label));
        assert_eq!(ctx.labels().decode(result.class_index).unwrap(), result.label);
    }

    #[test]
    fn test_every_vocabulary_value_predicts() {
        let (ctx, handler) = handler();
        let schema = ctx.schema().clone();

        for column in &schema.categorical_columns {
            for category in schema.vocabulary(column).unwrap() {
                let mut record = wedding_record();
                match column.as_str() {
                    "EventType" => record.event_type = category.clone(),
                    "LocationType" => record.location_type = category.clone(),
                    "Season" => record.season = category.clone(),
                    "TimeOfDay" => record.time_of_day = category.clone(),
                    "FoodType" => record.food_type = category.clone(),
                    "CuisinePreference" => record.cuisine_preference = category.clone(),
                    "AgeGroupOfGuests" => record.age_group_of_guests = category.clone(),
                    "ServiceStyle" => record.service_style = category.clone(),
                    "SpecialRequests" => record.special_requests = Some(category.clone()),
                    other => panic!("unexpected column {}", other),
                }

                for (guests, budget, hours) in [(10, 0.0, 1.0), (120, 75000.0, 4.5), (500, 2e6, 10.0)]
                {
                    record.guests = guests;
                    record.budget = budget;
                    record.event_duration = hours;
                    let result = handler.handle(&record).unwrap_or_else(|e| {
                        panic!("{}={} guests={} failed: {}", column, category, guests, e)
                    });
                    assert!(ctx.labels().contains(&result.label));
                }
            }
        }
    }

    #[test]
    fn test_guest_bounds() {
        let (_, handler) = handler();
        for guests in [10, 500] {
            let mut record = wedding_record();
            record.guests = guests;
            assert!(handler.handle(&record).is_ok());
        }
        for guests in [9, 501] {
            let mut record = wedding_record();
            record.guests = guests;
            assert!(matches!(
                handler.handle(&record),
                Err(FeistaError::Validation { .. })
            ));
        }
    }

    #[test]
    fn test_budget_beyond_model_precision_is_validation_error() {
        let (_, handler) = handler();
        let mut record = wedding_record();
        record.budget = 1e39;

        match handler.handle(&record) {
            Err(FeistaError::Validation { field, .. }) => assert_eq!(field, "Budget"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_errors_pass_through_unchanged() {
        let (_, handler) = handler();
        let mut record = wedding_record();
        record.cuisine_preference = "Martian".to_string();

        match handler.handle(&record) {
            Err(FeistaError::UnseenCategory { field, value }) => {
                assert_eq!(field, "CuisinePreference");
                assert_eq!(value, "Martian");
            }
            other => panic!("expected unseen category, got {:?}", other),
        }

        let broken = RequestHandler::new(fixed_context(42));
        assert!(matches!(
            broken.handle(&wedding_record()),
            Err(FeistaError::ArtifactMismatch(_))
        ));
    }

    #[test]
    fn test_results_are_fresh_per_request() {
        let handler = RequestHandler::new(fixed_context(2));
        let first = handler.handle(&wedding_record()).unwrap();
        let second = handler.handle(&wedding_record()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.label, "Street");
    }
}
