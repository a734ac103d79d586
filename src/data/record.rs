//! A single event submission and its input checks

use serde_json::{Map, Value};

use crate::{FeistaError, Result, ValidationConfig};

pub const EVENT_TYPE: &str = "EventType";
pub const LOCATION_TYPE: &str = "LocationType";
pub const SEASON: &str = "Season";
pub const TIME_OF_DAY: &str = "TimeOfDay";
pub const FOOD_TYPE: &str = "FoodType";
pub const CUISINE_PREFERENCE: &str = "CuisinePreference";
pub const AGE_GROUP_OF_GUESTS: &str = "AgeGroupOfGuests";
pub const SERVICE_STYLE: &str = "ServiceStyle";
pub const SPECIAL_REQUESTS: &str = "SpecialRequests";
pub const GUESTS: &str = "Guests";
pub const BUDGET: &str = "Budget";
pub const EVENT_DURATION: &str = "EventDuration";

/// Categorical fields in the order the encoder was fitted on
pub const CATEGORICAL_COLUMNS: [&str; 9] = [
    EVENT_TYPE,
    LOCATION_TYPE,
    SEASON,
    TIME_OF_DAY,
    FOOD_TYPE,
    CUISINE_PREFERENCE,
    AGE_GROUP_OF_GUESTS,
    SERVICE_STYLE,
    SPECIAL_REQUESTS,
];

pub const NUMERICAL_COLUMNS: [&str; 3] = [GUESTS, BUDGET, EVENT_DURATION];

// Options offered by the event form
pub const EVENT_TYPES: &[&str] = &[
    "Wedding",
    "Birthday",
    "Corporate",
    "Engagement",
    "Festival",
    "Anniversary",
];
pub const LOCATION_TYPES: &[&str] = &["Indoor", "Outdoor", "Home"];
pub const SEASONS: &[&str] = &["Summer", "Winter", "Spring", "Monsoon", "Autumn"];
pub const TIMES_OF_DAY: &[&str] = &["Morning", "Afternoon", "Evening", "Night"];
pub const FOOD_TYPES: &[&str] = &["Veg", "Non-Veg", "Mixed"];
pub const CUISINE_PREFERENCES: &[&str] = &[
    "Indian",
    "North Indian",
    "South Indian",
    "Continental",
    "Asian",
    "Mixed",
];
pub const AGE_GROUPS: &[&str] = &["Children", "Adults", "Seniors", "Mixed"];
pub const SERVICE_STYLES: &[&str] = &["Buffet", "Served", "Plated", "Live"];

/// Documented options for a categorical column, `None` for free text
pub fn documented_options(column: &str) -> Option<&'static [&'static str]> {
    match column {
        EVENT_TYPE => Some(EVENT_TYPES),
        LOCATION_TYPE => Some(LOCATION_TYPES),
        SEASON => Some(SEASONS),
        TIME_OF_DAY => Some(TIMES_OF_DAY),
        FOOD_TYPE => Some(FOOD_TYPES),
        CUISINE_PREFERENCE => Some(CUISINE_PREFERENCES),
        AGE_GROUP_OF_GUESTS => Some(AGE_GROUPS),
        SERVICE_STYLE => Some(SERVICE_STYLES),
        _ => None,
    }
}

/// One event as submitted by the user
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub event_type: String,
    pub location_type: String,
    pub season: String,
    pub time_of_day: String,
    pub food_type: String,
    pub cuisine_preference: String,
    pub age_group_of_guests: String,
    pub service_style: String,
    /// Free text, may be left blank
    pub special_requests: Option<String>,
    pub guests: u32,
    pub budget: f64,
    /// Hours
    pub event_duration: f64,
}

/// A record field looked up by column name
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(Option<&'a str>),
    Number(f64),
}

impl EventRecord {
    /// Parse a flat JSON mapping, naming the offending field on failure
    pub fn from_json(value: &Value) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| FeistaError::validation("record", "expected a JSON object"))?;

        if let Some(unknown) = map.keys().find(|k| !is_record_field(k)) {
            return Err(FeistaError::validation(unknown, "is not an event field"));
        }

        Ok(EventRecord {
            event_type: required_text(map, EVENT_TYPE)?,
            location_type: required_text(map, LOCATION_TYPE)?,
            season: required_text(map, SEASON)?,
            time_of_day: required_text(map, TIME_OF_DAY)?,
            food_type: required_text(map, FOOD_TYPE)?,
            cuisine_preference: required_text(map, CUISINE_PREFERENCE)?,
            age_group_of_guests: required_text(map, AGE_GROUP_OF_GUESTS)?,
            service_style: required_text(map, SERVICE_STYLE)?,
            special_requests: optional_text(map, SPECIAL_REQUESTS)?,
            guests: whole_number(map, GUESTS)?,
            budget: required_number(map, BUDGET)?,
            event_duration: required_number(map, EVENT_DURATION)?,
        })
    }

    /// Check numeric ranges and required text fields
    pub fn validate(&self, limits: &ValidationConfig) -> Result<()> {
        if self.guests < limits.guests_min || self.guests > limits.guests_max {
            return Err(FeistaError::validation(
                GUESTS,
                format!(
                    "{} is outside {}..={}",
                    self.guests, limits.guests_min, limits.guests_max
                ),
            ));
        }

        if !self.budget.is_finite() || self.budget < limits.budget_min {
            return Err(FeistaError::validation(
                BUDGET,
                format!("{} must be at least {}", self.budget, limits.budget_min),
            ));
        }
        // Numerics reach the model as f32
        if !(self.budget as f32).is_finite() {
            return Err(FeistaError::validation(
                BUDGET,
                format!("{} is too large", self.budget),
            ));
        }

        if !self.event_duration.is_finite()
            || self.event_duration < limits.duration_min
            || self.event_duration > limits.duration_max
        {
            return Err(FeistaError::validation(
                EVENT_DURATION,
                format!(
                    "{} hours is outside {}..={}",
                    self.event_duration, limits.duration_min, limits.duration_max
                ),
            ));
        }

        for column in CATEGORICAL_COLUMNS {
            if column == SPECIAL_REQUESTS {
                continue;
            }
            if let Some(FieldValue::Text(text)) = self.field(column) {
                if text.map_or(true, |t| t.trim().is_empty()) {
                    return Err(FeistaError::validation(column, "is required"));
                }
            }
        }

        Ok(())
    }

    /// Look up a field by its column name
    pub fn field(&self, column: &str) -> Option<FieldValue<'_>> {
        let value = match column {
            EVENT_TYPE => FieldValue::Text(Some(&self.event_type)),
            LOCATION_TYPE => FieldValue::Text(Some(&self.location_type)),
            SEASON => FieldValue::Text(Some(&self.season)),
            TIME_OF_DAY => FieldValue::Text(Some(&self.time_of_day)),
            FOOD_TYPE => FieldValue::Text(Some(&self.food_type)),
            CUISINE_PREFERENCE => FieldValue::Text(Some(&self.cuisine_preference)),
            AGE_GROUP_OF_GUESTS => FieldValue::Text(Some(&self.age_group_of_guests)),
            SERVICE_STYLE => FieldValue::Text(Some(&self.service_style)),
            SPECIAL_REQUESTS => FieldValue::Text(self.special_requests.as_deref()),
            GUESTS => FieldValue::Number(self.guests as f64),
            BUDGET => FieldValue::Number(self.budget),
            EVENT_DURATION => FieldValue::Number(self.event_duration),
            _ => return None,
        };
        Some(value)
    }
}

fn is_record_field(name: &str) -> bool {
    CATEGORICAL_COLUMNS.contains(&name) || NUMERICAL_COLUMNS.contains(&name)
}

fn required_text(map: &Map<String, Value>, field: &str) -> Result<String> {
    match map.get(field) {
        None | Some(Value::Null) => Err(FeistaError::validation(field, "is required")),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(FeistaError::validation(
            field,
            format!("expected a string, got {}", other),
        )),
    }
}

fn optional_text(map: &Map<String, Value>, field: &str) -> Result<Option<String>> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(FeistaError::validation(
            field,
            format!("expected a string, got {}", other),
        )),
    }
}

fn required_number(map: &Map<String, Value>, field: &str) -> Result<f64> {
    match map.get(field) {
        None | Some(Value::Null) => Err(FeistaError::validation(field, "is required")),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| FeistaError::validation(field, "is not representable")),
        Some(other) => Err(FeistaError::validation(
            field,
            format!("expected a number, got {}", other),
        )),
    }
}

fn whole_number(map: &Map<String, Value>, field: &str) -> Result<u32> {
    let value = required_number(map, field)?;
    if value.fract() != 0.0 || value < 0.0 || value > u32::MAX as f64 {
        return Err(FeistaError::validation(
            field,
            format!("{} is not a non-negative whole number", value),
        ));
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wedding_json() -> Value {
        json!({
            "EventType": "Wedding",
            "Guests": 200,
            "Budget": 500000,
            "EventDuration": 5,
            "LocationType": "Indoor",
            "Season": "Winter",
            "TimeOfDay": "Evening",
            "FoodType": "Mixed",
            "CuisinePreference": "North Indian",
            "AgeGroupOfGuests": "Mixed",
            "ServiceStyle": "Buffet",
            "SpecialRequests": ""
        })
    }

    fn field_of(err: FeistaError) -> String {
        match err {
            FeistaError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_full_record() {
        let record = EventRecord::from_json(&wedding_json()).unwrap();
        assert_eq!(record.event_type, "Wedding");
        assert_eq!(record.guests, 200);
        assert_eq!(record.budget, 500000.0);
        assert_eq!(record.event_duration, 5.0);
        assert_eq!(record.cuisine_preference, "North Indian");
        assert_eq!(record.special_requests.as_deref(), Some(""));
    }

    #[test]
    fn test_special_requests_may_be_absent() {
        let mut value = wedding_json();
        value.as_object_mut().unwrap().remove(SPECIAL_REQUESTS);
        let record = EventRecord::from_json(&value).unwrap();
        assert_eq!(record.special_requests, None);
    }

    #[test]
    fn test_missing_field_is_named() {
        let mut value = wedding_json();
        value.as_object_mut().unwrap().remove(SEASON);
        let err = EventRecord::from_json(&value).unwrap_err();
        assert_eq!(field_of(err), SEASON);
    }

    #[test]
    fn test_wrong_type_is_named() {
        let mut value = wedding_json();
        value[BUDGET] = json!("a lot");
        assert_eq!(field_of(EventRecord::from_json(&value).unwrap_err()), BUDGET);

        let mut value = wedding_json();
        value[EVENT_TYPE] = json!(3);
        assert_eq!(
            field_of(EventRecord::from_json(&value).unwrap_err()),
            EVENT_TYPE
        );
    }

    #[test]
    fn test_fractional_guests_rejected() {
        let mut value = wedding_json();
        value[GUESTS] = json!(20.5);
        assert_eq!(field_of(EventRecord::from_json(&value).unwrap_err()), GUESTS);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut value = wedding_json();
        value["Venue"] = json!("Palace");
        assert_eq!(field_of(EventRecord::from_json(&value).unwrap_err()), "Venue");
    }

    #[test]
    fn test_guest_bounds() {
        let limits = ValidationConfig::default();
        let mut record = EventRecord::from_json(&wedding_json()).unwrap();

        for ok in [10, 500] {
            record.guests = ok;
            assert!(record.validate(&limits).is_ok(), "guests={} should pass", ok);
        }
        for bad in [9, 501] {
            record.guests = bad;
            assert_eq!(field_of(record.validate(&limits).unwrap_err()), GUESTS);
        }
    }

    #[test]
    fn test_budget_and_duration_bounds() {
        let limits = ValidationConfig::default();
        let mut record = EventRecord::from_json(&wedding_json()).unwrap();

        record.budget = -1.0;
        assert_eq!(field_of(record.validate(&limits).unwrap_err()), BUDGET);
        record.budget = f64::NAN;
        assert_eq!(field_of(record.validate(&limits).unwrap_err()), BUDGET);
        record.budget = 1e39;
        assert_eq!(field_of(record.validate(&limits).unwrap_err()), BUDGET);
        record.budget = 0.0;
        assert!(record.validate(&limits).is_ok());

        record.event_duration = 0.5;
        assert_eq!(
            field_of(record.validate(&limits).unwrap_err()),
            EVENT_DURATION
        );
        record.event_duration = 11.0;
        assert_eq!(
            field_of(record.validate(&limits).unwrap_err()),
            EVENT_DURATION
        );
    }

    #[test]
    fn test_blank_required_text_rejected() {
        let limits = ValidationConfig::default();
        let mut record = EventRecord::from_json(&wedding_json()).unwrap();
        record.food_type = "  ".to_string();
        assert_eq!(field_of(record.validate(&limits).unwrap_err()), FOOD_TYPE);
    }

    #[test]
    fn test_field_lookup_covers_every_column() {
        let record = EventRecord::from_json(&wedding_json()).unwrap();
        for column in CATEGORICAL_COLUMNS {
            assert!(matches!(record.field(column), Some(FieldValue::Text(_))));
        }
        for column in NUMERICAL_COLUMNS {
            assert!(matches!(record.field(column), Some(FieldValue::Number(_))));
        }
        assert_eq!(record.field("Venue"), None);
    }

    #[test]
    fn test_documented_options() {
        assert_eq!(documented_options(SEASON), Some(SEASONS));
        assert!(documented_options(CUISINE_PREFERENCE)
            .unwrap()
            .contains(&"North Indian"));
        assert_eq!(documented_options(SPECIAL_REQUESTS), None);
    }
}
