//! Presentation of a prediction for the command line

use std::fmt;

use super::PredictionResult;
use crate::data::EventRecord;

/// Visual cue shown alongside certain labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Celebration {
    Balloons,
    Snow,
    Plain,
}

impl Celebration {
    /// Cue triggered by an exact label
    pub fn for_label(label: &str) -> Self {
        match label {
            "Premium" => Celebration::Balloons,
            "Street" => Celebration::Snow,
            _ => Celebration::Plain,
        }
    }
}

impl fmt::Display for Celebration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Celebration::Balloons => write!(f, "🎈 🎈 🎈"),
            Celebration::Snow => write!(f, "❄ ❄ ❄"),
            Celebration::Plain => Ok(()),
        }
    }
}

/// Format a prediction for display
pub fn format_prediction(result: &PredictionResult, record: &EventRecord) -> String {
    let requests = record
        .special_requests
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("-");

    let mut out = format!(
        r#"
┌─────────────────────────────────────────────────┐
│  {} for {} guests ({:.0} hrs)
│  {} / {} / {}
│  {} {} cuisine, {} service
│  Special requests: {}
├─────────────────────────────────────────────────┤
│  Recommended food category: {}
└─────────────────────────────────────────────────┘
"#,
        record.event_type,
        record.guests,
        record.event_duration,
        record.location_type,
        record.season,
        record.time_of_day,
        record.food_type,
        record.cuisine_preference,
        record.service_style,
        requests,
        result.label,
    );

    let cue = Celebration::for_label(&result.label);
    if cue != Celebration::Plain {
        out.push_str(&format!("  {}\n", cue));
    }
    out
}
