//! The normalized time-series record emitted per station per month.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One monthly observation for a station.
///
/// Serializes to the record shape of the output files:
/// `{"Time": "1991-01-01", "Value": 5.3, "Station": "WAKKANAI"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// First day of the observed calendar month.
    #[serde(rename = "Time")]
    pub time: NaiveDate,
    #[serde(rename = "Value")]
    pub value: ObservationValue,
    /// Station name as configured, e.g. `"WAKKANAI"`.
    #[serde(rename = "Station")]
    pub station: String,
}

/// A scraped monthly value.
///
/// Cells that survive sanitization as numeric text become [`Number`]. Anything
/// else is preserved verbatim as [`Invalid`], so downstream consumers can tell
/// a missing or malformed observation apart from a real reading. Invalid values
/// serialize as the raw string, numbers as JSON numbers.
///
/// [`Number`]: ObservationValue::Number
/// [`Invalid`]: ObservationValue::Invalid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObservationValue {
    Number(f64),
    Invalid(String),
}

impl ObservationValue {
    /// Parses sanitized cell text; non-numeric text is kept as-is, not coerced.
    pub fn parse(text: &str) -> Self {
        match text.parse::<f64>() {
            Ok(value) => ObservationValue::Number(value),
            Err(_) => ObservationValue::Invalid(text.to_string()),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ObservationValue::Number(_))
    }
}
