//! Sensor readings supplied by callers.
//!
//! Readings are request-scoped. Each field has a default that applies when the
//! caller leaves it out; a field that is present must parse as a float.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub const DEFAULT_PH: f64 = 7.0;
pub const DEFAULT_TDS: f64 = 0.0;
pub const DEFAULT_TEMPERATURE: f64 = 25.0;
pub const DEFAULT_HUMIDITY: f64 = 50.0;

#[derive(Debug, Error, PartialEq)]
pub enum ReadingError {
    #[error("Invalid value for '{field}': expected a number, got {found}")]
    WrongType { field: String, found: &'static str },

    #[error("Invalid value for '{field}': could not convert '{raw}' to a number")]
    Unparsable { field: String, raw: String },
}

/// pH, total dissolved solids (ppm), temperature (°C) and relative humidity (%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorReading {
    pub ph: f64,
    pub tds: f64,
    pub temperature: f64,
    pub humidity: f64,
}

impl Default for SensorReading {
    fn default() -> Self {
        Self {
            ph: DEFAULT_PH,
            tds: DEFAULT_TDS,
            temperature: DEFAULT_TEMPERATURE,
            humidity: DEFAULT_HUMIDITY,
        }
    }
}

impl SensorReading {
    /// Read `ph`, `tds`, `temperature` and `humidity` from a JSON object body.
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, ReadingError> {
        Ok(Self {
            ph: json_field(body, "ph", DEFAULT_PH)?,
            tds: json_field(body, "tds", DEFAULT_TDS)?,
            temperature: json_field(body, "temperature", DEFAULT_TEMPERATURE)?,
            humidity: json_field(body, "humidity", DEFAULT_HUMIDITY)?,
        })
    }

    /// Build from raw query-string values (`ph`, `tds`, `temp`, `hum`).
    pub fn from_query(
        ph: Option<&str>,
        tds: Option<&str>,
        temp: Option<&str>,
        hum: Option<&str>,
    ) -> Result<Self, ReadingError> {
        Ok(Self {
            ph: query_field("ph", ph, DEFAULT_PH)?,
            tds: query_field("tds", tds, DEFAULT_TDS)?,
            temperature: query_field("temp", temp, DEFAULT_TEMPERATURE)?,
            humidity: query_field("hum", hum, DEFAULT_HUMIDITY)?,
        })
    }
}

fn json_field(body: &Map<String, Value>, field: &str, default: f64) -> Result<f64, ReadingError> {
    match body.get(field) {
        None => Ok(default),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| ReadingError::Unparsable {
            field: field.to_string(),
            raw: n.to_string(),
        }),
        Some(Value::String(s)) => parse_float(field, s),
        Some(Value::Bool(b)) => Ok(if *b { 1.0 } else { 0.0 }),
        Some(other) => Err(ReadingError::WrongType {
            field: field.to_string(),
            found: type_name(other),
        }),
    }
}

fn query_field(field: &str, raw: Option<&str>, default: f64) -> Result<f64, ReadingError> {
    match raw {
        None => Ok(default),
        Some(s) => parse_float(field, s),
    }
}

fn parse_float(field: &str, raw: &str) -> Result<f64, ReadingError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ReadingError::Unparsable {
            field: field.to_string(),
            raw: raw.to_string(),
        })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
