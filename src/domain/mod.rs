//! Module for the types defining the ingested event domain.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

mod stats;


pub use stats::{Counters, Stats};

pub(crate) const FIELD_POST: &str = "post";
pub(crate) const FIELD_TYPE: &str = "type";
pub(crate) const FIELD_RATE: &str = "rate";
pub(crate) const FIELD_PT: &str = "pt";

/// Type assigned to records which do not name one.
pub const DEFAULT_EVENT_TYPE: &str = "post";

/// A normalized record of ingested activity.
///
/// The recognized fields (`post`, `type`, `rate`, `pt`) are read by name, every other field
/// is carried along untouched and in its original position, so serializing an event reproduces
/// the fields it was read with (plus a defaulted `type`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Event {
    fields: Map<String, Value>,
}

impl Event {
    /// Builds an event from a decoded JSON value.
    ///
    /// Returns `None` when the value carries no usable `post` (absent, `null`, or the value is
    /// not an object at all). Such records are not events and are dropped without complaint.
    pub(crate) fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut fields) = value else {
            return None;
        };
        if fields.get(FIELD_POST).is_none_or(Value::is_null) {
            return None;
        }

        if fields.get(FIELD_TYPE).is_none_or(is_unset) {
            // keeps the key's original slot if it was present
            fields.insert(
                FIELD_TYPE.to_string(),
                Value::String(DEFAULT_EVENT_TYPE.to_string()),
            );
        }

        Some(Self { fields })
    }

    /// The required payload. Never `null`.
    pub fn post(&self) -> &Value {
        // presence is checked on construction
        &self.fields[FIELD_POST]
    }

    /// The event type. `None` only if the record carried a non-string `type`.
    pub fn event_type(&self) -> Option<&str> {
        self.fields.get(FIELD_TYPE).and_then(Value::as_str)
    }

    pub fn rate(&self) -> Option<f64> {
        self.fields.get(FIELD_RATE).and_then(Value::as_f64)
    }

    /// Unix-epoch timestamp of the event, in seconds.
    pub fn pt(&self) -> Option<f64> {
        self.fields.get(FIELD_PT).and_then(Value::as_f64)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// Serializes the event back to a single line of JSON.
    pub fn to_json_string(&self) -> String {
        self.to_string()
    }
}

/// `type` values that count as not given: `null`, `""`, `false` and zero.
fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(&self.fields).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
