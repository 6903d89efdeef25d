//! Attendance record types.
//!
//! Records are owned by the remote service. Apart from the identifier, the
//! fields are carried through as opaque JSON values.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};

/// Field values of a record, keyed by field name.
pub type RecordFields = Map<String, Value>;

/// Server-assigned record identifier.
///
/// Services differ in whether they hand out numeric or string ids, so both
/// are accepted and compared by their display form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric id, e.g. an auto-increment key.
    Number(i64),
    /// String id, e.g. a UUID or document key.
    Text(String),
}

impl RecordId {
    /// Check whether this id is the one a user typed.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        self.to_string() == raw.trim()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(raw: &str) -> Self {
        raw.trim()
            .parse::<i64>()
            .map_or_else(|_| Self::Text(raw.trim().to_string()), Self::Number)
    }
}

/// A single attendance record as returned by the service.
///
/// The id is read from `id`, or from `_id` when there is no `id`. When a
/// service sends both, `_id` stays in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceRecord {
    /// Unique identifier used to target edits and deletes.
    pub id: RecordId,

    /// Every other field, untouched.
    #[serde(flatten)]
    pub fields: RecordFields,
}

impl<'de> Deserialize<'de> for AttendanceRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = RecordFields::deserialize(deserializer)?;
        let raw = fields
            .shift_remove("id")
            .or_else(|| fields.shift_remove("_id"))
            .ok_or_else(|| de::Error::missing_field("id"))?;
        let id = RecordId::deserialize(raw).map_err(de::Error::custom)?;
        Ok(Self { id, fields })
    }
}

impl AttendanceRecord {
    /// Create a record from an id and its fields.
    #[must_use]
    pub fn new(id: impl Into<RecordId>, fields: RecordFields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Look up a field value.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Parse a `key=value` assignment into a field name and JSON value.
///
/// # Errors
///
/// Returns an error if there is no `=` or the key is blank.
pub fn parse_assignment(input: &str) -> Result<(String, Value)> {
    let Some((key, raw)) = input.split_once('=') else {
        return Err(Error::invalid_field(input, "expected key=value"));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::invalid_field(input, "missing field name"));
    }
    Ok((key.to_string(), parse_value(raw)))
}

/// Interpret typed text as a JSON scalar where that is unambiguous.
///
/// `true`, `false`, `null` and numbers become their JSON types; anything
/// else, including quoted text, is kept as a string. A number is only
/// coerced when it prints back exactly as typed and fits an `i64` or `f64`,
/// so `007`, `+5` and out-of-range integers stay strings.
#[must_use]
pub fn parse_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    match trimmed {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => {
            if let Some(n) = exact_number(trimmed) {
                return Value::Number(n);
            }
            let unquoted = trimmed
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or(trimmed);
            Value::String(unquoted.to_string())
        }
    }
}

fn exact_number(text: &str) -> Option<Number> {
    let n = serde_json::from_str::<Number>(text).ok()?;
    ((n.is_i64() || n.is_f64()) && n.to_string() == text).then_some(n)
}

/// Render a field value for display in a table cell or form line.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
