//! Value enum for dynamic field values

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

/// A dynamic value read from a row's data by field name.
///
/// Rows are opaque to the engine; the only thing it needs from them is a way
/// to look up a field and get one of these back. Columns then convert the
/// value to their declared type, treating a mismatch as "undefined".
///
/// # Type Mapping
///
/// | Column type | Accepted variants |
/// |-------------|-------------------|
/// | string | `String`, `Bool`, `Int`, `Float`, `BigInt` |
/// | multi-string | `Strings`, `String` |
/// | boolean | `Bool` |
/// | number, relative-time | `Int`, `Float`, `BigInt` |
/// | bigint | `BigInt`, `Int`, integral `Float` |
/// | date, time, date-time | `DateTime`, ISO-8601 `String` |
///
/// # Example
///
/// ```
/// use headless_table::model::Value;
///
/// let age = Value::from(36i64);
/// assert_eq!(age.to_f64(), Some(36.0));
/// assert_eq!(age.to_text().as_deref(), Some("36"));
/// assert!(Value::Null.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null/absent value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision integer.
    BigInt(BigInt),
    /// String value.
    String(String),
    /// List of optional strings.
    Strings(Vec<Option<String>>),
    /// Calendar date and wall-clock time.
    DateTime(NaiveDateTime),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    // =========================================================================
    // Lenient conversions used by default column accessors
    // =========================================================================

    /// Converts to a string; scalars are rendered with `to_string`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(n) => Some(n.to_string()),
            Value::Float(n) => Some(n.to_string()),
            Value::BigInt(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Converts to a list of optional strings. A single string becomes a
    /// one-element list.
    pub fn to_strings(&self) -> Option<Vec<Option<String>>> {
        match self {
            Value::Strings(items) => Some(items.clone()),
            Value::String(s) => Some(vec![Some(s.clone())]),
            _ => None,
        }
    }

    /// Converts to a boolean.
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Converts to a 64-bit float.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::BigInt(n) => n.to_f64(),
            _ => None,
        }
    }

    /// Converts to an arbitrary precision integer.
    pub fn to_bigint(&self) -> Option<BigInt> {
        match self {
            Value::BigInt(n) => Some(n.clone()),
            Value::Int(n) => Some(BigInt::from(*n)),
            Value::Float(n) if n.fract() == 0.0 && n.is_finite() => {
                num_traits::FromPrimitive::from_f64(*n)
            }
            _ => None,
        }
    }

    /// Converts to a date-time. Strings are parsed as ISO-8601 date-times
    /// (`2022-01-31T11:22:33`, optional fraction and `Z`/offset) or dates
    /// (`2022-01-31`, midnight). Signed six-digit years (`-000001-12-31`) are
    /// accepted.
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            Value::String(s) => parse_iso_datetime(s),
            _ => None,
        }
    }
}

/// Parses the ISO-8601 shapes accepted by [`Value::to_datetime`].
pub fn parse_iso_datetime(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    None
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Value::BigInt(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::Strings(v.into_iter().map(Some).collect())
    }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        Value::Strings(v.into_iter().map(|s| Some(s.to_string())).collect())
    }
}

impl From<Vec<Option<String>>> for Value {
    fn from(v: Vec<Option<String>>) -> Self {
        Value::Strings(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::DateTime(v.and_time(chrono::NaiveTime::MIN))
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::from(&v)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n
                    .as_u64()
                    .map(|u| Value::BigInt(BigInt::from(u)))
                    .or_else(|| n.as_f64().map(Value::Float))
                    .unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => Value::Strings(
                items
                    .iter()
                    .map(|item| match item {
                        serde_json::Value::Null => None,
                        serde_json::Value::String(s) => Some(s.clone()),
                        other => Some(other.to_string()),
                    })
                    .collect(),
            ),
            serde_json::Value::Object(_) => Value::Null,
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}
