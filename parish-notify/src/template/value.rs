//! Scalar values stored in a notification context

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single value available for placeholder substitution
///
/// Values are scalars. Their canonical string form (the [`fmt::Display`]
/// implementation) is what ends up in a rendered template:
///
/// ```rust
/// use parish_notify::template::ContextValue;
///
/// assert_eq!(ContextValue::Null.to_string(), "");
/// assert_eq!(ContextValue::from(true).to_string(), "true");
/// assert_eq!(ContextValue::from(42).to_string(), "42");
/// assert_eq!(ContextValue::from(3.0).to_string(), "3");
/// assert_eq!(ContextValue::from("Jane").to_string(), "Jane");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum ContextValue {
    /// Absent value, renders as an empty string
    #[default]
    Null,
    /// Boolean flag
    Bool(bool),
    /// Whole number
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// Text
    Text(String),
}

impl ContextValue {
    /// Whether this value is `Null`
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the text of a `Text` value
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) if value.is_finite() => write!(f, "{value}"),
            Self::Float(_) => Ok(()),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<serde_json::Value> for ContextValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(flag) => Self::Bool(flag),
            serde_json::Value::Number(number) => match (number.as_i64(), number.as_u64()) {
                (Some(integer), _) => Self::Integer(integer),
                // Above i64::MAX; an f64 would lose digits.
                (None, Some(_)) => Self::Text(number.to_string()),
                (None, None) => number.as_f64().map_or(Self::Null, Self::Float),
            },
            serde_json::Value::String(text) => Self::Text(text),
            // Free-form payloads may nest; keep the compact JSON so nothing is lost.
            nested @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                Self::Text(nested.to_string())
            }
        }
    }
}

impl From<ContextValue> for serde_json::Value {
    fn from(value: ContextValue) -> Self {
        match value {
            ContextValue::Null => Self::Null,
            ContextValue::Bool(flag) => Self::Bool(flag),
            ContextValue::Integer(number) => Self::from(number),
            ContextValue::Float(number) => {
                serde_json::Number::from_f64(number).map_or(Self::Null, Self::Number)
            }
            ContextValue::Text(text) => Self::String(text),
        }
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ContextValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for ContextValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u64> for ContextValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Integer)
    }
}

impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for ContextValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_strings() {
        assert_eq!(ContextValue::Null.to_string(), "");
        assert_eq!(ContextValue::Bool(false).to_string(), "false");
        assert_eq!(ContextValue::Integer(-7).to_string(), "-7");
        assert_eq!(ContextValue::Float(2.5).to_string(), "2.5");
        assert_eq!(ContextValue::Float(10.0).to_string(), "10");
        assert_eq!(ContextValue::Text("hi".into()).to_string(), "hi");
    }

    #[test]
    fn test_non_finite_float_is_empty() {
        assert_eq!(ContextValue::Float(f64::NAN).to_string(), "");
        assert_eq!(ContextValue::Float(f64::INFINITY).to_string(), "");
    }

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(ContextValue::from(json!(null)), ContextValue::Null);
        assert_eq!(ContextValue::from(json!(true)), ContextValue::Bool(true));
        assert_eq!(ContextValue::from(json!(12)), ContextValue::Integer(12));
        assert_eq!(ContextValue::from(json!(0.5)), ContextValue::Float(0.5));
        assert_eq!(
            ContextValue::from(json!("Easter")),
            ContextValue::Text("Easter".into())
        );
    }

    #[test]
    fn test_from_json_nested_keeps_compact_json() {
        let value = ContextValue::from(json!(["8:00", "10:30"]));
        assert_eq!(value.to_string(), r#"["8:00","10:30"]"#);

        let value = ContextValue::from(json!({"room": "Hall"}));
        assert_eq!(value.to_string(), r#"{"room":"Hall"}"#);
    }

    #[test]
    fn test_option_conversion() {
        assert!(ContextValue::from(None::<String>).is_null());
        assert_eq!(ContextValue::from(Some("x")).as_str(), Some("x"));
    }

    #[test]
    fn test_large_unsigned_falls_back_to_text() {
        assert_eq!(ContextValue::from(u64::MAX).to_string(), u64::MAX.to_string());
        assert_eq!(ContextValue::from(5_u64), ContextValue::Integer(5));
    }

    #[test]
    fn test_from_json_large_unsigned_keeps_digits() {
        let value = ContextValue::from(json!(u64::MAX));
        assert_eq!(value, ContextValue::Text("18446744073709551615".into()));
        assert_eq!(value.to_string(), "18446744073709551615");
    }

    #[test]
    fn test_serde_round_trip_through_json() {
        let value: ContextValue = serde_json::from_str("17").unwrap();
        assert_eq!(value, ContextValue::Integer(17));
        assert_eq!(serde_json::to_string(&value).unwrap(), "17");
    }
}
