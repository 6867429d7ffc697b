use std::fmt;

use serde::Serialize;

/// A single cell value.
///
/// `Missing` is an explicit sentinel, distinct from zero and from empty text.
/// Within one table a column holds a single scalar type, but `Missing` is
/// valid in any column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Text(String),
    /// Serialized as JSON null.
    Missing,
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// The numeric content, if any. `Bool` and `Text` do not coerce.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Equality between two known values. `Missing` equals nothing,
    /// including another `Missing`; an absent value is not a value.
    pub fn known_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }

    /// Canonical string form of a key cell, applied to both sides of a join
    /// so that numeric `123` and text `"123"` land on the same key.
    ///
    /// Integral numbers drop the fractional part entirely; spreadsheet
    /// readers routinely surface identifier columns as floats.
    pub fn canonical_key(&self) -> String {
        match self {
            Self::Number(n) => format_number_plain(*n),
            Self::Bool(b) => b.to_string(),
            Self::Text(s) => s.trim().to_string(),
            Self::Missing => String::new(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_number_plain(*n)),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Missing => Ok(()),
        }
    }
}

/// Plain decimal rendering: integral values lose the trailing `.0`.
fn format_number_plain(n: f64) -> String {
    if n == 0.0 {
        // Covers -0.0 as well.
        return "0".to_string();
    }
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.0e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_text_keys_collide() {
        assert_eq!(Value::Number(123.0).canonical_key(), "123");
        assert_eq!(Value::Text("123".into()).canonical_key(), "123");
        assert_eq!(Value::Text(" 123 ".into()).canonical_key(), "123");
    }

    #[test]
    fn fractional_keys_keep_their_decimals() {
        assert_eq!(Value::Number(12.5).canonical_key(), "12.5");
    }

    #[test]
    fn negative_zero_key_is_zero() {
        assert_eq!(Value::Number(-0.0).canonical_key(), "0");
    }

    #[test]
    fn missing_equals_nothing() {
        assert!(!Value::Missing.known_eq(&Value::Missing));
        assert!(!Value::Missing.known_eq(&Value::Number(0.0)));
        assert!(!Value::Number(0.0).known_eq(&Value::Missing));
    }

    #[test]
    fn known_eq_is_exact() {
        assert!(Value::Number(100.0).known_eq(&Value::Number(100.0)));
        assert!(!Value::Number(100.0).known_eq(&Value::Number(100.01)));
        assert!(!Value::Number(1.0).known_eq(&Value::Text("1".into())));
    }

    #[test]
    fn missing_serializes_as_null() {
        #[derive(serde::Serialize)]
        struct Row {
            v: Value,
        }
        let json = serde_json::to_string(&Row { v: Value::Missing }).unwrap();
        assert_eq!(json, r#"{"v":null}"#);
    }

    #[test]
    fn display_drops_integral_fraction() {
        assert_eq!(Value::Number(1500.0).to_string(), "1500");
        assert_eq!(Value::Number(1500.25).to_string(), "1500.25");
        assert_eq!(Value::Missing.to_string(), "");
    }
}
