//! Typed attribute values attached to devices.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single typed attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl AttributeValue {
    /// Human-readable name of the value's type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::String(_) => "string",
        }
    }

    /// The boolean inside, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The integer inside, if this is an integer.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The string inside, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value:?}"),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_string_variant_as_plain_string() {
        let val = AttributeValue::String("hello".to_string());
        let json = serde_json::to_string(&val).unwrap();
        assert_eq!(json, "\"hello\"");
    }

    #[test]
    fn should_serialize_int_variant_as_number() {
        let val = AttributeValue::Int(42);
        let json = serde_json::to_string(&val).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn should_serialize_bool_variant() {
        let val = AttributeValue::Bool(true);
        let json = serde_json::to_string(&val).unwrap();
        assert_eq!(json, "true");
    }

    #[test]
    fn should_deserialize_number_as_int_variant() {
        let val: AttributeValue = serde_json::from_str("24").unwrap();
        assert_eq!(val, AttributeValue::Int(24));
    }

    #[test]
    fn should_compare_equal_values() {
        assert_eq!(AttributeValue::Int(10), AttributeValue::Int(10));
        assert_ne!(AttributeValue::Int(10), AttributeValue::Int(20));
    }

    #[test]
    fn should_expose_inner_values_through_accessors() {
        assert_eq!(AttributeValue::Bool(true).as_bool(), Some(true));
        assert_eq!(AttributeValue::Int(7).as_int(), Some(7));
        assert_eq!(AttributeValue::from("COOL").as_str(), Some("COOL"));
        assert_eq!(AttributeValue::Bool(true).as_int(), None);
    }

    #[test]
    fn should_display_strings_quoted_and_numbers_bare() {
        assert_eq!(AttributeValue::Int(31).to_string(), "31");
        assert_eq!(AttributeValue::Bool(false).to_string(), "false");
        assert_eq!(AttributeValue::from("COLD").to_string(), "\"COLD\"");
    }

    #[test]
    fn should_report_type_names() {
        assert_eq!(AttributeValue::Bool(true).type_name(), "boolean");
        assert_eq!(AttributeValue::Int(1).type_name(), "integer");
        assert_eq!(AttributeValue::from("x").type_name(), "string");
    }
}
