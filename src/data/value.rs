//! Cell values pulled out of the snapshot.

use polars::prelude::AnyValue;
use serde::Serialize;
use std::fmt;

/// A single cell, detached from the backing `DataFrame`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Numeric view of the cell; `None` for nulls, text and booleans.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short type name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str(""),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<AnyValue<'_>> for Value {
    fn from(value: AnyValue<'_>) -> Self {
        match value {
            AnyValue::Null => Value::Null,
            AnyValue::Boolean(b) => Value::Bool(b),
            AnyValue::String(s) => Value::Text(s.to_string()),
            AnyValue::StringOwned(s) => Value::Text(s.to_string()),
            AnyValue::Int8(i) => Value::Int(i.into()),
            AnyValue::Int16(i) => Value::Int(i.into()),
            AnyValue::Int32(i) => Value::Int(i.into()),
            AnyValue::Int64(i) => Value::Int(i),
            AnyValue::UInt8(i) => Value::Int(i.into()),
            AnyValue::UInt16(i) => Value::Int(i.into()),
            AnyValue::UInt32(i) => Value::Int(i.into()),
            AnyValue::UInt64(i) => match i64::try_from(i) {
                Ok(i) => Value::Int(i),
                Err(_) => Value::Float(i as f64),
            },
            AnyValue::Float32(x) => Value::Float(x.into()),
            AnyValue::Float64(x) => Value::Float(x),
            other => Value::Text(other.to_string().trim_matches('"').to_string()),
        }
    }
}
