//! Scalar field values and records exchanged with the API and the backing store.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// One cell of a record. Serialized as a plain JSON scalar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Column name to value. Key order is not column order; use the table descriptor for that.
pub type Record = BTreeMap<String, FieldValue>;

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn is_empty_text(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.is_empty())
    }

    /// An id taken from a URL path. Always bound as text; MySQL converts it for integer keys,
    /// while text keys are never compared numerically.
    pub fn from_path_segment(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }

    pub fn from_json(col: &str, v: Value) -> Result<Self, AppError> {
        Ok(match v {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else if let Some(f) = n.as_f64() {
                    FieldValue::Float(f)
                } else {
                    FieldValue::Text(n.to_string())
                }
            }
            Value::String(s) => FieldValue::Text(s),
            Value::Array(_) | Value::Object(_) => {
                return Err(AppError::InvalidInput(format!("{} must be a scalar value", col)))
            }
        })
    }

    /// Same value modulo representation: `3`, `3.0` and `"3"` all match.
    pub fn loosely_eq(&self, other: &FieldValue) -> bool {
        if self.is_null() || other.is_null() {
            return self.is_null() && other.is_null();
        }
        self.to_string() == other.to_string()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Float(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Int(n)
    }
}

/// Turn a JSON request body into a record. The body must be an object of scalars.
pub fn body_to_record(body: Value) -> Result<Record, AppError> {
    match body {
        Value::Object(m) => m
            .into_iter()
            .map(|(k, v)| {
                let fv = FieldValue::from_json(&k, v)?;
                Ok((k, fv))
            })
            .collect(),
        _ => Err(AppError::InvalidInput("body must be a JSON object".into())),
    }
}
