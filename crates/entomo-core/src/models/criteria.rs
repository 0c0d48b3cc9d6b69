//! Search criteria supplied by callers.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Named search constraints. Every key is optional and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Criteria(Map<String, Value>);

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build criteria from a JSON value. `null` is treated as "no criteria".
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => Ok(Self(map)),
            other => Err(CatalogError::InvalidParams {
                message: format!("criteria must be an object, got {}", other),
            }),
        }
    }

    /// Text value of a criterion. Blank strings and nulls count as absent;
    /// numbers and booleans are rendered as text.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Value::Number(n) => n.as_f64().map(format_number),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Numeric value of a criterion. Accepts JSON numbers and numeric strings
    /// (decimal comma allowed); anything else fails fast.
    pub fn number(&self, key: &str) -> Result<Option<f64>> {
        let invalid = |value: &Value| CatalogError::InvalidCriterion {
            field: key.to_string(),
            value: value.to_string(),
        };

        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value @ Value::Number(n)) => n.as_f64().map(Some).ok_or_else(|| invalid(value)),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(value @ Value::String(s)) => s
                .trim()
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Some)
                .ok_or_else(|| invalid(value)),
            Some(other) => Err(invalid(other)),
        }
    }

    /// First present text value among several aliases.
    pub fn text_any(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.text(key))
    }
}

impl From<Map<String, Value>> for Criteria {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Render a number the way a person would type it: `10` rather than `10.0`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
