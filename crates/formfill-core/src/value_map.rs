//! Field name → value map loaded from JSON

use crate::error::FormError;
use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;

/// Values to fill, keyed by field name, in file order.
///
/// Non-string scalars are accepted and stored as their JSON text; `null`
/// becomes the empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueMap {
    values: IndexMap<String, String>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, FormError> {
        let raw = std::fs::read_to_string(path).map_err(|e| FormError::io(path, e))?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, FormError> {
        // Deserializing straight into an IndexMap keeps the file's key order.
        let object: IndexMap<String, Value> =
            serde_json::from_str(raw).map_err(|e| FormError::InvalidValueMap(e.to_string()))?;

        let mut values = IndexMap::with_capacity(object.len());
        for (key, value) in object {
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => String::new(),
                other => {
                    return Err(FormError::InvalidValueMap(format!(
                        "value for '{}' must be a scalar, found {}",
                        key,
                        json_kind(&other)
                    )))
                }
            };
            values.insert(key, text);
        }

        Ok(Self { values })
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ValueMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
