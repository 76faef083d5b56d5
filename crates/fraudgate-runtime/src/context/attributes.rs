//! Flattened charge attributes

use super::field_lookup::get_nested_value;
use fraudgate_core::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// String-keyed attribute map the evaluator reads
///
/// Values are scalars or nested objects; dotted paths resolve through
/// nested objects. The evaluator never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMap {
    values: HashMap<String, Value>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(values: HashMap<String, Value>) -> Self {
        Self { values }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a dotted attribute path
    pub fn get(&self, path: &str) -> Option<&Value> {
        get_nested_value(&self.values, path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn into_inner(self) -> HashMap<String, Value> {
        self.values
    }
}

impl From<HashMap<String, Value>> for AttributeMap {
    fn from(values: HashMap<String, Value>) -> Self {
        Self::from_map(values)
    }
}

impl From<serde_json::Value> for AttributeMap {
    fn from(json: serde_json::Value) -> Self {
        match Value::from(json) {
            Value::Object(values) => Self { values },
            _ => Self::default(),
        }
    }
}
