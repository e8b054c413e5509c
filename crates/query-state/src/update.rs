//! A partial state applied by one batched navigation.

use query_state_codec::Key;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::StoreError;

/// Field values to write together. Fields left out are untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    values: Map<String, Value>,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    pub fn with<T: Serialize>(mut self, key: Key<T>, value: &T) -> Result<Self, StoreError> {
        self.values
            .insert(key.name().to_string(), serde_json::to_value(value)?);
        Ok(self)
    }

    /// Builds an update from a record serializing to an object. `null`
    /// members are kept (they clear nullable fields); skip a member with
    /// `#[serde(skip_serializing_if = "Option::is_none")]` to leave it alone.
    pub fn from_serialize<T: Serialize>(partial: &T) -> Result<Self, StoreError> {
        match serde_json::to_value(partial)? {
            Value::Object(values) => Ok(Self { values }),
            _ => Err(StoreError::NotAnObject),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
