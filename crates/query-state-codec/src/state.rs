//! The decoded projection of a query string, and typed keys into it.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::marker::PhantomData;

/// Name of a schema field tagged with the Rust type its value decodes to.
pub struct Key<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Key<T> {}

impl<T> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Key").field(&self.name).finish()
    }
}

/// A fully decoded state: one value per schema field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    values: Map<String, Value>,
}

impl QueryState {
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Deserializes one field; an absent field reads as `null`.
    pub fn value<T: DeserializeOwned>(&self, key: Key<T>) -> Result<T, serde_json::Error> {
        T::deserialize(self.values.get(key.name()).unwrap_or(&Value::Null))
    }

    /// Deserializes the whole state into a typed record.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&Value::Object(self.values.clone()))
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

    pub fn into_map(self) -> Map<String, Value> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PAGE: Key<u64> = Key::new("page");
    const RATING: Key<Option<u8>> = Key::new("rating");

    fn state() -> QueryState {
        let mut map = Map::new();
        map.insert("page".into(), json!(3));
        map.insert("rating".into(), Value::Null);
        QueryState::new(map)
    }

    #[test]
    fn typed_field_access() {
        assert_eq!(state().value(PAGE).unwrap(), 3);
        assert_eq!(state().value(RATING).unwrap(), None);
        assert_eq!(PAGE.name(), "page");
    }

    #[test]
    fn absent_field_reads_as_null() {
        let missing: Key<Option<String>> = Key::new("missing");
        assert_eq!(state().value(missing).unwrap(), None);
        let strict: Key<u64> = Key::new("missing");
        assert!(state().value(strict).is_err());
    }

    #[test]
    fn whole_state_projection() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct View {
            page: u64,
            rating: Option<u8>,
        }
        assert_eq!(
            state().to_typed::<View>().unwrap(),
            View {
                page: 3,
                rating: None
            }
        );
    }
}
