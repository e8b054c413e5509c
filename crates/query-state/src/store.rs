//! Typed state over the navigator's current query string.

use std::collections::HashMap;

use query_state_codec::{
    join_href, DefaultValues, FieldCodec, Key, QueryState, RawParams, Schema, SchemaError,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error, trace};

use crate::error::StoreError;
use crate::navigation::{HistoryMode, Navigator};
use crate::options::StoreOptions;
use crate::update::Update;

/// Bridges [`QueryState`] and [`RawParams`] through a [`Navigator`].
///
/// Holds no copy of the URL: every read and every mutation starts from the
/// navigator's current location. Two mutations issued back to back each see
/// whatever the navigator reports at call time, so changes that belong
/// together should go through one [`set_many`](Self::set_many).
#[derive(Debug)]
pub struct QueryStateStore<N> {
    schema: Schema,
    defaults: DefaultValues,
    encoded_defaults: HashMap<String, Option<String>>,
    navigator: N,
    options: StoreOptions,
}

impl<N: Navigator> QueryStateStore<N> {
    pub fn new(schema: Schema, defaults: DefaultValues, navigator: N) -> Result<Self, SchemaError> {
        Self::with_options(schema, defaults, navigator, StoreOptions::default())
    }

    pub fn with_options(
        schema: Schema,
        defaults: DefaultValues,
        navigator: N,
        options: StoreOptions,
    ) -> Result<Self, SchemaError> {
        let encoded_defaults = encode_defaults(&schema, &defaults)?;
        Ok(Self {
            schema,
            defaults,
            encoded_defaults,
            navigator,
            options,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn defaults(&self) -> &DefaultValues {
        &self.defaults
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Swaps in a rebuilt schema, e.g. after the allowed option list of a
    /// field changed. The current defaults must still fit.
    pub fn replace_schema(&mut self, schema: Schema) -> Result<(), SchemaError> {
        self.encoded_defaults = encode_defaults(&schema, &self.defaults)?;
        self.schema = schema;
        Ok(())
    }

    /// Decodes every field from the current location. Invalid or missing
    /// values resolve to their fallback.
    pub fn read(&self) -> QueryState {
        let params = self.navigator.current_params();
        let mut values = Map::new();
        for (name, field) in self.schema.iter() {
            if let Some(value) = decode_field(name, field, &params) {
                values.insert(name.to_string(), value);
            }
        }
        QueryState::new(values)
    }

    /// Writes one field. A value equal to the field's default removes the
    /// key (unless `clear_on_default` is off).
    pub fn set(&self, field: &str, value: impl Serialize) -> Result<(), StoreError> {
        self.set_many(&Update::new().set(field, serde_json::to_value(value)?))
    }

    /// Writes several fields as one navigation. If any field is rejected
    /// nothing is navigated.
    pub fn set_many(&self, update: &Update) -> Result<(), StoreError> {
        let next = self.next_params(update)?;
        self.navigate(&next);
        Ok(())
    }

    /// Removes `field` from the query string whatever its value.
    pub fn unset(&self, field: &str) {
        let mut next = self.navigator.current_params();
        next.remove(field);
        self.navigate(&next);
    }

    /// Navigates to the current path without a query string.
    pub fn reset(&self) {
        self.navigate(&RawParams::new());
    }

    /// The href [`set_many`](Self::set_many) would navigate to.
    pub fn href_for(&self, update: &Update) -> Result<String, StoreError> {
        let next = self.next_params(update)?;
        Ok(join_href(&self.navigator.current_path(), &next))
    }

    /// Typed accessor for one field.
    pub fn field<T>(&self, key: Key<T>) -> Result<FieldHandle<'_, N, T>, StoreError> {
        if !self.schema.contains(key.name()) {
            return Err(StoreError::UnknownField(key.name().to_string()));
        }
        Ok(FieldHandle { store: self, key })
    }

    fn next_params(&self, update: &Update) -> Result<RawParams, StoreError> {
        let mut next = self.navigator.current_params();
        for (name, value) in update.iter() {
            self.apply(&mut next, name, value)?;
        }
        Ok(next)
    }

    fn apply(&self, params: &mut RawParams, name: &str, value: &Value) -> Result<(), StoreError> {
        let field = self
            .schema
            .get(name)
            .ok_or_else(|| StoreError::UnknownField(name.to_string()))?;
        let encoded = field.encode(value).map_err(|source| StoreError::Encode {
            field: name.to_string(),
            source,
        })?;
        // Encoding is injective on valid values, so comparing encodings is
        // a structural comparison of the values.
        let is_default = self.encoded_defaults.get(name) == Some(&encoded);
        match encoded {
            Some(raw) if !(is_default && self.options.clear_on_default) => {
                params.insert(name, raw);
            }
            _ => {
                trace!("Omitting `{}` from query", name);
                params.remove(name);
            }
        }
        Ok(())
    }

    fn navigate(&self, params: &RawParams) {
        let path = self.navigator.current_path();
        debug!(
            "Navigating ({:?}) to {}",
            self.options.history,
            join_href(&path, params)
        );
        match self.options.history {
            HistoryMode::Push => self.navigator.push(&path, params),
            HistoryMode::Replace => self.navigator.replace(&path, params),
        }
    }
}

fn encode_defaults(
    schema: &Schema,
    defaults: &DefaultValues,
) -> Result<HashMap<String, Option<String>>, SchemaError> {
    schema.validate(defaults)?;
    schema
        .iter()
        .map(|(name, field)| {
            let default = defaults
                .get(name)
                .ok_or_else(|| SchemaError::MissingDefault(name.to_string()))?;
            let encoded = field
                .encode(default)
                .map_err(|source| SchemaError::DefaultNotRepresentable {
                    field: name.to_string(),
                    source,
                })?;
            Ok((name.to_string(), encoded))
        })
        .collect()
}

fn decode_field(name: &str, field: &FieldCodec, params: &RawParams) -> Option<Value> {
    let raw = params.get(name);
    match field.decode_strict(raw) {
        Ok(value) => Some(value),
        Err(invalid) => {
            if raw.is_some() {
                debug!("Query param `{}` is invalid ({}), using fallback", name, invalid);
            }
            if field.fallback.is_none() {
                error!("Field `{}` has no fallback; left out of the state", name);
            }
            field.fallback.clone()
        }
    }
}

/// One field of a store, read and written through its Rust type.
#[derive(Debug)]
pub struct FieldHandle<'a, N, T> {
    store: &'a QueryStateStore<N>,
    key: Key<T>,
}

impl<N: Navigator, T: Serialize + DeserializeOwned> FieldHandle<'_, N, T> {
    pub fn name(&self) -> &'static str {
        self.key.name()
    }

    pub fn get(&self) -> Result<T, StoreError> {
        let params = self.store.navigator.current_params();
        let value = self
            .store
            .schema
            .get(self.key.name())
            .and_then(|field| decode_field(self.key.name(), field, &params))
            .unwrap_or(Value::Null);
        Ok(serde_json::from_value(value)?)
    }

    pub fn set(&self, value: &T) -> Result<(), StoreError> {
        self.store.set(self.key.name(), value)
    }

    pub fn unset(&self) {
        self.store.unset(self.key.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::MemoryNavigator;
    use query_state_codec::ParamBuilder;
    use serde_json::json;

    fn schema() -> Schema {
        let p = ParamBuilder::new();
        Schema::new()
            .field("page", p.page().with_fallback(1))
            .field("sort", p.one_of(["asc", "desc"]).with_fallback("asc"))
            .field(
                "tags",
                p.array_of(["a", "b", "c"]).with_fallback(Vec::<String>::new()),
            )
    }

    fn defaults() -> DefaultValues {
        DefaultValues::new()
            .with("page", 1)
            .with("sort", "asc")
            .with("tags", Vec::<String>::new())
    }

    fn store(nav: &MemoryNavigator) -> QueryStateStore<&MemoryNavigator> {
        QueryStateStore::new(schema(), defaults(), nav).unwrap()
    }

    #[test]
    fn construction_validates_schema() {
        let nav = MemoryNavigator::new("/");
        let bad = Schema::new().field("page", ParamBuilder::new().page());
        let err = QueryStateStore::new(bad, DefaultValues::new().with("page", 1), &nav).unwrap_err();
        assert!(matches!(err, SchemaError::MissingFallback(_)));
    }

    #[test]
    fn read_applies_fallbacks() {
        let nav = MemoryNavigator::new("/list?page=0&sort=desc&tags=a,z");
        let state = store(&nav).read();
        assert_eq!(state.get("page"), Some(&json!(1)));
        assert_eq!(state.get("sort"), Some(&json!("desc")));
        assert_eq!(state.get("tags"), Some(&json!([])));
    }

    #[test]
    fn set_default_removes_key() {
        let nav = MemoryNavigator::new("/list?page=4&sort=desc");
        let s = store(&nav);
        s.set("page", 1).unwrap();
        assert_eq!(nav.href(), "/list?sort=desc");
        s.set("tags", vec!["b", "a"]).unwrap();
        assert_eq!(nav.current_params().get("tags"), Some("b,a"));
        s.set("tags", Vec::<String>::new()).unwrap();
        assert!(!nav.current_params().contains_key("tags"));
    }

    #[test]
    fn set_rejects_unknown_and_unrepresentable() {
        let nav = MemoryNavigator::new("/list");
        let s = store(&nav);
        assert!(matches!(s.set("size", 10), Err(StoreError::UnknownField(_))));
        assert!(matches!(
            s.set("page", 0),
            Err(StoreError::Encode { ref field, .. }) if field == "page"
        ));
        assert!(matches!(s.set("tags", ["a", "z"]), Err(StoreError::Encode { .. })));
        assert_eq!(nav.transition_count(), 0);
    }

    #[test]
    fn failed_batch_navigates_nowhere() {
        let nav = MemoryNavigator::new("/list?page=2");
        let s = store(&nav);
        let update = Update::new().set("sort", "desc").set("page", -5);
        assert!(s.set_many(&update).is_err());
        assert_eq!(nav.transition_count(), 0);
        assert_eq!(nav.href(), "/list?page=2");
    }

    #[test]
    fn href_for_does_not_navigate() {
        let nav = MemoryNavigator::new("/list?page=2");
        let s = store(&nav);
        let href = s.href_for(&Update::new().set("sort", "desc")).unwrap();
        assert_eq!(href, "/list?page=2&sort=desc");
        assert_eq!(nav.transition_count(), 0);
    }

    #[test]
    fn field_handle_round_trip() {
        const PAGE: Key<u64> = Key::new("page");
        const MISSING: Key<u64> = Key::new("size");
        let nav = MemoryNavigator::new("/list");
        let s = store(&nav);
        assert!(matches!(s.field(MISSING), Err(StoreError::UnknownField(_))));
        let page = s.field(PAGE).unwrap();
        assert_eq!(page.get().unwrap(), 1);
        page.set(&5).unwrap();
        assert_eq!(page.get().unwrap(), 5);
        page.unset();
        assert_eq!(page.get().unwrap(), 1);
        assert_eq!(page.name(), "page");
    }

    #[test]
    fn replace_schema_revalidates() {
        let nav = MemoryNavigator::new("/list?tags=d");
        let mut s = store(&nav);
        assert_eq!(s.read().get("tags"), Some(&json!([])));

        let p = ParamBuilder::new();
        let wider = schema().field(
            "tags",
            p.array_of(["a", "b", "c", "d"]).with_fallback(Vec::<String>::new()),
        );
        s.replace_schema(wider).unwrap();
        assert_eq!(s.read().get("tags"), Some(&json!(["d"])));

        let broken = schema().field("tags", p.array_of(["a"]));
        assert!(s.replace_schema(broken).is_err());
        assert_eq!(s.read().get("tags"), Some(&json!(["d"])));
    }
}
