//! Named field codecs and the default-value record.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::codec::{ArrayFormat, CodecNode};
use crate::error::{FieldError, SchemaError};
use crate::field::FieldCodec;
use crate::params::RawParams;
use crate::state::QueryState;

/// Field name to codec mapping. Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: IndexMap<String, FieldCodec>,
}

/// Outcome of a lenient whole-schema decode.
///
/// Fields that failed without a fallback are absent from `state` and listed
/// in `errors`.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeReport {
    pub state: QueryState,
    pub errors: Vec<FieldError>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, codec: FieldCodec) -> Self {
        self.insert(name, codec);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, codec: FieldCodec) -> Option<FieldCodec> {
        self.fields.insert(name.into(), codec)
    }

    pub fn get(&self, name: &str) -> Option<&FieldCodec> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldCodec)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Decodes every field independently; one field's failure never stops
    /// the others.
    pub fn decode_report(&self, params: &RawParams) -> DecodeReport {
        let mut values = Map::new();
        let mut errors = Vec::new();
        for (name, field) in &self.fields {
            match field.decode(params.get(name)) {
                Ok(value) => {
                    values.insert(name.clone(), value);
                }
                Err(source) => errors.push(FieldError {
                    field: name.clone(),
                    source,
                }),
            }
        }
        DecodeReport {
            state: QueryState::new(values),
            errors,
        }
    }

    /// Strict decode: the first field that failed without a fallback is an
    /// error.
    pub fn decode(&self, params: &RawParams) -> Result<QueryState, FieldError> {
        let report = self.decode_report(params);
        match report.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(report.state),
        }
    }

    /// The array format shared by the schema's array fields, if any.
    pub fn array_format(&self) -> Option<ArrayFormat> {
        self.fields.values().find_map(|f| f.codec.array_format())
    }

    /// Checks the schema against its defaults. See [`SchemaError`] for the
    /// rules.
    pub fn validate(&self, defaults: &DefaultValues) -> Result<(), SchemaError> {
        let mut formats = self.fields.values().filter_map(|f| f.codec.array_format());
        if let Some(first) = formats.next() {
            if formats.any(|f| f != first) {
                return Err(SchemaError::MixedArrayFormats);
            }
        }
        for (name, field) in &self.fields {
            validate_field(name, field, defaults.get(name))?;
        }
        if let Some(unknown) = defaults.names().find(|name| !self.contains(name)) {
            return Err(SchemaError::UnknownDefault(unknown.to_string()));
        }
        Ok(())
    }
}

fn validate_field(name: &str, field: &FieldCodec, default: Option<&Value>) -> Result<(), SchemaError> {
    if name.is_empty() {
        return Err(SchemaError::EmptyFieldName);
    }
    if let CodecNode::ArrayOf(arr) = &field.codec {
        if arr.format == ArrayFormat::Comma {
            if let Some(bad) = arr.allowed.iter().find(|v| v.is_empty() || v.contains(',')) {
                return Err(SchemaError::SeparatorInValue {
                    field: name.to_string(),
                    value: bad.clone(),
                });
            }
        }
    }
    let fallback = field
        .fallback
        .as_ref()
        .ok_or_else(|| SchemaError::MissingFallback(name.to_string()))?;
    let default = default.ok_or_else(|| SchemaError::MissingDefault(name.to_string()))?;
    if field.nullable && !default.is_null() {
        return Err(SchemaError::NullableDefaultNotNull(name.to_string()));
    }
    field
        .encode(default)
        .map_err(|source| SchemaError::DefaultNotRepresentable {
            field: name.to_string(),
            source,
        })?;
    field
        .encode(fallback)
        .map_err(|source| SchemaError::FallbackNotRepresentable {
            field: name.to_string(),
            source,
        })?;
    // An omitted key reads back as the fallback.
    if fallback != default {
        return Err(SchemaError::FallbackDiffersFromDefault {
            field: name.to_string(),
            fallback: fallback.clone(),
            default: default.clone(),
        });
    }
    Ok(())
}

/// Default value per schema field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultValues {
    values: Map<String, Value>,
}

impl DefaultValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Builds defaults from any record that serializes to a JSON object.
    pub fn from_serialize<T: Serialize>(record: &T) -> Result<Self, SchemaError> {
        match serde_json::to_value(record)? {
            Value::Object(values) => Ok(Self { values }),
            _ => Err(SchemaError::DefaultsNotObject),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
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
