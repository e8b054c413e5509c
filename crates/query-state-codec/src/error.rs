//! Error types for decoding, encoding and schema construction.

use serde_json::Value;
use thiserror::Error;

use crate::constants::InvalidReason;

/// A raw query-string value failed its decode predicate.
///
/// `raw` is `None` when the key was absent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason}: {raw:?}")]
pub struct Invalid {
    pub reason: InvalidReason,
    pub raw: Option<String>,
}

impl Invalid {
    pub fn new(reason: InvalidReason, raw: &str) -> Self {
        Self {
            reason,
            raw: Some(raw.to_string()),
        }
    }

    pub fn missing() -> Self {
        Self {
            reason: InvalidReason::Missing,
            raw: None,
        }
    }
}

/// A value could not be written in a form that reads back identically.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("{value} is not a valid `{kind}` value")]
    Type { kind: &'static str, value: Value },
    #[error("`{kind}` value encodes to {encoded:?}, which does not decode back to it")]
    NotRoundTrip { kind: &'static str, encoded: String },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Strict whole-schema decode failure for a field without a fallback.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("field `{field}`: {source}")]
pub struct FieldError {
    pub field: String,
    pub source: Invalid,
}

/// Construction-time contract violations ("schema misconfigured").
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema misconfigured: field name must not be empty")]
    EmptyFieldName,
    #[error("schema misconfigured: field `{0}` has no fallback")]
    MissingFallback(String),
    #[error("schema misconfigured: field `{0}` has no default value")]
    MissingDefault(String),
    #[error("schema misconfigured: default given for unknown field `{0}`")]
    UnknownDefault(String),
    #[error("schema misconfigured: default of `{field}` is not representable: {source}")]
    DefaultNotRepresentable { field: String, source: EncodeError },
    #[error("schema misconfigured: fallback of `{field}` is not representable: {source}")]
    FallbackNotRepresentable { field: String, source: EncodeError },
    #[error("schema misconfigured: fallback of `{field}` ({fallback}) differs from its default ({default})")]
    FallbackDiffersFromDefault {
        field: String,
        fallback: Value,
        default: Value,
    },
    #[error("schema misconfigured: nullable field `{0}` must default to null")]
    NullableDefaultNotNull(String),
    #[error("schema misconfigured: array fields mix comma and JSON encodings")]
    MixedArrayFormats,
    #[error("schema misconfigured: allowed value {value:?} of `{field}` cannot be comma-joined")]
    SeparatorInValue { field: String, value: String },
    #[error("schema misconfigured: default values must form an object")]
    DefaultsNotObject,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
