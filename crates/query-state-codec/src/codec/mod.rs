//! Field codecs.
//!
//! Every concrete codec implements [`Codec`] over its own value type. The
//! [`CodecNode`] enum is the sum of all codecs, so a schema can hold fields of
//! different types side by side; at that level values are `serde_json::Value`.

pub mod array;
pub mod choice;
pub mod scalar;

pub use array::{ArrayFormat, ArrayOfCodec};
pub use choice::OneOfCodec;
pub use scalar::{
    BooleanCodec, IntegerCodec, NumberLiteralCodec, PageCodec, StarRatingCodec, TextCodec,
};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use crate::error::{EncodeError, Invalid};

/// Paired decode/encode functions for one query-string value.
///
/// Implementations must guarantee `decode(encode(v)) == v` for every `v`
/// that `decode` can produce.
pub trait Codec {
    type Value: Clone + PartialEq + fmt::Debug + Into<Value> + DeserializeOwned;

    fn kind(&self) -> &'static str;

    fn decode(&self, raw: &str) -> Result<Self::Value, Invalid>;

    fn encode(&self, value: &Self::Value) -> Result<String, EncodeError>;
}

/// The unified enum covering all codec instances.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecNode {
    Page(PageCodec),
    Integer(IntegerCodec),
    Boolean(BooleanCodec),
    Text(TextCodec),
    OneOf(OneOfCodec),
    NumberLiteral(NumberLiteralCodec),
    StarRating(StarRatingCodec),
    ArrayOf(ArrayOfCodec),
}

impl CodecNode {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Page(c) => c.kind(),
            Self::Integer(c) => c.kind(),
            Self::Boolean(c) => c.kind(),
            Self::Text(c) => c.kind(),
            Self::OneOf(c) => c.kind(),
            Self::NumberLiteral(c) => c.kind(),
            Self::StarRating(c) => c.kind(),
            Self::ArrayOf(c) => c.kind(),
        }
    }

    /// Decodes a present raw value.
    pub fn decode(&self, raw: &str) -> Result<Value, Invalid> {
        match self {
            Self::Page(c) => decode_json(c, raw),
            Self::Integer(c) => decode_json(c, raw),
            Self::Boolean(c) => decode_json(c, raw),
            Self::Text(c) => decode_json(c, raw),
            Self::OneOf(c) => decode_json(c, raw),
            Self::NumberLiteral(c) => decode_json(c, raw),
            Self::StarRating(c) => decode_json(c, raw),
            Self::ArrayOf(c) => decode_json(c, raw),
        }
    }

    /// Encodes a value, refusing anything that would not decode back to it.
    pub fn encode(&self, value: &Value) -> Result<String, EncodeError> {
        match self {
            Self::Page(c) => encode_json(c, value),
            Self::Integer(c) => encode_json(c, value),
            Self::Boolean(c) => encode_json(c, value),
            Self::Text(c) => encode_json(c, value),
            Self::OneOf(c) => encode_json(c, value),
            Self::NumberLiteral(c) => encode_json(c, value),
            Self::StarRating(c) => encode_json(c, value),
            Self::ArrayOf(c) => encode_json(c, value),
        }
    }

    pub fn array_format(&self) -> Option<ArrayFormat> {
        match self {
            Self::ArrayOf(c) => Some(c.format),
            _ => None,
        }
    }
}

impl fmt::Display for CodecNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

fn decode_json<C: Codec>(codec: &C, raw: &str) -> Result<Value, Invalid> {
    codec.decode(raw).map(Into::into)
}

fn encode_json<C: Codec>(codec: &C, value: &Value) -> Result<String, EncodeError> {
    let typed = <C::Value as Deserialize>::deserialize(value).map_err(|_| EncodeError::Type {
        kind: codec.kind(),
        value: value.clone(),
    })?;
    let encoded = codec.encode(&typed)?;
    match codec.decode(&encoded) {
        Ok(back) if back == typed => Ok(encoded),
        _ => Err(EncodeError::NotRoundTrip {
            kind: codec.kind(),
            encoded,
        }),
    }
}
