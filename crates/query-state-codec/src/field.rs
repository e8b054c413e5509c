//! A codec plus the per-field modifiers.

use serde_json::Value;

use crate::codec::CodecNode;
use crate::error::{EncodeError, Invalid};

/// Immutable descriptor of one query-state field.
///
/// - `nullable`: an absent key decodes to `null`, and `null` encodes to
///   "omit the key".
/// - `fallback`: substituted whenever decoding fails, including a missing
///   key on a non-nullable field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCodec {
    pub codec: CodecNode,
    pub nullable: bool,
    pub fallback: Option<Value>,
}

impl FieldCodec {
    pub fn new(codec: CodecNode) -> Self {
        Self {
            codec,
            nullable: false,
            fallback: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_fallback(mut self, fallback: impl Into<Value>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    pub fn kind(&self) -> &'static str {
        self.codec.kind()
    }

    /// Decodes without applying the fallback.
    pub fn decode_strict(&self, raw: Option<&str>) -> Result<Value, Invalid> {
        match raw {
            None if self.nullable => Ok(Value::Null),
            None => Err(Invalid::missing()),
            Some(raw) => self.codec.decode(raw),
        }
    }

    /// Decodes, substituting the fallback on failure when one is set.
    pub fn decode(&self, raw: Option<&str>) -> Result<Value, Invalid> {
        match (self.decode_strict(raw), &self.fallback) {
            (Err(_), Some(fallback)) => Ok(fallback.clone()),
            (result, _) => result,
        }
    }

    /// Encodes a value; `Ok(None)` means the key is left out of the query.
    pub fn encode(&self, value: &Value) -> Result<Option<String>, EncodeError> {
        if self.nullable && value.is_null() {
            return Ok(None);
        }
        self.codec.encode(value).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{PageCodec, StarRatingCodec};
    use crate::constants::InvalidReason;
    use serde_json::json;

    fn rating() -> FieldCodec {
        FieldCodec::new(CodecNode::StarRating(StarRatingCodec))
            .nullable()
            .with_fallback(Value::Null)
    }

    #[test]
    fn fallback_replaces_invalid_and_missing() {
        let page = FieldCodec::new(CodecNode::Page(PageCodec)).with_fallback(1);
        assert_eq!(page.decode(Some("0")), Ok(json!(1)));
        assert_eq!(page.decode(None), Ok(json!(1)));
        assert_eq!(page.decode(Some("9")), Ok(json!(9)));
    }

    #[test]
    fn without_fallback_errors_propagate() {
        let page = FieldCodec::new(CodecNode::Page(PageCodec));
        assert_eq!(page.decode(None).unwrap_err().reason, InvalidReason::Missing);
        assert_eq!(
            page.decode(Some("x")).unwrap_err().reason,
            InvalidReason::Int
        );
    }

    #[test]
    fn nullable_absent_is_null_not_invalid() {
        let bare = FieldCodec::new(CodecNode::StarRating(StarRatingCodec)).nullable();
        assert_eq!(bare.decode(None), Ok(Value::Null));
        assert_eq!(rating().decode(Some("7")), Ok(Value::Null));
        assert_eq!(rating().decode(Some("4")), Ok(json!(4)));
    }

    #[test]
    fn nullable_null_encodes_to_omitted_key() {
        assert_eq!(rating().encode(&Value::Null).unwrap(), None);
        assert_eq!(rating().encode(&json!(3)).unwrap(), Some("3".to_string()));
        assert!(rating().encode(&json!(9)).is_err());
    }

    #[test]
    fn non_nullable_rejects_null() {
        let page = FieldCodec::new(CodecNode::Page(PageCodec));
        assert!(matches!(
            page.encode(&Value::Null),
            Err(EncodeError::Type { .. })
        ));
    }
}
