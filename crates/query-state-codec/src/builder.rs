//! Factory for constructing FieldCodec instances.

use crate::codec::*;
use crate::field::FieldCodec;

/// Factory for field codecs.
///
/// Carries the application-wide [`ArrayFormat`], so every array field built
/// through one builder shares a wire format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamBuilder {
    pub array_format: ArrayFormat,
}

impl ParamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_array_format(array_format: ArrayFormat) -> Self {
        Self { array_format }
    }

    pub fn page(&self) -> FieldCodec {
        FieldCodec::new(CodecNode::Page(PageCodec))
    }

    pub fn integer(&self) -> FieldCodec {
        FieldCodec::new(CodecNode::Integer(IntegerCodec))
    }

    pub fn boolean(&self) -> FieldCodec {
        FieldCodec::new(CodecNode::Boolean(BooleanCodec))
    }

    pub fn text(&self) -> FieldCodec {
        FieldCodec::new(CodecNode::Text(TextCodec))
    }

    pub fn star_rating(&self) -> FieldCodec {
        FieldCodec::new(CodecNode::StarRating(StarRatingCodec))
    }

    pub fn one_of<I, S>(&self, allowed: I) -> FieldCodec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldCodec::new(CodecNode::OneOf(OneOfCodec::new(allowed)))
    }

    pub fn number_literal(&self, allowed: impl IntoIterator<Item = i64>) -> FieldCodec {
        FieldCodec::new(CodecNode::NumberLiteral(NumberLiteralCodec::new(allowed)))
    }

    pub fn array_of<I, S>(&self, allowed: I) -> FieldCodec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldCodec::new(CodecNode::ArrayOf(ArrayOfCodec::new(
            allowed,
            self.array_format,
        )))
    }
}
