//! Scalar codecs: numbers, booleans and free text.

use super::Codec;
use crate::constants::InvalidReason;
use crate::error::{EncodeError, Invalid};

// -------------------------------------------------------------------------
// PageCodec

/// Positive base-10 integer, e.g. a 1-based page number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageCodec;

impl Codec for PageCodec {
    type Value = u64;

    fn kind(&self) -> &'static str {
        "page"
    }

    fn decode(&self, raw: &str) -> Result<u64, Invalid> {
        let n: i64 = raw
            .parse()
            .map_err(|_| Invalid::new(InvalidReason::Int, raw))?;
        if n <= 0 {
            return Err(Invalid::new(InvalidReason::Positive, raw));
        }
        Ok(n as u64)
    }

    fn encode(&self, value: &u64) -> Result<String, EncodeError> {
        Ok(value.to_string())
    }
}

// -------------------------------------------------------------------------
// IntegerCodec

/// Any signed base-10 integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerCodec;

impl Codec for IntegerCodec {
    type Value = i64;

    fn kind(&self) -> &'static str {
        "integer"
    }

    fn decode(&self, raw: &str) -> Result<i64, Invalid> {
        raw.parse()
            .map_err(|_| Invalid::new(InvalidReason::Int, raw))
    }

    fn encode(&self, value: &i64) -> Result<String, EncodeError> {
        Ok(value.to_string())
    }
}

// -------------------------------------------------------------------------
// BooleanCodec

/// Only the literals `"true"` and `"false"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanCodec;

impl Codec for BooleanCodec {
    type Value = bool;

    fn kind(&self) -> &'static str {
        "boolean"
    }

    fn decode(&self, raw: &str) -> Result<bool, Invalid> {
        match raw {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(Invalid::new(InvalidReason::Bool, raw)),
        }
    }

    fn encode(&self, value: &bool) -> Result<String, EncodeError> {
        Ok(value.to_string())
    }
}

// -------------------------------------------------------------------------
// TextCodec

/// Free text; every raw value is accepted as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextCodec;

impl Codec for TextCodec {
    type Value = String;

    fn kind(&self) -> &'static str {
        "text"
    }

    fn decode(&self, raw: &str) -> Result<String, Invalid> {
        Ok(raw.to_string())
    }

    fn encode(&self, value: &String) -> Result<String, EncodeError> {
        Ok(value.clone())
    }
}

// -------------------------------------------------------------------------
// NumberLiteralCodec

/// An integer restricted to a fixed list of literals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberLiteralCodec {
    pub allowed: Vec<i64>,
}

impl NumberLiteralCodec {
    pub fn new(allowed: impl IntoIterator<Item = i64>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }
}

impl Codec for NumberLiteralCodec {
    type Value = i64;

    fn kind(&self) -> &'static str {
        "number_literal"
    }

    fn decode(&self, raw: &str) -> Result<i64, Invalid> {
        let n: i64 = raw
            .parse()
            .map_err(|_| Invalid::new(InvalidReason::Int, raw))?;
        if !self.allowed.contains(&n) {
            return Err(Invalid::new(InvalidReason::Enum, raw));
        }
        Ok(n)
    }

    fn encode(&self, value: &i64) -> Result<String, EncodeError> {
        Ok(value.to_string())
    }
}

// -------------------------------------------------------------------------
// StarRatingCodec

const STAR_RATINGS: [&str; 5] = ["1", "2", "3", "4", "5"];

/// Exactly one of `"1"` through `"5"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarRatingCodec;

impl Codec for StarRatingCodec {
    type Value = u8;

    fn kind(&self) -> &'static str {
        "star_rating"
    }

    fn decode(&self, raw: &str) -> Result<u8, Invalid> {
        STAR_RATINGS
            .iter()
            .position(|s| *s == raw)
            .map(|i| i as u8 + 1)
            .ok_or_else(|| Invalid::new(InvalidReason::Range, raw))
    }

    fn encode(&self, value: &u8) -> Result<String, EncodeError> {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_boundaries() {
        assert_eq!(PageCodec.decode("42"), Ok(42));
        assert_eq!(PageCodec.decode("1"), Ok(1));
        assert_eq!(PageCodec.decode("0").unwrap_err().reason, InvalidReason::Positive);
        assert_eq!(PageCodec.decode("-1").unwrap_err().reason, InvalidReason::Positive);
        assert_eq!(PageCodec.decode("abc").unwrap_err().reason, InvalidReason::Int);
        assert_eq!(PageCodec.decode("").unwrap_err().reason, InvalidReason::Int);
        assert_eq!(PageCodec.decode("1.5").unwrap_err().reason, InvalidReason::Int);
    }

    #[test]
    fn integer_accepts_negative() {
        assert_eq!(IntegerCodec.decode("-12"), Ok(-12));
        assert!(IntegerCodec.decode("twelve").is_err());
    }

    #[test]
    fn boolean_only_literals() {
        assert_eq!(BooleanCodec.decode("true"), Ok(true));
        assert_eq!(BooleanCodec.decode("false"), Ok(false));
        assert!(BooleanCodec.decode("TRUE").is_err());
        assert!(BooleanCodec.decode("1").is_err());
        assert_eq!(BooleanCodec.encode(&false).unwrap(), "false");
    }

    #[test]
    fn text_is_identity() {
        assert_eq!(TextCodec.decode("a b&c"), Ok("a b&c".to_string()));
        assert_eq!(TextCodec.encode(&String::new()).unwrap(), "");
    }

    #[test]
    fn number_literal_membership() {
        let c = NumberLiteralCodec::new([10, 20, 50]);
        assert_eq!(c.decode("20"), Ok(20));
        assert_eq!(c.decode("30").unwrap_err().reason, InvalidReason::Enum);
        assert_eq!(c.decode("x").unwrap_err().reason, InvalidReason::Int);
    }

    #[test]
    fn star_rating_exact_strings() {
        for (i, raw) in ["1", "2", "3", "4", "5"].iter().enumerate() {
            assert_eq!(StarRatingCodec.decode(raw), Ok(i as u8 + 1));
        }
        for raw in ["0", "6", "7", "01", "+3", " 3", ""] {
            assert_eq!(
                StarRatingCodec.decode(raw).unwrap_err().reason,
                InvalidReason::Range
            );
        }
    }
}
