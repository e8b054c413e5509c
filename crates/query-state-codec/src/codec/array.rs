//! Array-of-enumerated-strings codec and its two wire formats.
//!
//! - `Comma`: `"a,b,c"`; the empty string is the empty array.
//! - `Json`: `["a","b","c"]`.
//!
//! An element outside the allowed set rejects the whole array.

use serde::{Deserialize, Serialize};

use super::Codec;
use crate::constants::InvalidReason;
use crate::error::{EncodeError, Invalid};

pub const COMMA_SEPARATOR: char = ',';

/// How an array is packed into a single query-string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayFormat {
    #[default]
    Comma,
    Json,
}

impl ArrayFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Comma => "comma",
            Self::Json => "json",
        }
    }

    /// Splits a raw value into its items without checking membership.
    pub fn split(self, raw: &str) -> Result<Vec<String>, Invalid> {
        match self {
            Self::Comma if raw.is_empty() => Ok(Vec::new()),
            Self::Comma => Ok(raw.split(COMMA_SEPARATOR).map(str::to_string).collect()),
            Self::Json => {
                serde_json::from_str(raw).map_err(|_| Invalid::new(InvalidReason::Json, raw))
            }
        }
    }

    pub fn join(self, items: &[String]) -> Result<String, EncodeError> {
        match self {
            Self::Comma => Ok(items.join(",")),
            Self::Json => Ok(serde_json::to_string(items)?),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayOfCodec {
    pub allowed: Vec<String>,
    pub format: ArrayFormat,
}

impl ArrayOfCodec {
    pub fn new<I, S>(allowed: I, format: ArrayFormat) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            format,
        }
    }
}

impl Codec for ArrayOfCodec {
    type Value = Vec<String>;

    fn kind(&self) -> &'static str {
        "array_of"
    }

    fn decode(&self, raw: &str) -> Result<Vec<String>, Invalid> {
        let items = self.format.split(raw)?;
        if items.iter().any(|item| !self.allowed.contains(item)) {
            return Err(Invalid::new(InvalidReason::ArrItem, raw));
        }
        Ok(items)
    }

    fn encode(&self, value: &Vec<String>) -> Result<String, EncodeError> {
        self.format.join(value)
    }
}
