use super::Codec;
use crate::constants::InvalidReason;
use crate::error::{EncodeError, Invalid};

/// A string restricted to an allowed set; decoding is the identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OneOfCodec {
    pub allowed: Vec<String>,
}

impl OneOfCodec {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_allowed(&self, value: &str) -> bool {
        self.allowed.iter().any(|a| a == value)
    }
}

impl Codec for OneOfCodec {
    type Value = String;

    fn kind(&self) -> &'static str {
        "one_of"
    }

    fn decode(&self, raw: &str) -> Result<String, Invalid> {
        if self.is_allowed(raw) {
            Ok(raw.to_string())
        } else {
            Err(Invalid::new(InvalidReason::Enum, raw))
        }
    }

    fn encode(&self, value: &String) -> Result<String, EncodeError> {
        Ok(value.clone())
    }
}
