/// Reasons a raw query-string value fails to decode.
///
/// ATTENTION: Only add new reason codes at the end of the list !!!
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidReason {
    Missing = 0,
    Int = 1,
    Positive = 2,
    Bool = 3,
    Enum = 4,
    Range = 5,
    Json = 6,
    ArrItem = 7,
}

impl InvalidReason {
    pub fn name(self) -> &'static str {
        match self {
            Self::Missing => "MISSING",
            Self::Int => "INT",
            Self::Positive => "POSITIVE",
            Self::Bool => "BOOL",
            Self::Enum => "ENUM",
            Self::Range => "RANGE",
            Self::Json => "JSON",
            Self::ArrItem => "ARR_ITEM",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Missing => "Missing key.",
            Self::Int => "Not a base-10 integer.",
            Self::Positive => "Not a positive integer.",
            Self::Bool => "Not a boolean literal.",
            Self::Enum => "Not an allowed value.",
            Self::Range => "Value out of range.",
            Self::Json => "Not a JSON array of strings.",
            Self::ArrItem => "Array contains a value that is not allowed.",
        }
    }
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(InvalidReason::Missing as u8, 0);
        assert_eq!(InvalidReason::ArrItem as u8, 7);
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(InvalidReason::Positive.to_string(), "POSITIVE");
        assert_eq!(InvalidReason::Json.message(), "Not a JSON array of strings.");
    }
}
