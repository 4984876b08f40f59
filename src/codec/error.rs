/*!
  Codec error
*/

/// Error produced while computing a wire length, encoding, or decoding a
/// sub-object or message.
#[derive(Debug, PartialEq, Clone)]
#[non_exhaustive]
pub enum CodecError {
    /// The message ordinal is not in `1..=73`.
    UnknownOrdinal(u16),
    /// The input did not contain enough bytes to satisfy a read.
    TruncatedInput,
    /// Decode consumed fewer bytes than the input held.
    TrailingBytes,
    /// A string longer than 65535 bytes was passed to the encoder.
    OversizeString,
    /// A string sub-object's raw bytes were not valid UTF-8.
    InvalidUtf8,
    /// Decode consumed a different number of bytes than `wire_len` predicted.
    InconsistentLength,
    /// A count prefix implied a child allocation that could not be built.
    AllocFailed(String),
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::UnknownOrdinal(n) => write!(f, "unknown message ordinal {}", n),
            CodecError::TruncatedInput => write!(f, "truncated input"),
            CodecError::TrailingBytes => write!(f, "trailing bytes after decode"),
            CodecError::OversizeString => write!(f, "string exceeds 65535 bytes"),
            CodecError::InvalidUtf8 => write!(f, "string sub-object is not valid UTF-8"),
            CodecError::InconsistentLength => write!(f, "decoded length disagrees with wire_len"),
            CodecError::AllocFailed(what) => write!(f, "failed to build {}", what),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<deku::DekuError> for CodecError {
    fn from(_: deku::DekuError) -> Self {
        CodecError::TruncatedInput
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            "unknown message ordinal 99",
            CodecError::UnknownOrdinal(99).to_string()
        );
    }
}
