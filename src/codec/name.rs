/*!
  RINA application/entity naming.
*/
use super::{CodecError, WireCodec};

/// A four-part RINA name: process name, process instance, entity name,
/// entity instance. Always present (never optional) wherever a message
/// declares a name slot — unlike buffers, there is no wire-level "absent
/// name" distinct from four empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Name {
    pub process_name: String,
    pub process_instance: String,
    pub entity_name: String,
    pub entity_instance: String,
}

impl WireCodec for Name {
    fn wire_len(&self) -> usize {
        self.process_name.wire_len()
            + self.process_instance.wire_len()
            + self.entity_name.wire_len()
            + self.entity_instance.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.process_name.encode(out)?;
        self.process_instance.encode(out)?;
        self.entity_name.encode(out)?;
        self.entity_instance.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Name {
            process_name: String::decode(input)?,
            process_instance: String::decode(input)?,
            entity_name: String::decode(input)?,
            entity_instance: String::decode(input)?,
        })
    }
}

/// A `Name`'s four fields joined with `:` are used as a single-string
/// shorthand elsewhere in the stack (CLI tooling, `librina`'s IDL
/// bindings); a name never needs more than one colon per field boundary.
pub const MAX_COLONS: usize = 3;

/// Why a colon-joined name shorthand was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameValidationError {
    /// The string started with `:`, which would parse back as an empty
    /// first field — the original source rejects this explicitly.
    LeadingColon,
    /// More separators than the four fields can account for.
    TooManyColons(usize),
}

impl Name {
    /// Join the four fields into the `:`-delimited shorthand string and
    /// validate it.
    pub fn to_colon_string(&self) -> Result<String, NameValidationError> {
        let joined = format!(
            "{}:{}:{}:{}",
            self.process_name, self.process_instance, self.entity_name, self.entity_instance
        );
        Self::validate_colon_string(&joined)?;
        Ok(joined)
    }

    /// Validate a colon-joined name shorthand: no leading colon, and no
    /// more than [`MAX_COLONS`] separators.
    pub fn validate_colon_string(s: &str) -> Result<(), NameValidationError> {
        if s.starts_with(':') {
            return Err(NameValidationError::LeadingColon);
        }
        let colons = s.matches(':').count();
        if colons > MAX_COLONS {
            return Err(NameValidationError::TooManyColons(colons));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colon_string_roundtrip_and_validation() {
        let n = Name {
            process_name: "a.ipcp".into(),
            process_instance: "1".into(),
            entity_name: "mgmt".into(),
            entity_instance: "2".into(),
        };
        assert_eq!(n.to_colon_string().unwrap(), "a.ipcp:1:mgmt:2");
    }

    #[test]
    fn test_colon_string_rejects_leading_colon() {
        assert_eq!(
            Name::validate_colon_string(":a:b:c"),
            Err(NameValidationError::LeadingColon)
        );
    }

    #[test]
    fn test_colon_string_rejects_too_many_colons() {
        assert_eq!(
            Name::validate_colon_string("a:b:c:d:e"),
            Err(NameValidationError::TooManyColons(4))
        );
    }

    #[test]
    fn test_name_roundtrip() {
        let n = Name {
            process_name: "a.ipcp".into(),
            process_instance: "1".into(),
            entity_name: String::new(),
            entity_instance: String::new(),
        };
        let mut buf = Vec::new();
        n.encode(&mut buf).unwrap();
        assert_eq!(n.wire_len(), buf.len());

        let mut rest = &buf[..];
        assert_eq!(Name::decode(&mut rest).unwrap(), n);
        assert!(rest.is_empty());
    }
}
