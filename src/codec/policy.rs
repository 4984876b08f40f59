/*!
  Policy sets: the name/version/parameter-list triples that every
  configurable policy hook in a DIF configuration carries on the wire.
*/
use super::{CodecError, WireCodec};

/// A single `name = value` policy parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolicyParm {
    pub name: String,
    pub value: String,
}

impl WireCodec for PolicyParm {
    fn wire_len(&self) -> usize {
        self.name.wire_len() + self.value.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.name.encode(out)?;
        self.value.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(PolicyParm {
            name: String::decode(input)?,
            value: String::decode(input)?,
        })
    }
}

/// A named, versioned policy set plus its tunable parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Policy {
    pub name: String,
    pub version: String,
    pub params: Vec<PolicyParm>,
}

impl WireCodec for Policy {
    fn wire_len(&self) -> usize {
        self.name.wire_len() + self.version.wire_len() + self.params.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.name.encode(out)?;
        self.version.encode(out)?;
        self.params.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Policy {
            name: String::decode(input)?,
            version: String::decode(input)?,
            params: Vec::<PolicyParm>::decode(input)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_roundtrip() {
        let p = Policy {
            name: "ps".into(),
            version: "1".into(),
            params: vec![PolicyParm {
                name: "q".into(),
                value: "v".into(),
            }],
        };
        let mut buf = Vec::new();
        p.encode(&mut buf).unwrap();
        assert_eq!(p.wire_len(), buf.len());

        let mut rest = &buf[..];
        assert_eq!(Policy::decode(&mut rest).unwrap(), p);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_policy_no_params() {
        let p = Policy {
            name: String::new(),
            version: String::new(),
            params: Vec::new(),
        };
        let mut buf = Vec::new();
        p.encode(&mut buf).unwrap();
        let mut rest = &buf[..];
        assert_eq!(Policy::decode(&mut rest).unwrap(), p);
    }
}
