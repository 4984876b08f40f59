/*!
  RIB (Resource Information Base) query responses.
*/
use super::{CodecError, WireCodec};

/// A single object read out of a remote RIB.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RibObjectData {
    pub instance: u64,
    pub name: String,
    pub clazz: String,
    pub disp_value: String,
}

impl WireCodec for RibObjectData {
    fn wire_len(&self) -> usize {
        8 + self.name.wire_len() + self.clazz.wire_len() + self.disp_value.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.instance.encode(out)?;
        self.name.encode(out)?;
        self.clazz.encode(out)?;
        self.disp_value.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(RibObjectData {
            instance: u64::decode(input)?,
            name: String::decode(input)?,
            clazz: String::decode(input)?,
            disp_value: String::decode(input)?,
        })
    }
}

/// The full result set of a RIB query: a flat, ordered sequence of
/// objects (the original's doubly-linked list collapsed to a `Vec`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryRibResp {
    pub entries: Vec<RibObjectData>,
}

impl WireCodec for QueryRibResp {
    fn wire_len(&self) -> usize {
        self.entries.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.entries.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(QueryRibResp {
            entries: Vec::<RibObjectData>::decode(input)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_rib_resp_roundtrip() {
        let resp = QueryRibResp {
            entries: vec![RibObjectData {
                instance: 1,
                name: "/root".into(),
                clazz: "dif".into(),
                disp_value: String::new(),
            }],
        };
        let mut buf = Vec::new();
        resp.encode(&mut buf).unwrap();
        assert_eq!(resp.wire_len(), buf.len());

        let mut rest = &buf[..];
        let decoded = QueryRibResp::decode(&mut rest).unwrap();
        assert_eq!(decoded, resp);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_query_rib_resp_empty() {
        let resp = QueryRibResp::default();
        let mut buf = Vec::new();
        resp.encode(&mut buf).unwrap();
        assert_eq!(buf, vec![0, 0]);
    }
}
