/*!
  DIF property queries: the maximum SDU size and identity of each DIF an
  application process is a member of.
*/
use super::name::Name;
use super::{CodecError, WireCodec};

/// One DIF's advertised properties.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DifPropertiesEntry {
    pub max_sdu_size: u16,
    pub dif_name: Name,
}

impl WireCodec for DifPropertiesEntry {
    fn wire_len(&self) -> usize {
        2 + self.dif_name.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.max_sdu_size.encode(out)?;
        self.dif_name.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(DifPropertiesEntry {
            max_sdu_size: u16::decode(input)?,
            dif_name: Name::decode(input)?,
        })
    }
}

/// Reply to a "get DIF properties" request: one entry per DIF the
/// application is registered in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetDifPropResp {
    pub entries: Vec<DifPropertiesEntry>,
}

impl WireCodec for GetDifPropResp {
    fn wire_len(&self) -> usize {
        self.entries.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.entries.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(GetDifPropResp {
            entries: Vec::<DifPropertiesEntry>::decode(input)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_dif_prop_resp_roundtrip() {
        let resp = GetDifPropResp {
            entries: vec![DifPropertiesEntry {
                max_sdu_size: 1500,
                dif_name: Name {
                    process_name: "normal.dif".into(),
                    ..Default::default()
                },
            }],
        };
        let mut buf = Vec::new();
        resp.encode(&mut buf).unwrap();
        assert_eq!(resp.wire_len(), buf.len());

        let mut rest = &buf[..];
        let decoded = GetDifPropResp::decode(&mut rest).unwrap();
        assert_eq!(decoded, resp);
        assert!(rest.is_empty());
    }
}
