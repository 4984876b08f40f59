/*!
  PDU Forwarding Function entries: the wire shape exchanged when the
  kernel asks the IPC Manager to add/remove/dump forwarding table rows.
*/
use super::{CodecError, WireCodec};

/// A set of equally-preferred next-hop ports for one forwarding entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PortIdAltlist {
    pub ports: Vec<u32>,
}

impl WireCodec for PortIdAltlist {
    fn wire_len(&self) -> usize {
        self.ports.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.ports.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(PortIdAltlist {
            ports: Vec::<u32>::decode(input)?,
        })
    }
}

/// One row of the PDU Forwarding Table: destination address and QoS id
/// being forwarded, its cost, and the alternative next hops for it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModPffEntry {
    pub fwd_info: u32,
    pub qos_id: u32,
    pub cost: u32,
    pub port_id_altlists: Vec<PortIdAltlist>,
}

impl WireCodec for ModPffEntry {
    fn wire_len(&self) -> usize {
        4 + 4 + 4 + self.port_id_altlists.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.fwd_info.encode(out)?;
        self.qos_id.encode(out)?;
        self.cost.encode(out)?;
        self.port_id_altlists.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(ModPffEntry {
            fwd_info: u32::decode(input)?,
            qos_id: u32::decode(input)?,
            cost: u32::decode(input)?,
            port_id_altlists: Vec::<PortIdAltlist>::decode(input)?,
        })
    }
}

/// A batch of PFF entries, as exchanged by dump/add/remove operations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PffEntryList {
    pub entries: Vec<ModPffEntry>,
}

impl WireCodec for PffEntryList {
    fn wire_len(&self) -> usize {
        self.entries.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.entries.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(PffEntryList {
            entries: Vec::<ModPffEntry>::decode(input)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pff_entry_list_roundtrip() {
        let list = PffEntryList {
            entries: vec![ModPffEntry {
                fwd_info: 7,
                qos_id: 1,
                cost: 1,
                port_id_altlists: vec![PortIdAltlist { ports: vec![3, 4] }],
            }],
        };
        let mut buf = Vec::new();
        list.encode(&mut buf).unwrap();
        assert_eq!(list.wire_len(), buf.len());

        let mut rest = &buf[..];
        let decoded = PffEntryList::decode(&mut rest).unwrap();
        assert_eq!(decoded, list);
        assert!(rest.is_empty());
    }
}
