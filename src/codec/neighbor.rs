/*!
  Enrollment neighbor state: what the IPC Manager learns about a peer
  IPC Process during/after enrollment.
*/
use super::name::Name;
use super::{CodecError, WireCodec};

/// A known neighbor IPCP and the bookkeeping enrollment keeps on it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IpcpNeighbor {
    pub address: u32,
    pub old_address: u32,
    pub average_rtt_in_ms: u32,
    pub num_enroll_attempts: u32,
    pub enrolled: bool,
    pub under_port_id: i32,
    pub intern_port_id: i32,
    pub last_heard_time_ms: i32,
    pub ipcp_name: Name,
    pub sup_dif_name: Name,
    pub supporting_difs: Vec<Name>,
}

impl WireCodec for IpcpNeighbor {
    fn wire_len(&self) -> usize {
        4 * 4
            + 1
            + 4 * 3
            + self.ipcp_name.wire_len()
            + self.sup_dif_name.wire_len()
            + self.supporting_difs.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.address.encode(out)?;
        self.old_address.encode(out)?;
        self.average_rtt_in_ms.encode(out)?;
        self.num_enroll_attempts.encode(out)?;
        self.enrolled.encode(out)?;
        self.under_port_id.encode(out)?;
        self.intern_port_id.encode(out)?;
        self.last_heard_time_ms.encode(out)?;
        self.ipcp_name.encode(out)?;
        self.sup_dif_name.encode(out)?;
        self.supporting_difs.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(IpcpNeighbor {
            address: u32::decode(input)?,
            old_address: u32::decode(input)?,
            average_rtt_in_ms: u32::decode(input)?,
            num_enroll_attempts: u32::decode(input)?,
            enrolled: bool::decode(input)?,
            under_port_id: i32::decode(input)?,
            intern_port_id: i32::decode(input)?,
            last_heard_time_ms: i32::decode(input)?,
            ipcp_name: Name::decode(input)?,
            sup_dif_name: Name::decode(input)?,
            supporting_difs: Vec::<Name>::decode(input)?,
        })
    }
}

/// The full set of neighbors an IPCP currently knows about.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IpcpNeighborList {
    pub neighbors: Vec<IpcpNeighbor>,
}

impl WireCodec for IpcpNeighborList {
    fn wire_len(&self) -> usize {
        self.neighbors.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.neighbors.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(IpcpNeighborList {
            neighbors: Vec::<IpcpNeighbor>::decode(input)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipcp_neighbor_list_roundtrip() {
        let list = IpcpNeighborList {
            neighbors: vec![IpcpNeighbor {
                address: 16,
                enrolled: true,
                ipcp_name: Name {
                    process_name: "b.ipcp".into(),
                    ..Default::default()
                },
                ..Default::default()
            }],
        };
        let mut buf = Vec::new();
        list.encode(&mut buf).unwrap();
        assert_eq!(list.wire_len(), buf.len());

        let mut rest = &buf[..];
        let decoded = IpcpNeighborList::decode(&mut rest).unwrap();
        assert_eq!(decoded, list);
        assert!(rest.is_empty());
    }
}
