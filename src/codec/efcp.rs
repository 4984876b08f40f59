/*!
  EFCP (Error and Flow Control Protocol) configuration: the data transfer
  constants shared by a DIF plus the catalogue of QoS cubes it offers.
*/
use deku::prelude::*;

use super::policy::Policy;
use super::qos::{DtCons, QosCube};
use super::{take, CodecError, WireCodec};

/// Data transfer constants, the policy run for traffic of unknown QoS,
/// an optional opaque PCI-offset table, and the DIF's QoS cube catalogue.
///
/// `pci_offset_table` uses a one-byte length prefix rather than the
/// four-byte buffer framing used elsewhere: the original only ever wrote
/// `sizeof(ssize_t)` bytes (0 or 8) here, never an arbitrary-length blob.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EfcpConfig {
    pub dt_cons: DtCons,
    pub unknown_flow: Policy,
    pub pci_offset_table: Option<Vec<u8>>,
    pub qos_cubes: Vec<QosCube>,
}

impl WireCodec for EfcpConfig {
    fn wire_len(&self) -> usize {
        self.dt_cons.to_bytes().map(|b| b.len()).unwrap_or(0)
            + self.unknown_flow.wire_len()
            + 1
            + self.pci_offset_table.as_ref().map(|v| v.len()).unwrap_or(0)
            + self.qos_cubes.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        out.extend_from_slice(
            &self
                .dt_cons
                .to_bytes()
                .map_err(|_| CodecError::AllocFailed("dt_cons".into()))?,
        );
        self.unknown_flow.encode(out)?;
        match &self.pci_offset_table {
            None => out.push(0),
            Some(bytes) => {
                if bytes.len() > u8::MAX as usize {
                    return Err(CodecError::AllocFailed("pci_offset_table".into()));
                }
                out.push(bytes.len() as u8);
                out.extend_from_slice(bytes);
            }
        }
        self.qos_cubes.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let ((rest, _bit_offset), dt_cons) = DtCons::from_bytes((input, 0))
            .map_err(|_| CodecError::AllocFailed("dt_cons".into()))?;
        *input = rest;
        let unknown_flow = Policy::decode(input)?;
        let size = u8::decode(input)? as usize;
        let pci_offset_table = if size > 0 {
            Some(take(input, size)?.to_vec())
        } else {
            None
        };
        let qos_cubes = Vec::<QosCube>::decode(input)?;
        Ok(EfcpConfig {
            dt_cons,
            unknown_flow,
            pci_offset_table,
            qos_cubes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_efcp_config_roundtrip_no_offset_table() {
        let cfg = EfcpConfig {
            dt_cons: DtCons::default(),
            unknown_flow: Policy {
                name: "default".into(),
                ..Default::default()
            },
            pci_offset_table: None,
            qos_cubes: vec![QosCube {
                id: 1,
                ..Default::default()
            }],
        };
        let mut buf = Vec::new();
        cfg.encode(&mut buf).unwrap();
        assert_eq!(cfg.wire_len(), buf.len());

        let mut rest = &buf[..];
        let decoded = EfcpConfig::decode(&mut rest).unwrap();
        assert_eq!(decoded, cfg);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_efcp_config_with_offset_table() {
        let cfg = EfcpConfig {
            pci_offset_table: Some(vec![1, 2, 3, 4, 5, 6, 7, 8]),
            ..Default::default()
        };
        let mut buf = Vec::new();
        cfg.encode(&mut buf).unwrap();

        let mut rest = &buf[..];
        let decoded = EfcpConfig::decode(&mut rest).unwrap();
        assert_eq!(decoded, cfg);
    }
}
