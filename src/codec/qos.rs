/*!
  Data transfer constants and QoS cubes.
*/
use deku::prelude::*;

use super::dtcp::DtcpConfig;
use super::dtp::DtpConfig;
use super::{CodecError, WireCodec};

/// Per-DIF bounds on the width of PCI fields and related constants. Every
/// field is a fixed-width scalar, so this is represented with `deku`.
#[derive(Debug, Clone, PartialEq, DekuRead, DekuWrite, Default)]
#[deku(endian = "big")]
pub struct DtCons {
    pub address_length: u16,
    pub cep_id_length: u16,
    pub ctrl_seq_num_length: u16,
    pub dif_integrity: bool,
    pub frame_length: u16,
    pub length_length: u16,
    pub max_pdu_life: u32,
    pub max_pdu_size: u32,
    pub max_sdu_size: u32,
    pub port_id_length: u16,
    pub qos_id_length: u16,
    pub rate_length: u16,
    pub seq_num_length: u16,
    pub seq_rollover_thres: u32,
    pub max_time_to_ack: u32,
    pub max_time_to_keep_ret: u32,
    pub dif_frag: bool,
    pub dif_concat: bool,
}

/// A named QoS cube: the scalar flow characteristics it guarantees plus
/// the DTP/DTCP policy configuration an allocated flow of this cube runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QosCube {
    pub id: u16,
    pub avg_bw: u32,
    pub avg_sdu_bw: u32,
    pub peak_bw_duration: u32,
    pub peak_sdu_bw_duration: u32,
    pub partial_delivery: bool,
    pub ordered_delivery: bool,
    pub max_allowed_gap: i32,
    pub delay: u32,
    pub jitter: u32,
    pub loss: u16,
    pub name: String,
    pub dtpc: DtpConfig,
    pub dtcpc: DtcpConfig,
}

impl WireCodec for QosCube {
    fn wire_len(&self) -> usize {
        2 + 4 + 4 + 4 + 4 + 1 + 1 + 4 + 4 + 4 + 2
            + self.name.wire_len()
            + self.dtpc.wire_len()
            + self.dtcpc.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.id.encode(out)?;
        self.avg_bw.encode(out)?;
        self.avg_sdu_bw.encode(out)?;
        self.peak_bw_duration.encode(out)?;
        self.peak_sdu_bw_duration.encode(out)?;
        self.partial_delivery.encode(out)?;
        self.ordered_delivery.encode(out)?;
        self.max_allowed_gap.encode(out)?;
        self.delay.encode(out)?;
        self.jitter.encode(out)?;
        self.loss.encode(out)?;
        self.name.encode(out)?;
        self.dtpc.encode(out)?;
        self.dtcpc.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(QosCube {
            id: u16::decode(input)?,
            avg_bw: u32::decode(input)?,
            avg_sdu_bw: u32::decode(input)?,
            peak_bw_duration: u32::decode(input)?,
            peak_sdu_bw_duration: u32::decode(input)?,
            partial_delivery: bool::decode(input)?,
            ordered_delivery: bool::decode(input)?,
            max_allowed_gap: i32::decode(input)?,
            delay: u32::decode(input)?,
            jitter: u32::decode(input)?,
            loss: u16::decode(input)?,
            name: String::decode(input)?,
            dtpc: DtpConfig::decode(input)?,
            dtcpc: DtcpConfig::decode(input)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dt_cons_roundtrip() {
        let dtc = DtCons {
            address_length: 4,
            cep_id_length: 2,
            ctrl_seq_num_length: 4,
            dif_integrity: false,
            frame_length: 0,
            length_length: 2,
            max_pdu_life: 60000,
            max_pdu_size: 0,
            max_sdu_size: 0,
            port_id_length: 2,
            qos_id_length: 1,
            rate_length: 4,
            seq_num_length: 4,
            seq_rollover_thres: u32::MAX,
            max_time_to_ack: 100,
            max_time_to_keep_ret: 100,
            dif_frag: true,
            dif_concat: true,
        };
        let bytes = dtc.to_bytes().unwrap();
        let (_, decoded) = DtCons::from_bytes((&bytes, 0)).unwrap();
        assert_eq!(decoded, dtc);
    }
}
