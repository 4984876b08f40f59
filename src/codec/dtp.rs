/*!
  DTP (Data Transfer Protocol) configuration.
*/
use super::policy::Policy;
use super::{CodecError, WireCodec};

/// Per-connection DTP policy configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DtpConfig {
    pub dtcp_present: bool,
    pub seq_num_ro_th: i32,
    pub initial_a_timer: u32,
    pub partial_delivery: bool,
    pub incomplete_delivery: bool,
    pub in_order_delivery: bool,
    pub max_sdu_gap: u32,
    pub dtp_ps: Policy,
}

impl WireCodec for DtpConfig {
    fn wire_len(&self) -> usize {
        1 + 4 + 4 + 1 + 1 + 1 + 4 + self.dtp_ps.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.dtcp_present.encode(out)?;
        self.seq_num_ro_th.encode(out)?;
        self.initial_a_timer.encode(out)?;
        self.partial_delivery.encode(out)?;
        self.incomplete_delivery.encode(out)?;
        self.in_order_delivery.encode(out)?;
        self.max_sdu_gap.encode(out)?;
        self.dtp_ps.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(DtpConfig {
            dtcp_present: bool::decode(input)?,
            seq_num_ro_th: i32::decode(input)?,
            initial_a_timer: u32::decode(input)?,
            partial_delivery: bool::decode(input)?,
            incomplete_delivery: bool::decode(input)?,
            in_order_delivery: bool::decode(input)?,
            max_sdu_gap: u32::decode(input)?,
            dtp_ps: Policy::decode(input)?,
        })
    }
}
