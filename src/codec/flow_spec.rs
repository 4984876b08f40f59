/*!
  Flow QoS specification.

  Every field is a fixed-width scalar, so this is one of the handful of
  sub-objects represented with `deku`'s derive macros rather than a hand
  written [`super::WireCodec`] impl. A thin [`super::WireCodec`] impl wraps
  the `deku` codec so `FlowSpec` can sit alongside the hand-written
  sub-objects inside a message payload without the message walker needing
  to special-case it.
*/
use deku::prelude::*;

use super::{CodecError, WireCodec};

/// Requested or negotiated flow characteristics.
#[derive(Debug, Clone, PartialEq, DekuRead, DekuWrite, Default)]
#[deku(endian = "big")]
pub struct FlowSpec {
    pub average_bandwidth: u32,
    pub average_sdu_bandwidth: u32,
    pub delay: u32,
    pub jitter: u32,
    pub loss: u16,
    pub max_allowable_gap: i32,
    pub max_sdu_size: u32,
    pub ordered_delivery: bool,
    pub partial_delivery: bool,
    pub peak_bandwidth_duration: u32,
    pub peak_sdu_bandwidth_duration: u32,
    pub undetected_bit_error_rate: i32,
    pub msg_boundaries: bool,
}

impl WireCodec for FlowSpec {
    fn wire_len(&self) -> usize {
        self.to_bytes().map(|b| b.len()).unwrap_or(0)
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        out.extend_from_slice(
            &self
                .to_bytes()
                .map_err(|_| CodecError::AllocFailed("flow_spec".into()))?,
        );
        Ok(())
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let ((rest, _bit_offset), fspec) = FlowSpec::from_bytes((input, 0))
            .map_err(|_| CodecError::AllocFailed("flow_spec".into()))?;
        *input = rest;
        Ok(fspec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_spec_roundtrip() {
        let spec = FlowSpec {
            average_bandwidth: 1000,
            average_sdu_bandwidth: 1000,
            delay: 0,
            jitter: 0,
            loss: 0,
            max_allowable_gap: -1,
            max_sdu_size: 1500,
            ordered_delivery: true,
            partial_delivery: false,
            peak_bandwidth_duration: 0,
            peak_sdu_bandwidth_duration: 0,
            undetected_bit_error_rate: 0,
            msg_boundaries: true,
        };

        let bytes = spec.to_bytes().unwrap();
        let (_, decoded) = FlowSpec::from_bytes((&bytes, 0)).unwrap();
        assert_eq!(decoded, spec);
    }
}
