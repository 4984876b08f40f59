/*!
  Wireless media scan reports: what a media-aware IPCP discovers when
  asked to scan for base stations and candidate DIFs.
*/
use super::{CodecError, WireCodec};

/// One candidate base-station IPCP found during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BsInfoEntry {
    pub signal_strength: i32,
    pub ipcp_addr: String,
}

impl WireCodec for BsInfoEntry {
    fn wire_len(&self) -> usize {
        4 + self.ipcp_addr.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.signal_strength.encode(out)?;
        self.ipcp_addr.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(BsInfoEntry {
            signal_strength: i32::decode(input)?,
            ipcp_addr: String::decode(input)?,
        })
    }
}

/// One DIF reachable through the scanned medium, and the base stations
/// offering it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaDifInfo {
    pub dif_name: String,
    pub sec_policies: String,
    pub available_bs_ipcps: Vec<BsInfoEntry>,
}

impl WireCodec for MediaDifInfo {
    fn wire_len(&self) -> usize {
        self.dif_name.wire_len() + self.sec_policies.wire_len() + self.available_bs_ipcps.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.dif_name.encode(out)?;
        self.sec_policies.encode(out)?;
        self.available_bs_ipcps.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(MediaDifInfo {
            dif_name: String::decode(input)?,
            sec_policies: String::decode(input)?,
            available_bs_ipcps: Vec::<BsInfoEntry>::decode(input)?,
        })
    }
}

/// A single `(dif_name, info)` pair inside a [`MediaReport`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaInfoEntry {
    pub dif_name: String,
    pub info: MediaDifInfo,
}

impl WireCodec for MediaInfoEntry {
    fn wire_len(&self) -> usize {
        self.dif_name.wire_len() + self.info.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.dif_name.encode(out)?;
        self.info.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(MediaInfoEntry {
            dif_name: String::decode(input)?,
            info: MediaDifInfo::decode(input)?,
        })
    }
}

/// The full result of a media scan: the scanning IPCP's identity plus
/// every DIF it found reachable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaReport {
    pub ipcp_id: u16,
    pub dif_name: String,
    pub bs_ipcp_addr: String,
    pub available_difs: Vec<MediaInfoEntry>,
}

impl WireCodec for MediaReport {
    fn wire_len(&self) -> usize {
        2 + self.dif_name.wire_len() + self.bs_ipcp_addr.wire_len() + self.available_difs.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.ipcp_id.encode(out)?;
        self.dif_name.encode(out)?;
        self.bs_ipcp_addr.encode(out)?;
        self.available_difs.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(MediaReport {
            ipcp_id: u16::decode(input)?,
            dif_name: String::decode(input)?,
            bs_ipcp_addr: String::decode(input)?,
            available_difs: Vec::<MediaInfoEntry>::decode(input)?,
        })
    }
}
