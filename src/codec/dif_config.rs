/*!
  DIF-wide configuration tree.

  This module holds everything a `dif_config` sub-object composes:
  addressing, security, routing and resource-allocation policy sets, and
  the RMT/PFF policy configuration. The nesting and field order here
  follow the original `dif_config` serializer exactly, since the wire
  format has no self-describing tags to recover the structure from.
*/
use super::policy::Policy;
use super::{CodecError, WireCodec};

/// A single `name = value` configuration entry attached to an IPCP.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IpcpConfigEntry {
    pub name: String,
    pub value: String,
}

impl WireCodec for IpcpConfigEntry {
    fn wire_len(&self) -> usize {
        self.name.wire_len() + self.value.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.name.encode(out)?;
        self.value.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(IpcpConfigEntry {
            name: String::decode(input)?,
            value: String::decode(input)?,
        })
    }
}

/// PDU Forwarding Function policy set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PffConfig {
    pub policy_set: Policy,
}

impl WireCodec for PffConfig {
    fn wire_len(&self) -> usize {
        self.policy_set.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.policy_set.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(PffConfig {
            policy_set: Policy::decode(input)?,
        })
    }
}

/// Relaying and Multiplexing task configuration: its own policy set plus
/// the PFF policy set it drives.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RmtConfig {
    pub policy_set: Policy,
    pub pff_conf: PffConfig,
}

impl WireCodec for RmtConfig {
    fn wire_len(&self) -> usize {
        self.policy_set.wire_len() + self.pff_conf.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.policy_set.encode(out)?;
        self.pff_conf.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(RmtConfig {
            policy_set: Policy::decode(input)?,
            pff_conf: PffConfig::decode(input)?,
        })
    }
}

/// Flow allocator configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FaConfig {
    pub max_create_flow_retries: u32,
    pub allocate_notify: Policy,
    pub allocate_retry: Policy,
    pub new_flow_req: Policy,
    pub ps: Policy,
    pub seq_roll_over: Policy,
}

impl WireCodec for FaConfig {
    fn wire_len(&self) -> usize {
        4 + self.allocate_notify.wire_len()
            + self.allocate_retry.wire_len()
            + self.new_flow_req.wire_len()
            + self.ps.wire_len()
            + self.seq_roll_over.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.max_create_flow_retries.encode(out)?;
        self.allocate_notify.encode(out)?;
        self.allocate_retry.encode(out)?;
        self.new_flow_req.encode(out)?;
        self.ps.encode(out)?;
        self.seq_roll_over.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(FaConfig {
            max_create_flow_retries: u32::decode(input)?,
            allocate_notify: Policy::decode(input)?,
            allocate_retry: Policy::decode(input)?,
            new_flow_req: Policy::decode(input)?,
            ps: Policy::decode(input)?,
            seq_roll_over: Policy::decode(input)?,
        })
    }
}

/// Resource allocator configuration: just a PFF-generator policy set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResallConfig {
    pub pff_gen: Policy,
}

impl WireCodec for ResallConfig {
    fn wire_len(&self) -> usize {
        self.pff_gen.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.pff_gen.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(ResallConfig {
            pff_gen: Policy::decode(input)?,
        })
    }
}

/// Enrollment task configuration: just its policy set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EtConfig {
    pub ps: Policy,
}

impl WireCodec for EtConfig {
    fn wire_len(&self) -> usize {
        self.ps.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.ps.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(EtConfig {
            ps: Policy::decode(input)?,
        })
    }
}

/// A fixed address reserved for a named application process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StaticIpcpAddr {
    pub address: u32,
    pub ap_name: String,
    pub ap_instance: String,
}

impl WireCodec for StaticIpcpAddr {
    fn wire_len(&self) -> usize {
        4 + self.ap_name.wire_len() + self.ap_instance.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.address.encode(out)?;
        self.ap_name.encode(out)?;
        self.ap_instance.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(StaticIpcpAddr {
            address: u32::decode(input)?,
            ap_name: String::decode(input)?,
            ap_instance: String::decode(input)?,
        })
    }
}

/// The address prefix reserved for a given organization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressPrefConfig {
    pub prefix: u32,
    pub org: String,
}

impl WireCodec for AddressPrefConfig {
    fn wire_len(&self) -> usize {
        4 + self.org.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.prefix.encode(out)?;
        self.org.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(AddressPrefConfig {
            prefix: u32::decode(input)?,
            org: String::decode(input)?,
        })
    }
}

/// Static address reservations plus per-organization address prefixes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AddressingConfig {
    pub static_ipcp_addrs: Vec<StaticIpcpAddr>,
    pub address_prefixes: Vec<AddressPrefConfig>,
}

impl WireCodec for AddressingConfig {
    fn wire_len(&self) -> usize {
        self.static_ipcp_addrs.wire_len() + self.address_prefixes.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.static_ipcp_addrs.encode(out)?;
        self.address_prefixes.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(AddressingConfig {
            static_ipcp_addrs: Vec::<StaticIpcpAddr>::decode(input)?,
            address_prefixes: Vec::<AddressPrefConfig>::decode(input)?,
        })
    }
}

/// Namespace manager configuration: its policy set plus the addressing
/// table it hands out addresses from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NsmConfig {
    pub ps: Policy,
    pub addr_conf: AddressingConfig,
}

impl WireCodec for NsmConfig {
    fn wire_len(&self) -> usize {
        self.ps.wire_len() + self.addr_conf.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.ps.encode(out)?;
        self.addr_conf.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(NsmConfig {
            ps: Policy::decode(input)?,
            addr_conf: AddressingConfig::decode(input)?,
        })
    }
}

/// Routing task configuration: just its policy set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoutingConfig {
    pub ps: Policy,
}

impl WireCodec for RoutingConfig {
    fn wire_len(&self) -> usize {
        self.ps.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.ps.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(RoutingConfig {
            ps: Policy::decode(input)?,
        })
    }
}

/// The auth/encrypt/CRC/TTL policy bundle SDU Protection runs for one
/// N-1 DIF.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthSdupProfile {
    pub auth: Policy,
    pub encrypt: Policy,
    pub crc: Policy,
    pub ttl: Policy,
}

impl WireCodec for AuthSdupProfile {
    fn wire_len(&self) -> usize {
        self.auth.wire_len() + self.encrypt.wire_len() + self.crc.wire_len() + self.ttl.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.auth.encode(out)?;
        self.encrypt.encode(out)?;
        self.crc.encode(out)?;
        self.ttl.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(AuthSdupProfile {
            auth: Policy::decode(input)?,
            encrypt: Policy::decode(input)?,
            crc: Policy::decode(input)?,
            ttl: Policy::decode(input)?,
        })
    }
}

/// A per-N-1-DIF SDU Protection override.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct N1DifSdupProfile {
    pub n1_dif_name: String,
    pub profile: AuthSdupProfile,
}

impl WireCodec for N1DifSdupProfile {
    fn wire_len(&self) -> usize {
        self.n1_dif_name.wire_len() + self.profile.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.n1_dif_name.encode(out)?;
        self.profile.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(N1DifSdupProfile {
            n1_dif_name: String::decode(input)?,
            profile: AuthSdupProfile::decode(input)?,
        })
    }
}

/// Security Manager configuration: its policy set, the default SDU
/// Protection profile, and any per-N-1-DIF overrides.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SecmanConfig {
    pub ps: Policy,
    pub default_profile: AuthSdupProfile,
    pub specific_profiles: Vec<N1DifSdupProfile>,
}

impl WireCodec for SecmanConfig {
    fn wire_len(&self) -> usize {
        self.ps.wire_len() + self.default_profile.wire_len() + self.specific_profiles.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.ps.encode(out)?;
        self.default_profile.encode(out)?;
        self.specific_profiles.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(SecmanConfig {
            ps: Policy::decode(input)?,
            default_profile: AuthSdupProfile::decode(input)?,
            specific_profiles: Vec::<N1DifSdupProfile>::decode(input)?,
        })
    }
}

/// The full configuration a DIF is assigned or updated with: its
/// address, free-form config entries, and exactly one each of the
/// per-task policy trees, in the fixed order the original serializer
/// wrote them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DifConfig {
    pub address: u32,
    pub parameters: Vec<IpcpConfigEntry>,
    pub efcp_config: super::efcp::EfcpConfig,
    pub rmt_config: RmtConfig,
    pub fa_config: FaConfig,
    pub et_config: EtConfig,
    pub nsm_config: NsmConfig,
    pub routing_config: RoutingConfig,
    pub resall_config: ResallConfig,
    pub secman_config: SecmanConfig,
}

impl WireCodec for DifConfig {
    fn wire_len(&self) -> usize {
        4 + self.parameters.wire_len()
            + self.efcp_config.wire_len()
            + self.rmt_config.wire_len()
            + self.fa_config.wire_len()
            + self.et_config.wire_len()
            + self.nsm_config.wire_len()
            + self.routing_config.wire_len()
            + self.resall_config.wire_len()
            + self.secman_config.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.address.encode(out)?;
        self.parameters.encode(out)?;
        self.efcp_config.encode(out)?;
        self.rmt_config.encode(out)?;
        self.fa_config.encode(out)?;
        self.et_config.encode(out)?;
        self.nsm_config.encode(out)?;
        self.routing_config.encode(out)?;
        self.resall_config.encode(out)?;
        self.secman_config.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(DifConfig {
            address: u32::decode(input)?,
            parameters: Vec::<IpcpConfigEntry>::decode(input)?,
            efcp_config: super::efcp::EfcpConfig::decode(input)?,
            rmt_config: RmtConfig::decode(input)?,
            fa_config: FaConfig::decode(input)?,
            et_config: EtConfig::decode(input)?,
            nsm_config: NsmConfig::decode(input)?,
            routing_config: RoutingConfig::decode(input)?,
            resall_config: ResallConfig::decode(input)?,
            secman_config: SecmanConfig::decode(input)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dif_config_roundtrip() {
        let cfg = DifConfig {
            address: 42,
            parameters: vec![IpcpConfigEntry {
                name: "k".into(),
                value: "v".into(),
            }],
            ..Default::default()
        };
        let mut buf = Vec::new();
        cfg.encode(&mut buf).unwrap();
        assert_eq!(cfg.wire_len(), buf.len());

        let mut rest = &buf[..];
        let decoded = DifConfig::decode(&mut rest).unwrap();
        assert_eq!(decoded, cfg);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_addressing_config_empty_lists() {
        let ac = AddressingConfig::default();
        let mut buf = Vec::new();
        ac.encode(&mut buf).unwrap();
        assert_eq!(buf, vec![0, 0, 0, 0]);
    }
}
