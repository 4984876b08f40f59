/*!
  Per-message-shape payload structs.

  The original C source reused one struct across several `msg_type`
  values whenever their post-envelope shape coincided (a generic
  `(result, port_id, cep_id)` triple acks a dozen different request
  kinds, for instance). This module keeps that reuse one-for-one: each
  struct here backs every [`super::MessageType`] that shared its C
  struct, rather than inventing a distinct Rust type per ordinal.

  Every struct implements [`crate::codec::WireCodec`] exactly like the
  sub-object types in [`crate::codec`] — a payload is just another
  composite, its fields either scalars or sub-objects in declaration
  order. There is no separate "message body" trait.
*/
use crate::codec::crypto::SdupCryptoState;
use crate::codec::dif_config::DifConfig;
use crate::codec::dif_properties::GetDifPropResp;
use crate::codec::dtcp::DtcpConfig;
use crate::codec::dtp::DtpConfig;
use crate::codec::flow_spec::FlowSpec;
use crate::codec::media::MediaReport;
use crate::codec::name::Name;
use crate::codec::neighbor::IpcpNeighborList;
use crate::codec::pff::PffEntryList;
use crate::codec::rib::QueryRibResp;
use crate::codec::{CodecError, WireCodec};

/// No payload beyond the envelope (`RMT_DUMP_FT_REQUEST`,
/// `IPCM_FINALIZE_REQUEST`, `IPCM_SCAN_MEDIA_REQUEST`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Empty;

impl WireCodec for Empty {
    fn wire_len(&self) -> usize {
        0
    }

    fn encode(&self, _out: &mut Vec<u8>) -> Result<(), CodecError> {
        Ok(())
    }

    fn decode(_input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(Empty)
    }
}

/// A single `result` code. Backs the large family of bare acks
/// (`irati_msg_base_resp` in the original).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BaseResp {
    pub result: i8,
}

impl WireCodec for BaseResp {
    fn wire_len(&self) -> usize {
        1
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.result.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(BaseResp {
            result: i8::decode(input)?,
        })
    }
}

/// `(result, port_id, cep_id)` triple shared by a dozen flow/connection
/// acks (`irati_kmsg_multi_msg`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MultiMsg {
    pub result: i8,
    pub port_id: u32,
    pub cep_id: u32,
}

impl WireCodec for MultiMsg {
    fn wire_len(&self) -> usize {
        1 + 4 + 4
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.result.encode(out)?;
        self.port_id.encode(out)?;
        self.cep_id.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(MultiMsg {
            result: i8::decode(input)?,
            port_id: u32::decode(input)?,
            cep_id: u32::decode(input)?,
        })
    }
}

/// `RINA_C_IPCM_ASSIGN_TO_DIF_REQUEST`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssignToDifRequest {
    pub dif_name: Name,
    pub dif_type: String,
    pub dif_config: DifConfig,
}

impl WireCodec for AssignToDifRequest {
    fn wire_len(&self) -> usize {
        self.dif_name.wire_len() + self.dif_type.wire_len() + self.dif_config.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.dif_name.encode(out)?;
        self.dif_type.encode(out)?;
        self.dif_config.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(AssignToDifRequest {
            dif_name: Name::decode(input)?,
            dif_type: String::decode(input)?,
            dif_config: DifConfig::decode(input)?,
        })
    }
}

/// `RINA_C_IPCM_UPDATE_DIF_CONFIG_REQUEST`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateDifConfigRequest {
    pub dif_config: DifConfig,
}

impl WireCodec for UpdateDifConfigRequest {
    fn wire_len(&self) -> usize {
        self.dif_config.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.dif_config.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(UpdateDifConfigRequest {
            dif_config: DifConfig::decode(input)?,
        })
    }
}

/// DIF (un)registration notification: `(is_registered, ipcp_name, dif_name)`.
/// Shared by `IPC_PROCESS_DIF_REGISTRATION_NOTIFICATION` and its
/// unregistration counterpart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DifRegNot {
    pub is_registered: bool,
    pub ipcp_name: Name,
    pub dif_name: Name,
}

impl WireCodec for DifRegNot {
    fn wire_len(&self) -> usize {
        1 + self.ipcp_name.wire_len() + self.dif_name.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.is_registered.encode(out)?;
        self.ipcp_name.encode(out)?;
        self.dif_name.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(DifRegNot {
            is_registered: bool::decode(input)?,
            ipcp_name: Name::decode(input)?,
            dif_name: Name::decode(input)?,
        })
    }
}

/// Flow allocation request shape shared by the kernel-side and
/// application-side allocate-flow ordinals alike
/// (`irati_kmsg_ipcm_allocate_flow`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AllocateFlowReq {
    pub port_id: u32,
    pub pid: i32,
    pub local: Name,
    pub remote: Name,
    pub dif_name: Name,
    pub fspec: FlowSpec,
}

impl WireCodec for AllocateFlowReq {
    fn wire_len(&self) -> usize {
        4 + 4
            + self.local.wire_len()
            + self.remote.wire_len()
            + self.dif_name.wire_len()
            + self.fspec.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.port_id.encode(out)?;
        self.pid.encode(out)?;
        self.local.encode(out)?;
        self.remote.encode(out)?;
        self.dif_name.encode(out)?;
        self.fspec.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(AllocateFlowReq {
            port_id: u32::decode(input)?,
            pid: i32::decode(input)?,
            local: Name::decode(input)?,
            remote: Name::decode(input)?,
            dif_name: Name::decode(input)?,
            fspec: FlowSpec::decode(input)?,
        })
    }
}

/// `RINA_C_IPCM_ALLOCATE_FLOW_RESPONSE`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AllocateFlowResp {
    pub result: i8,
    pub notify_src: bool,
    pub id: u32,
}

impl WireCodec for AllocateFlowResp {
    fn wire_len(&self) -> usize {
        1 + 1 + 4
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.result.encode(out)?;
        self.notify_src.encode(out)?;
        self.id.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(AllocateFlowResp {
            result: i8::decode(input)?,
            notify_src: bool::decode(input)?,
            id: u32::decode(input)?,
        })
    }
}

/// `RINA_C_IPCM_REGISTER_APPLICATION_REQUEST`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegisterAppReq {
    pub reg_ipcp_id: u16,
    pub app_name: Name,
    pub daf_name: Name,
    pub dif_name: Name,
}

impl WireCodec for RegisterAppReq {
    fn wire_len(&self) -> usize {
        2 + self.app_name.wire_len() + self.daf_name.wire_len() + self.dif_name.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.reg_ipcp_id.encode(out)?;
        self.app_name.encode(out)?;
        self.daf_name.encode(out)?;
        self.dif_name.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(RegisterAppReq {
            reg_ipcp_id: u16::decode(input)?,
            app_name: Name::decode(input)?,
            daf_name: Name::decode(input)?,
            dif_name: Name::decode(input)?,
        })
    }
}

/// `(app_name, dif_name)` pair. Used by `UNREGISTER_APPLICATION_REQUEST`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnregisterAppReq {
    pub app_name: Name,
    pub dif_name: Name,
}

impl WireCodec for UnregisterAppReq {
    fn wire_len(&self) -> usize {
        self.app_name.wire_len() + self.dif_name.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.app_name.encode(out)?;
        self.dif_name.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(UnregisterAppReq {
            app_name: Name::decode(input)?,
            dif_name: Name::decode(input)?,
        })
    }
}

/// `RINA_C_IPCM_QUERY_RIB_REQUEST`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryRibReq {
    pub object_instance: u64,
    pub scope: u32,
    pub filter: String,
    pub object_class: String,
    pub object_name: String,
}

impl WireCodec for QueryRibReq {
    fn wire_len(&self) -> usize {
        8 + 4 + self.filter.wire_len() + self.object_class.wire_len() + self.object_name.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.object_instance.encode(out)?;
        self.scope.encode(out)?;
        self.filter.encode(out)?;
        self.object_class.encode(out)?;
        self.object_name.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(QueryRibReq {
            object_instance: u64::decode(input)?,
            scope: u32::decode(input)?,
            filter: String::decode(input)?,
            object_class: String::decode(input)?,
            object_name: String::decode(input)?,
        })
    }
}

/// `RINA_C_IPCM_QUERY_RIB_RESPONSE`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryRibResponse {
    pub result: i8,
    pub rib_entries: QueryRibResp,
}

impl WireCodec for QueryRibResponse {
    fn wire_len(&self) -> usize {
        1 + self.rib_entries.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.result.encode(out)?;
        self.rib_entries.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(QueryRibResponse {
            result: i8::decode(input)?,
            rib_entries: QueryRibResp::decode(input)?,
        })
    }
}

/// PDU-forwarding-table dump/modify: `(result, mode, entries)`
/// (`irati_kmsg_rmt_dump_ft`), shared by the FTE-modify request and the
/// dump reply.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FtDump {
    pub result: i8,
    pub mode: u8,
    pub pft_entries: PffEntryList,
}

impl WireCodec for FtDump {
    fn wire_len(&self) -> usize {
        1 + 1 + self.pft_entries.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.result.encode(out)?;
        self.mode.encode(out)?;
        self.pft_entries.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(FtDump {
            result: i8::decode(input)?,
            mode: u8::decode(input)?,
            pft_entries: PffEntryList::decode(input)?,
        })
    }
}

/// EFCP connection creation, kernel- or user-space-initiated
/// (`irati_kmsg_ipcp_conn_create_arrived`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConnCreateArrived {
    pub port_id: u32,
    pub src_addr: u32,
    pub dst_addr: u32,
    pub dst_cep: u32,
    pub src_cep: u32,
    pub qos_id: u8,
    pub flow_user_ipcp_id: u16,
    pub dtp_cfg: DtpConfig,
    pub dtcp_cfg: DtcpConfig,
}

impl WireCodec for ConnCreateArrived {
    fn wire_len(&self) -> usize {
        4 + 4 + 4 + 4 + 4 + 1 + 2 + self.dtp_cfg.wire_len() + self.dtcp_cfg.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.port_id.encode(out)?;
        self.src_addr.encode(out)?;
        self.dst_addr.encode(out)?;
        self.dst_cep.encode(out)?;
        self.src_cep.encode(out)?;
        self.qos_id.encode(out)?;
        self.flow_user_ipcp_id.encode(out)?;
        self.dtp_cfg.encode(out)?;
        self.dtcp_cfg.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(ConnCreateArrived {
            port_id: u32::decode(input)?,
            src_addr: u32::decode(input)?,
            dst_addr: u32::decode(input)?,
            dst_cep: u32::decode(input)?,
            src_cep: u32::decode(input)?,
            qos_id: u8::decode(input)?,
            flow_user_ipcp_id: u16::decode(input)?,
            dtp_cfg: DtpConfig::decode(input)?,
            dtcp_cfg: DtcpConfig::decode(input)?,
        })
    }
}

/// EFCP connection update/result ack: `(port_id, src_cep, dst_cep,
/// src_addr, dest_addr)` (`irati_kmsg_ipcp_conn_update`), shared by the
/// create-response, create-result, update-request and modify-request
/// ordinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnUpdate {
    pub port_id: u32,
    pub src_cep: u32,
    pub dst_cep: u32,
    pub src_addr: u32,
    pub dest_addr: u32,
}

impl WireCodec for ConnUpdate {
    fn wire_len(&self) -> usize {
        4 * 5
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.port_id.encode(out)?;
        self.src_cep.encode(out)?;
        self.dst_cep.encode(out)?;
        self.src_addr.encode(out)?;
        self.dest_addr.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(ConnUpdate {
            port_id: u32::decode(input)?,
            src_cep: u32::decode(input)?,
            dst_cep: u32::decode(input)?,
            src_addr: u32::decode(input)?,
            dest_addr: u32::decode(input)?,
        })
    }
}

/// `RINA_C_IPCP_SET_POLICY_SET_PARAM_REQUEST`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectPsParam {
    pub path: String,
    pub name: String,
    pub value: String,
}

impl WireCodec for SelectPsParam {
    fn wire_len(&self) -> usize {
        self.path.wire_len() + self.name.wire_len() + self.value.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.path.encode(out)?;
        self.name.encode(out)?;
        self.value.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(SelectPsParam {
            path: String::decode(input)?,
            name: String::decode(input)?,
            value: String::decode(input)?,
        })
    }
}

/// `RINA_C_IPCP_SELECT_POLICY_SET_REQUEST`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectPs {
    pub path: String,
    pub name: String,
}

impl WireCodec for SelectPs {
    fn wire_len(&self) -> usize {
        self.path.wire_len() + self.name.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.path.encode(out)?;
        self.name.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(SelectPs {
            path: String::decode(input)?,
            name: String::decode(input)?,
        })
    }
}

/// `RINA_C_IPCP_UPDATE_CRYPTO_STATE_REQUEST`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateCryptoStateReq {
    pub port_id: u32,
    pub state: SdupCryptoState,
}

impl WireCodec for UpdateCryptoStateReq {
    fn wire_len(&self) -> usize {
        4 + self.state.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.port_id.encode(out)?;
        self.state.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(UpdateCryptoStateReq {
            port_id: u32::decode(input)?,
            state: SdupCryptoState::decode(input)?,
        })
    }
}

/// `RINA_C_IPCP_ADDRESS_CHANGE_REQUEST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddressChange {
    pub new_address: u32,
    pub old_address: u32,
    pub use_new_timeout: u32,
    pub deprecate_old_timeout: u32,
}

impl WireCodec for AddressChange {
    fn wire_len(&self) -> usize {
        4 * 4
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.new_address.encode(out)?;
        self.old_address.encode(out)?;
        self.use_new_timeout.encode(out)?;
        self.deprecate_old_timeout.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(AddressChange {
            new_address: u32::decode(input)?,
            old_address: u32::decode(input)?,
            use_new_timeout: u32::decode(input)?,
            deprecate_old_timeout: u32::decode(input)?,
        })
    }
}

/// `RINA_C_IPCP_ALLOCATE_PORT_REQUEST`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AllocatePortReq {
    pub msg_boundaries: bool,
    pub app_name: Name,
}

impl WireCodec for AllocatePortReq {
    fn wire_len(&self) -> usize {
        1 + self.app_name.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.msg_boundaries.encode(out)?;
        self.app_name.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(AllocatePortReq {
            msg_boundaries: bool::decode(input)?,
            app_name: Name::decode(input)?,
        })
    }
}

/// Management SDU tunneled between the data path and user space:
/// `(port_id, sdu)` (`irati_kmsg_ipcp_mgmt_sdu`). See
/// [`crate::mgmt`] for the worker that constructs the read-notification
/// variant off the receive path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MgmtSdu {
    pub port_id: u32,
    pub sdu: Option<Vec<u8>>,
}

impl WireCodec for MgmtSdu {
    fn wire_len(&self) -> usize {
        4 + self.sdu.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.port_id.encode(out)?;
        self.sdu.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(MgmtSdu {
            port_id: u32::decode(input)?,
            sdu: Option::<Vec<u8>>::decode(input)?,
        })
    }
}

/// `RINA_C_IPCM_CREATE_IPCP_REQUEST`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateIpcpReq {
    pub ipcp_id: u16,
    pub irati_port_id: u32,
    pub ipcp_name: Name,
    pub dif_type: String,
}

impl WireCodec for CreateIpcpReq {
    fn wire_len(&self) -> usize {
        2 + 4 + self.ipcp_name.wire_len() + self.dif_type.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.ipcp_id.encode(out)?;
        self.irati_port_id.encode(out)?;
        self.ipcp_name.encode(out)?;
        self.dif_type.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(CreateIpcpReq {
            ipcp_id: u16::decode(input)?,
            irati_port_id: u32::decode(input)?,
            ipcp_name: Name::decode(input)?,
            dif_type: String::decode(input)?,
        })
    }
}

/// `RINA_C_IPCM_DESTROY_IPCP_REQUEST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DestroyIpcpReq {
    pub ipcp_id: u16,
}

impl WireCodec for DestroyIpcpReq {
    fn wire_len(&self) -> usize {
        2
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.ipcp_id.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(DestroyIpcpReq {
            ipcp_id: u16::decode(input)?,
        })
    }
}

/// `RINA_C_IPCM_ENROLL_TO_DIF_REQUEST`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnrollToDifReq {
    pub prepare_for_handover: bool,
    pub dif_name: Name,
    pub sup_dif_name: Name,
    pub neigh_name: Name,
    pub disc_neigh_name: Name,
}

impl WireCodec for EnrollToDifReq {
    fn wire_len(&self) -> usize {
        1 + self.dif_name.wire_len()
            + self.sup_dif_name.wire_len()
            + self.neigh_name.wire_len()
            + self.disc_neigh_name.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.prepare_for_handover.encode(out)?;
        self.dif_name.encode(out)?;
        self.sup_dif_name.encode(out)?;
        self.neigh_name.encode(out)?;
        self.disc_neigh_name.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(EnrollToDifReq {
            prepare_for_handover: bool::decode(input)?,
            dif_name: Name::decode(input)?,
            sup_dif_name: Name::decode(input)?,
            neigh_name: Name::decode(input)?,
            disc_neigh_name: Name::decode(input)?,
        })
    }
}

/// `RINA_C_IPCM_ENROLL_TO_DIF_RESPONSE`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnrollToDifResp {
    pub result: i8,
    pub dif_name: Name,
    pub dif_type: String,
    pub dif_config: DifConfig,
    pub neighbors: IpcpNeighborList,
}

impl WireCodec for EnrollToDifResp {
    fn wire_len(&self) -> usize {
        1 + self.dif_name.wire_len()
            + self.dif_type.wire_len()
            + self.dif_config.wire_len()
            + self.neighbors.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.result.encode(out)?;
        self.dif_name.encode(out)?;
        self.dif_type.encode(out)?;
        self.dif_config.encode(out)?;
        self.neighbors.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(EnrollToDifResp {
            result: i8::decode(input)?,
            dif_name: Name::decode(input)?,
            dif_type: String::decode(input)?,
            dif_config: DifConfig::decode(input)?,
            neighbors: IpcpNeighborList::decode(input)?,
        })
    }
}

/// A single `struct name` and nothing else (`irati_msg_with_name`).
/// Used by the disconnect-from-neighbor request and the
/// IPC-process-initialized notification.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WithName {
    pub name: Name,
}

impl WireCodec for WithName {
    fn wire_len(&self) -> usize {
        self.name.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.name.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(WithName {
            name: Name::decode(input)?,
        })
    }
}

/// `RINA_C_APP_ALLOCATE_FLOW_REQUEST_RESULT`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppAllocFlowResult {
    pub port_id: u32,
    pub source_app_name: Name,
    pub dif_name: Name,
    pub error_desc: String,
}

impl WireCodec for AppAllocFlowResult {
    fn wire_len(&self) -> usize {
        4 + self.source_app_name.wire_len() + self.dif_name.wire_len() + self.error_desc.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.port_id.encode(out)?;
        self.source_app_name.encode(out)?;
        self.dif_name.encode(out)?;
        self.error_desc.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(AppAllocFlowResult {
            port_id: u32::decode(input)?,
            source_app_name: Name::decode(input)?,
            dif_name: Name::decode(input)?,
            error_desc: String::decode(input)?,
        })
    }
}

/// `RINA_C_APP_ALLOCATE_FLOW_RESPONSE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppAllocFlowResponse {
    pub result: i8,
    pub not_source: bool,
    pub pid: i32,
}

impl WireCodec for AppAllocFlowResponse {
    fn wire_len(&self) -> usize {
        1 + 1 + 4
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.result.encode(out)?;
        self.not_source.encode(out)?;
        self.pid.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(AppAllocFlowResponse {
            result: i8::decode(input)?,
            not_source: bool::decode(input)?,
            pid: i32::decode(input)?,
        })
    }
}

/// `(result, port_id)`. Shared by the application deallocate-flow
/// request and its unsolicited notification counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppDeallocFlow {
    pub result: i8,
    pub port_id: u32,
}

impl WireCodec for AppDeallocFlow {
    fn wire_len(&self) -> usize {
        1 + 4
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.result.encode(out)?;
        self.port_id.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(AppDeallocFlow {
            result: i8::decode(input)?,
            port_id: u32::decode(input)?,
        })
    }
}

/// `RINA_C_APP_REGISTER_APPLICATION_REQUEST`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppRegApp {
    pub ipcp_id: u16,
    pub fa_ctrl_port: u32,
    pub reg_type: u8,
    pub pid: i32,
    pub app_name: Name,
    pub daf_name: Name,
    pub dif_name: Name,
}

impl WireCodec for AppRegApp {
    fn wire_len(&self) -> usize {
        2 + 4
            + 1
            + 4
            + self.app_name.wire_len()
            + self.daf_name.wire_len()
            + self.dif_name.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.ipcp_id.encode(out)?;
        self.fa_ctrl_port.encode(out)?;
        self.reg_type.encode(out)?;
        self.pid.encode(out)?;
        self.app_name.encode(out)?;
        self.daf_name.encode(out)?;
        self.dif_name.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(AppRegApp {
            ipcp_id: u16::decode(input)?,
            fa_ctrl_port: u32::decode(input)?,
            reg_type: u8::decode(input)?,
            pid: i32::decode(input)?,
            app_name: Name::decode(input)?,
            daf_name: Name::decode(input)?,
            dif_name: Name::decode(input)?,
        })
    }
}

/// `(result, app_name, dif_name)` (`irati_msg_app_reg_app_resp`). Shared
/// by the (un)registration responses/requests and the get-DIF-properties
/// request, which all happen to reuse this exact shape in the original.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppRegAppResp {
    pub result: i8,
    pub app_name: Name,
    pub dif_name: Name,
}

impl WireCodec for AppRegAppResp {
    fn wire_len(&self) -> usize {
        1 + self.app_name.wire_len() + self.dif_name.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.result.encode(out)?;
        self.app_name.encode(out)?;
        self.dif_name.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(AppRegAppResp {
            result: i8::decode(input)?,
            app_name: Name::decode(input)?,
            dif_name: Name::decode(input)?,
        })
    }
}

/// `RINA_C_APP_APPLICATION_REGISTRATION_CANCELED_NOTIFICATION`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppRegCancel {
    pub code: i8,
    pub app_name: Name,
    pub dif_name: Name,
    pub reason: String,
}

impl WireCodec for AppRegCancel {
    fn wire_len(&self) -> usize {
        1 + self.app_name.wire_len() + self.dif_name.wire_len() + self.reason.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.code.encode(out)?;
        self.app_name.encode(out)?;
        self.dif_name.encode(out)?;
        self.reason.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(AppRegCancel {
            code: i8::decode(input)?,
            app_name: Name::decode(input)?,
            dif_name: Name::decode(input)?,
            reason: String::decode(input)?,
        })
    }
}

/// `RINA_C_APP_GET_DIF_PROPERTIES_RESPONSE`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetDifProp {
    pub code: i8,
    pub app_name: Name,
    pub dif_name: Name,
    pub dif_props: GetDifPropResp,
}

impl WireCodec for GetDifProp {
    fn wire_len(&self) -> usize {
        1 + self.app_name.wire_len() + self.dif_name.wire_len() + self.dif_props.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.code.encode(out)?;
        self.app_name.encode(out)?;
        self.dif_name.encode(out)?;
        self.dif_props.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(GetDifProp {
            code: i8::decode(input)?,
            app_name: Name::decode(input)?,
            dif_name: Name::decode(input)?,
            dif_props: GetDifPropResp::decode(input)?,
        })
    }
}

/// `RINA_C_IPCM_PLUGIN_LOAD_REQUEST`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PluginLoad {
    pub load: bool,
    pub plugin_name: String,
}

impl WireCodec for PluginLoad {
    fn wire_len(&self) -> usize {
        1 + self.plugin_name.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.load.encode(out)?;
        self.plugin_name.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(PluginLoad {
            load: bool::decode(input)?,
            plugin_name: String::decode(input)?,
        })
    }
}

/// CDAP message forwarded between the IPC Manager and an IPCP:
/// `(result, cdap_msg)`. Shared by the forward-CDAP request and
/// response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FwdCdapMsg {
    pub result: i8,
    pub cdap_msg: Option<Vec<u8>>,
}

impl WireCodec for FwdCdapMsg {
    fn wire_len(&self) -> usize {
        1 + self.cdap_msg.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.result.encode(out)?;
        self.cdap_msg.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(FwdCdapMsg {
            result: i8::decode(input)?,
            cdap_msg: Option::<Vec<u8>>::decode(input)?,
        })
    }
}

/// `RINA_C_IPCM_MEDIA_REPORT`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MediaReportMsg {
    pub report: MediaReport,
}

impl WireCodec for MediaReportMsg {
    fn wire_len(&self) -> usize {
        self.report.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.report.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(MediaReportMsg {
            report: MediaReport::decode(input)?,
        })
    }
}
