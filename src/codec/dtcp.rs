/*!
  DTCP (Data Transfer Control Protocol) configuration.

  `DtcpConfig` carries the two conditionally-present sub-configs
  (`WindowFctrlConfig`, `RateFctrlConfig`) exactly the way the original
  serializer did: the `flow_ctrl`/`rtx_ctrl` flags are written first and
  the corresponding sub-config is read back only when its flag was set,
  so the wire presence of `fctrl_cfg`/`rxctrl_cfg` tracks those booleans
  rather than `Option`-ness of the buffer itself.
*/
use super::policy::Policy;
use super::{CodecError, WireCodec};

/// Window-based flow control tuning.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowFctrlConfig {
    pub initial_credit: u32,
    pub max_closed_winq_length: u32,
    pub rcvr_flow_control: Policy,
    pub tx_control: Policy,
}

impl WireCodec for WindowFctrlConfig {
    fn wire_len(&self) -> usize {
        4 + 4 + self.rcvr_flow_control.wire_len() + self.tx_control.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.initial_credit.encode(out)?;
        self.max_closed_winq_length.encode(out)?;
        self.rcvr_flow_control.encode(out)?;
        self.tx_control.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(WindowFctrlConfig {
            initial_credit: u32::decode(input)?,
            max_closed_winq_length: u32::decode(input)?,
            rcvr_flow_control: Policy::decode(input)?,
            tx_control: Policy::decode(input)?,
        })
    }
}

/// Rate-based flow control tuning.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RateFctrlConfig {
    pub sending_rate: u32,
    pub time_period: u32,
    pub no_override_default_peak: Policy,
    pub no_rate_slow_down: Policy,
    pub rate_reduction: Policy,
}

impl WireCodec for RateFctrlConfig {
    fn wire_len(&self) -> usize {
        4 + 4
            + self.no_override_default_peak.wire_len()
            + self.no_rate_slow_down.wire_len()
            + self.rate_reduction.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.sending_rate.encode(out)?;
        self.time_period.encode(out)?;
        self.no_override_default_peak.encode(out)?;
        self.no_rate_slow_down.encode(out)?;
        self.rate_reduction.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(RateFctrlConfig {
            sending_rate: u32::decode(input)?,
            time_period: u32::decode(input)?,
            no_override_default_peak: Policy::decode(input)?,
            no_rate_slow_down: Policy::decode(input)?,
            rate_reduction: Policy::decode(input)?,
        })
    }
}

/// Flow-control policy set plus the one sub-config relevant to whichever
/// of window-based or rate-based control is active.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DtcpFctrlConfig {
    pub rcvd_buffers_th: u32,
    pub rcvd_bytes_percent_th: u32,
    pub rcvd_bytes_th: u32,
    pub sent_buffers_th: u32,
    pub sent_bytes_percent_th: u32,
    pub sent_bytes_th: u32,
    pub window_based_fctrl: bool,
    pub rate_based_fctrl: bool,
    pub closed_window: Policy,
    pub receiving_flow_control: Policy,
    pub reconcile_flow_conflict: Policy,
    pub flow_control_overrun: Policy,
    pub window_fctrl_cfg: Option<WindowFctrlConfig>,
    pub rate_fctrl_cfg: Option<RateFctrlConfig>,
}

impl WireCodec for DtcpFctrlConfig {
    fn wire_len(&self) -> usize {
        let mut n = 4 * 6
            + 1
            + 1
            + self.closed_window.wire_len()
            + self.receiving_flow_control.wire_len()
            + self.reconcile_flow_conflict.wire_len()
            + self.flow_control_overrun.wire_len();
        if self.window_based_fctrl {
            if let Some(w) = &self.window_fctrl_cfg {
                n += w.wire_len();
            }
        }
        if self.rate_based_fctrl {
            if let Some(r) = &self.rate_fctrl_cfg {
                n += r.wire_len();
            }
        }
        n
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.rcvd_buffers_th.encode(out)?;
        self.rcvd_bytes_percent_th.encode(out)?;
        self.rcvd_bytes_th.encode(out)?;
        self.sent_buffers_th.encode(out)?;
        self.sent_bytes_percent_th.encode(out)?;
        self.sent_bytes_th.encode(out)?;
        self.window_based_fctrl.encode(out)?;
        self.rate_based_fctrl.encode(out)?;
        self.closed_window.encode(out)?;
        self.receiving_flow_control.encode(out)?;
        self.reconcile_flow_conflict.encode(out)?;
        self.flow_control_overrun.encode(out)?;
        if self.window_based_fctrl {
            if let Some(w) = &self.window_fctrl_cfg {
                w.encode(out)?;
            }
        }
        if self.rate_based_fctrl {
            if let Some(r) = &self.rate_fctrl_cfg {
                r.encode(out)?;
            }
        }
        Ok(())
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let rcvd_buffers_th = u32::decode(input)?;
        let rcvd_bytes_percent_th = u32::decode(input)?;
        let rcvd_bytes_th = u32::decode(input)?;
        let sent_buffers_th = u32::decode(input)?;
        let sent_bytes_percent_th = u32::decode(input)?;
        let sent_bytes_th = u32::decode(input)?;
        let window_based_fctrl = bool::decode(input)?;
        let rate_based_fctrl = bool::decode(input)?;
        let closed_window = Policy::decode(input)?;
        let receiving_flow_control = Policy::decode(input)?;
        let reconcile_flow_conflict = Policy::decode(input)?;
        let flow_control_overrun = Policy::decode(input)?;
        let window_fctrl_cfg = if window_based_fctrl {
            Some(WindowFctrlConfig::decode(input)?)
        } else {
            None
        };
        let rate_fctrl_cfg = if rate_based_fctrl {
            Some(RateFctrlConfig::decode(input)?)
        } else {
            None
        };
        Ok(DtcpFctrlConfig {
            rcvd_buffers_th,
            rcvd_bytes_percent_th,
            rcvd_bytes_th,
            sent_buffers_th,
            sent_bytes_percent_th,
            sent_bytes_th,
            window_based_fctrl,
            rate_based_fctrl,
            closed_window,
            receiving_flow_control,
            reconcile_flow_conflict,
            flow_control_overrun,
            window_fctrl_cfg,
            rate_fctrl_cfg,
        })
    }
}

/// Retransmission control tuning.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DtcpRxctrlConfig {
    pub data_retransmit_max: u32,
    pub initial_tr: u32,
    pub max_time_retry: u32,
    pub rcvr_ack: Policy,
    pub rcvr_control_ack: Policy,
    pub receiving_ack_list: Policy,
    pub retransmission_timer_expiry: Policy,
    pub sender_ack: Policy,
    pub sending_ack: Policy,
}

impl WireCodec for DtcpRxctrlConfig {
    fn wire_len(&self) -> usize {
        4 * 3
            + self.rcvr_ack.wire_len()
            + self.rcvr_control_ack.wire_len()
            + self.receiving_ack_list.wire_len()
            + self.retransmission_timer_expiry.wire_len()
            + self.sender_ack.wire_len()
            + self.sending_ack.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.data_retransmit_max.encode(out)?;
        self.initial_tr.encode(out)?;
        self.max_time_retry.encode(out)?;
        self.rcvr_ack.encode(out)?;
        self.rcvr_control_ack.encode(out)?;
        self.receiving_ack_list.encode(out)?;
        self.retransmission_timer_expiry.encode(out)?;
        self.sender_ack.encode(out)?;
        self.sending_ack.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(DtcpRxctrlConfig {
            data_retransmit_max: u32::decode(input)?,
            initial_tr: u32::decode(input)?,
            max_time_retry: u32::decode(input)?,
            rcvr_ack: Policy::decode(input)?,
            rcvr_control_ack: Policy::decode(input)?,
            receiving_ack_list: Policy::decode(input)?,
            retransmission_timer_expiry: Policy::decode(input)?,
            sender_ack: Policy::decode(input)?,
            sending_ack: Policy::decode(input)?,
        })
    }
}

/// Top-level DTCP configuration for a connection: whether flow control
/// and/or retransmission control are active, plus their sub-configs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DtcpConfig {
    pub flow_ctrl: bool,
    pub rtx_ctrl: bool,
    pub dtcp_ps: Policy,
    pub lost_control_pdu: Policy,
    pub rtt_estimator: Policy,
    pub fctrl_cfg: Option<DtcpFctrlConfig>,
    pub rxctrl_cfg: Option<DtcpRxctrlConfig>,
}

impl WireCodec for DtcpConfig {
    fn wire_len(&self) -> usize {
        let mut n = 1
            + 1
            + self.dtcp_ps.wire_len()
            + self.lost_control_pdu.wire_len()
            + self.rtt_estimator.wire_len();
        if self.flow_ctrl {
            if let Some(f) = &self.fctrl_cfg {
                n += f.wire_len();
            }
        }
        if self.rtx_ctrl {
            if let Some(r) = &self.rxctrl_cfg {
                n += r.wire_len();
            }
        }
        n
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.flow_ctrl.encode(out)?;
        self.rtx_ctrl.encode(out)?;
        self.dtcp_ps.encode(out)?;
        self.lost_control_pdu.encode(out)?;
        self.rtt_estimator.encode(out)?;
        if self.flow_ctrl {
            if let Some(f) = &self.fctrl_cfg {
                f.encode(out)?;
            }
        }
        if self.rtx_ctrl {
            if let Some(r) = &self.rxctrl_cfg {
                r.encode(out)?;
            }
        }
        Ok(())
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let flow_ctrl = bool::decode(input)?;
        let rtx_ctrl = bool::decode(input)?;
        let dtcp_ps = Policy::decode(input)?;
        let lost_control_pdu = Policy::decode(input)?;
        let rtt_estimator = Policy::decode(input)?;
        let fctrl_cfg = if flow_ctrl {
            Some(DtcpFctrlConfig::decode(input)?)
        } else {
            None
        };
        let rxctrl_cfg = if rtx_ctrl {
            Some(DtcpRxctrlConfig::decode(input)?)
        } else {
            None
        };
        Ok(DtcpConfig {
            flow_ctrl,
            rtx_ctrl,
            dtcp_ps,
            lost_control_pdu,
            rtt_estimator,
            fctrl_cfg,
            rxctrl_cfg,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtcp_config_flags_off_skip_subconfigs() {
        let cfg = DtcpConfig {
            flow_ctrl: false,
            rtx_ctrl: false,
            ..Default::default()
        };
        let mut buf = Vec::new();
        cfg.encode(&mut buf).unwrap();
        assert_eq!(cfg.wire_len(), buf.len());

        let mut rest = &buf[..];
        let decoded = DtcpConfig::decode(&mut rest).unwrap();
        assert_eq!(decoded, cfg);
        assert!(decoded.fctrl_cfg.is_none());
        assert!(decoded.rxctrl_cfg.is_none());
        assert!(rest.is_empty());
    }

    #[test]
    fn test_wire_len_ignores_stale_subconfig_when_flag_false() {
        // A `Some(..)` sub-config alongside a `false` presence flag must
        // not be counted: `wire_len` has to agree with what `encode`
        // actually writes, not with whether the `Option` happens to be
        // populated.
        let cfg = DtcpConfig {
            flow_ctrl: false,
            rtx_ctrl: false,
            fctrl_cfg: Some(DtcpFctrlConfig {
                window_based_fctrl: false,
                rate_based_fctrl: false,
                window_fctrl_cfg: Some(WindowFctrlConfig::default()),
                rate_fctrl_cfg: Some(RateFctrlConfig::default()),
                ..Default::default()
            }),
            rxctrl_cfg: Some(DtcpRxctrlConfig::default()),
            ..Default::default()
        };
        let mut buf = Vec::new();
        cfg.encode(&mut buf).unwrap();
        assert_eq!(cfg.wire_len(), buf.len());
    }

    #[test]
    fn test_dtcp_config_with_window_fctrl() {
        let cfg = DtcpConfig {
            flow_ctrl: true,
            rtx_ctrl: false,
            fctrl_cfg: Some(DtcpFctrlConfig {
                window_based_fctrl: true,
                rate_based_fctrl: false,
                window_fctrl_cfg: Some(WindowFctrlConfig {
                    initial_credit: 100,
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        let mut buf = Vec::new();
        cfg.encode(&mut buf).unwrap();

        let mut rest = &buf[..];
        let decoded = DtcpConfig::decode(&mut rest).unwrap();
        assert_eq!(decoded, cfg);
        assert!(rest.is_empty());
    }
}
