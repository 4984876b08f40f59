/*!
  Management-SDU side channel.

  One message pair (`IPCM_IPCP_MANAGEMENT_SDU_WRITE_REQUEST` /
  `IPCM_IPCP_MANAGEMENT_SDU_READ_NOTIF`) tunnels data-plane PDUs between
  the kernel IPCP and a user-space daemon endpoint. The receive direction
  is the one place in this crate that deliberately leaves the caller's
  thread: the spec requires the kernel not to run arbitrary user code
  (the notification enqueue, here, is cheap, but the contract is general)
  under whatever lock protects the data path, so inbound PDUs are handed
  to a small fixed worker pool instead of being enqueued inline.

  The send direction has no such constraint — it reuses [`Core::submit`]
  directly — but it does need the small framing header the original
  source prepends before handing a management SDU down to the IPCP
  (`pdu_type`, addresses, `qos_id`). That header's *consumer*, the lower
  IPCP, is one of the out-of-scope external collaborators this crate only
  exposes a contract to ([`LowerIpcp`]); nothing about flow allocation,
  EFCP, or RMT is implemented here.
*/
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::codec::WireCodec;
use crate::message::payload::MgmtSdu;
use crate::message::{Envelope, Message, MessageBody};

use super::{Core, DeviceError, KERNEL_PORT};

/// PDU type tag the original source stamps on a management SDU before
/// handing it to the lower IPCP, distinguishing it from ordinary
/// data-transfer PDUs at that layer.
pub const MANAGEMENT_PDU_TYPE: u8 = 0x40;

/// The fixed QoS id the source hardcodes for management traffic: "qos =
/// 1" per the spec's description of the send-side encapsulation.
pub const MANAGEMENT_QOS_ID: u8 = 1;

/// The small header prepended to a management SDU's payload before it
/// crosses into the lower IPCP. Fixed-width, scalar-only — no variable
/// parts, so it reuses [`WireCodec`] the same way the sub-object scalar
/// types do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagementPduHeader {
    pub pdu_type: u8,
    pub src_addr: u32,
    pub dst_addr: u32,
    pub qos_id: u8,
}

impl ManagementPduHeader {
    /// Build a header for an SDU flowing from `src_addr` to `dst_addr`,
    /// with the fixed management PDU type and QoS id.
    pub fn new(src_addr: u32, dst_addr: u32) -> Self {
        ManagementPduHeader {
            pdu_type: MANAGEMENT_PDU_TYPE,
            src_addr,
            dst_addr,
            qos_id: MANAGEMENT_QOS_ID,
        }
    }
}

impl WireCodec for ManagementPduHeader {
    fn wire_len(&self) -> usize {
        1 + 4 + 4 + 1
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), crate::codec::CodecError> {
        self.pdu_type.encode(out)?;
        self.src_addr.encode(out)?;
        self.dst_addr.encode(out)?;
        self.qos_id.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, crate::codec::CodecError> {
        Ok(ManagementPduHeader {
            pdu_type: u8::decode(input)?,
            src_addr: u32::decode(input)?,
            dst_addr: u32::decode(input)?,
            qos_id: u8::decode(input)?,
        })
    }
}

/// Contract exposed by the lower IPCP that actually owns the wire: send
/// one framed management SDU down the data path. The out-of-scope
/// behavioral modules (RMT, EFCP, SDU protection) are what would
/// implement this in a complete daemon; this crate only defines the
/// seam.
pub trait LowerIpcp: Send + Sync {
    /// Hand one framed management SDU to the lower IPCP for transmission.
    fn send_management_pdu(
        &self,
        header: ManagementPduHeader,
        payload: &[u8],
    ) -> Result<(), DeviceError>;
}

/// Encapsulate `payload` with `header` and hand it to `lower`. This is
/// the send-side half of §4.4: "the send direction reuses the normal
/// write contract and additionally encapsulates the SDU with a small
/// framing header ... before handing it to the lower IPCP."
pub fn send_management_sdu(
    lower: &dyn LowerIpcp,
    header: ManagementPduHeader,
    payload: &[u8],
) -> Result<(), DeviceError> {
    lower.send_management_pdu(header, payload)
}

struct ReceiveTask {
    core: Arc<Core>,
    dst_port: u32,
    src_ipcp_id: u16,
    payload: Vec<u8>,
}

impl ReceiveTask {
    fn run(self) {
        let message = Message {
            envelope: Envelope {
                src_port: KERNEL_PORT,
                dst_port: self.dst_port,
                src_ipcp_id: self.src_ipcp_id,
                dst_ipcp_id: 0,
                event_id: 0,
            },
            body: MessageBody::IpcpManagementSduReadNotif(MgmtSdu {
                port_id: self.dst_port,
                sdu: Some(self.payload),
            }),
        };
        let mut buf = Vec::with_capacity(message.wire_len());
        if message.encode(&mut buf).is_ok() {
            // A stale or missing endpoint is not this worker's problem to
            // report anywhere further: the originating kernel call site
            // has already returned, and the daemon that should have been
            // listening on `dst_port` simply never gets its notification.
            let _ = self.core.submit(buf);
        }
    }
}

/// A small fixed pool of threads that perform the management-SDU receive
/// path (§4.4) off the caller's thread, so a kernel-side PDU arrival
/// never blocks on a user-space wakeup. Each queued PDU is turned into an
/// `IPCM_IPCP_MANAGEMENT_SDU_READ_NOTIF` and handed to
/// [`Core::submit`], exactly the path an ordinary `write` to the control
/// device would take.
pub struct ManagementWorkerPool {
    sender: mpsc::Sender<ReceiveTask>,
    workers: Vec<JoinHandle<()>>,
}

impl ManagementWorkerPool {
    /// Spawn `workers` worker threads sharing one task queue.
    pub fn new(workers: usize) -> Self {
        let (sender, receiver) = mpsc::channel::<ReceiveTask>();
        let receiver = Arc::new(Mutex::new(receiver));
        let handles = (0..workers.max(1))
            .map(|_| {
                let receiver = receiver.clone();
                thread::spawn(move || loop {
                    let task = receiver.lock().unwrap().recv();
                    match task {
                        Ok(task) => task.run(),
                        Err(_) => break,
                    }
                })
            })
            .collect();
        ManagementWorkerPool {
            sender,
            workers: handles,
        }
    }

    /// Hand one inbound PDU to the pool. Returns immediately; the
    /// notification is enqueued on `dst_port` asynchronously.
    pub fn dispatch(
        &self,
        core: Arc<Core>,
        dst_port: u32,
        src_ipcp_id: u16,
        payload: Vec<u8>,
    ) -> Result<(), DeviceError> {
        self.sender
            .send(ReceiveTask {
                core,
                dst_port,
                src_ipcp_id,
                payload,
            })
            .map_err(|_| DeviceError::Closed)
    }
}

impl Drop for ManagementWorkerPool {
    fn drop(&mut self) {
        // Dropping `sender` unblocks every worker's `recv()` with an
        // `Err`, which is the loop's exit condition above.
        let (dummy, _rx) = mpsc::channel();
        let sender = std::mem::replace(&mut self.sender, dummy);
        drop(sender);
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{ReadMode, ReadOutcome};
    use std::time::Duration;

    struct RecordingSink {
        sent: Mutex<Vec<(ManagementPduHeader, Vec<u8>)>>,
    }

    impl LowerIpcp for RecordingSink {
        fn send_management_pdu(
            &self,
            header: ManagementPduHeader,
            payload: &[u8],
        ) -> Result<(), DeviceError> {
            self.sent
                .lock()
                .unwrap()
                .push((header, payload.to_vec()));
            Ok(())
        }
    }

    #[test]
    fn test_header_roundtrip() {
        let header = ManagementPduHeader::new(10, 20);
        let mut buf = Vec::new();
        header.encode(&mut buf).unwrap();
        assert_eq!(header.wire_len(), buf.len());

        let mut rest = &buf[..];
        let decoded = ManagementPduHeader::decode(&mut rest).unwrap();
        assert_eq!(decoded, header);
        assert_eq!(decoded.qos_id, MANAGEMENT_QOS_ID);
        assert_eq!(decoded.pdu_type, MANAGEMENT_PDU_TYPE);
    }

    #[test]
    fn test_send_management_sdu_reaches_lower_ipcp() {
        let sink = RecordingSink {
            sent: Mutex::new(Vec::new()),
        };
        let header = ManagementPduHeader::new(1, 2);
        send_management_sdu(&sink, header, &[0xDE, 0xAD]).unwrap();

        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, header);
        assert_eq!(sent[0].1, vec![0xDE, 0xAD]);
    }

    #[test]
    fn test_worker_pool_delivers_notification_to_endpoint() {
        let core = Arc::new(Core::new());
        let endpoint = core.open();
        core.bind(&endpoint, 77).unwrap();

        let pool = ManagementWorkerPool::new(2);
        pool.dispatch(core.clone(), 77, 3, vec![1, 2, 3, 4]).unwrap();

        let mut attempts = 0;
        let outcome = loop {
            match endpoint.read(4096, ReadMode::NonBlocking) {
                Ok(outcome) => break outcome,
                Err(DeviceError::WouldBlock) if attempts < 50 => {
                    attempts += 1;
                    thread::sleep(Duration::from_millis(10));
                }
                Err(e) => panic!("unexpected error: {:?}", e),
            }
        };

        match outcome {
            ReadOutcome::Frame(bytes) => {
                let mut rest = &bytes[..];
                let message = Message::decode(&mut rest).unwrap();
                match message.body {
                    MessageBody::IpcpManagementSduReadNotif(sdu) => {
                        assert_eq!(sdu.port_id, 77);
                        assert_eq!(sdu.sdu, Some(vec![1, 2, 3, 4]));
                    }
                    other => panic!("wrong body: {:?}", other),
                }
            }
            other => panic!("expected a frame, got {:?}", other),
        }
    }
}
