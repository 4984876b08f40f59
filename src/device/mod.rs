/*!
  Control device multiplexer.

  The source exposed one control device per open file descriptor: an
  `ioctl` bound it to a logical port, `write` either handed a frame to an
  in-kernel handler (port 0) or enqueued it on whatever endpoint owned the
  frame's destination port, and `read`/`poll` drained the endpoint's own
  queue. This module is that model turned into ordinary Rust: the global
  registry and per-endpoint queue are plain [`std::sync`] primitives
  instead of a kernel spinlock plus a wait queue, and "file operations"
  are inherent methods on [`Core`] and [`Endpoint`] rather than a
  `file_operations` vtable. See `DESIGN.md` for the lock-ordering
  rationale (registry lock before queue lock, never the reverse).
*/
pub mod error;
pub mod management;

pub use error::DeviceError;

use std::collections::VecDeque;
use std::convert::TryInto;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};

use hashbrown::HashMap;

use crate::codec::{CodecError, WireCodec};
use crate::message::{Message, MessageType};

/// Port 0 is never bound by a client; frames addressed to it are
/// dispatched to the in-process handler table instead of a peer queue.
pub const KERNEL_PORT: u32 = 0;

/// The port reserved, by convention, for the designated IPC-Manager
/// endpoint. Releasing the endpoint bound to this port is logged as a
/// warning (§7 of the spec this crate implements).
pub const MANAGER_PORT: u32 = 1;

/// Minimum frame size for the kernel-dispatch path to read a destination
/// port out of the envelope: 2-byte type ordinal, 4-byte src_port, 4-byte
/// dst_port.
const MIN_ROUTABLE_LEN: usize = 2 + 4 + 4;

/// A boxed handler invoked synchronously, in the writer's own thread, for
/// every kernel-bound (`dst_port == 0`) frame whose decoded message type
/// matches the registered ordinal. Handlers run with no multiplexer lock
/// held, so they may freely call back into [`Core`].
pub type Handler = dyn Fn(Message) -> Result<(), DeviceError> + Send + Sync;

/// Opaque identity for an open endpoint, distinct from the port it may or
/// may not currently be bound to. Assigned once, at [`Core::open`], and
/// never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointId(u64);

struct Registry {
    endpoints: HashMap<EndpointId, Arc<Endpoint>>,
    ports: HashMap<u32, EndpointId>,
}

impl Registry {
    fn new() -> Self {
        Registry {
            endpoints: HashMap::new(),
            ports: HashMap::new(),
        }
    }
}

/// What a `read(len == 0)` vs. `read(len > 0)` call returns, matching the
/// two call shapes in §4.3: a bare length probe, or an actual frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The caller passed a zero-length buffer: this is the byte length of
    /// the head frame, and the queue was not disturbed.
    Length(usize),
    /// The caller's buffer was large enough; here is the dequeued frame.
    Frame(Vec<u8>),
}

/// Whether a blocking read should sleep on an empty queue or fail
/// immediately with [`DeviceError::WouldBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Sleep until a frame arrives, the endpoint closes, or the read is
    /// interrupted.
    Blocking,
    /// Fail immediately if the queue is empty.
    NonBlocking,
}

/// Read/write readiness, as reported by `poll`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollReady {
    /// The queue has at least one frame waiting.
    pub read: bool,
    /// Always `true`: there is no send-side queue to fill up (§4.3).
    pub write: bool,
}

struct EndpointState {
    port: Option<u32>,
    flushed: bool,
    interrupted: bool,
    /// `None` once the endpoint has been released; frames already queued
    /// are dropped with it. Swapping this to `None` under the queue lock
    /// is the Rust equivalent of the source's atomic FIFO-pointer swap.
    queue: Option<VecDeque<Vec<u8>>>,
}

/// One open control-device file handle: `OPEN → BOUND → (FLUSHED)? →
/// CLOSED` (§4.5). Readers block on `wait`; writers elsewhere in the
/// process enqueue directly onto `state.queue` and notify it.
pub struct Endpoint {
    id: EndpointId,
    state: Mutex<EndpointState>,
    wait: Condvar,
}

impl Endpoint {
    fn new(id: EndpointId) -> Self {
        Endpoint {
            id,
            state: Mutex::new(EndpointState {
                port: None,
                flushed: false,
                interrupted: false,
                queue: Some(VecDeque::new()),
            }),
            wait: Condvar::new(),
        }
    }

    /// This endpoint's stable identity (not its port, which may be unset
    /// or change across a flush-then-rebind).
    pub fn id(&self) -> EndpointId {
        self.id
    }

    /// The port currently bound to this endpoint, if any.
    pub fn port(&self) -> Option<u32> {
        self.state.lock().unwrap().port
    }

    /// Whether `flush` has been called and `release` has not.
    pub fn is_flushed(&self) -> bool {
        self.state.lock().unwrap().flushed
    }

    fn enqueue(&self, frame: Vec<u8>, capacity: Option<usize>) -> Result<(), DeviceError> {
        {
            let mut state = self.state.lock().unwrap();
            let queue = state.queue.as_mut().ok_or(DeviceError::Closed)?;
            if let Some(cap) = capacity {
                if queue.len() >= cap {
                    return Err(DeviceError::QueueFull);
                }
            }
            queue.push_back(frame);
        }
        self.wait.notify_all();
        Ok(())
    }

    /// Submit one frame for routing. This is the per-endpoint half of the
    /// `write` file operation; the routing decision itself (peer queue vs.
    /// kernel handler) lives on [`Core::submit`], since the target may be
    /// a completely different endpoint than `self`.
    pub fn write(&self, core: &Core, frame: Vec<u8>) -> Result<(), DeviceError> {
        if self.state.lock().unwrap().queue.is_none() {
            return Err(DeviceError::Closed);
        }
        core.submit(frame)
    }

    /// Read at most one frame. `len == 0` probes the head frame's length
    /// without dequeuing it; any other `len` dequeues only if the frame
    /// fits.
    pub fn read(&self, len: usize, mode: ReadMode) -> Result<ReadOutcome, DeviceError> {
        let mut state = self.state.lock().unwrap();
        loop {
            if state.queue.is_none() {
                return Err(DeviceError::Closed);
            }
            if state.interrupted {
                state.interrupted = false;
                return Err(DeviceError::Interrupted);
            }
            let front_len = state.queue.as_ref().unwrap().front().map(Vec::len);
            if let Some(front_len) = front_len {
                if len == 0 {
                    return Ok(ReadOutcome::Length(front_len));
                }
                if front_len > len {
                    return Err(DeviceError::BufferTooSmall);
                }
                let frame = state.queue.as_mut().unwrap().pop_front().unwrap();
                return Ok(ReadOutcome::Frame(frame));
            }
            match mode {
                ReadMode::NonBlocking => return Err(DeviceError::WouldBlock),
                ReadMode::Blocking => {
                    state = self.wait.wait(state).unwrap();
                }
            }
        }
    }

    /// Wake a blocked reader with [`DeviceError::Interrupted`] without
    /// closing the endpoint. Modeled on a signal delivery racing a
    /// blocking read; see design note on cancellation in §5.
    pub fn interrupt(&self) {
        let mut state = self.state.lock().unwrap();
        state.interrupted = true;
        drop(state);
        self.wait.notify_all();
    }

    /// Read-ready iff the queue is non-empty; write is always ready.
    pub fn poll(&self) -> PollReady {
        let state = self.state.lock().unwrap();
        let read = matches!(&state.queue, Some(q) if !q.is_empty());
        PollReady { read, write: true }
    }

    /// Mark this endpoint flushed: its port becomes eligible to be
    /// shadowed by a fresh `bind` elsewhere, but the endpoint itself stays
    /// open and readable until `release`.
    pub fn flush(&self) -> Result<(), DeviceError> {
        let mut state = self.state.lock().unwrap();
        if state.port.is_none() {
            return Err(DeviceError::NotBound);
        }
        state.flushed = true;
        Ok(())
    }

    /// Detach from the registry, drop the queue (freeing any frames still
    /// in it), and wake any blocked reader so it observes the closed
    /// state. If this endpoint was bound to [`MANAGER_PORT`], log a
    /// warning: the spec calls this out as the one place a close has an
    /// observable side effect beyond the endpoint itself.
    pub fn release(self: &Arc<Self>, core: &Core) {
        {
            let mut registry = core.registry.lock().unwrap();
            registry.endpoints.remove(&self.id);
            let port = self.state.lock().unwrap().port;
            if let Some(port) = port {
                if registry.ports.get(&port) == Some(&self.id) {
                    registry.ports.remove(&port);
                }
            }
        }
        let port = {
            let mut state = self.state.lock().unwrap();
            let _dropped = state.queue.take();
            state.interrupted = false;
            state.port
        };
        self.wait.notify_all();
        if port == Some(MANAGER_PORT) {
            log::warn!("designated IPC-Manager endpoint released");
        }
    }
}

/// The process-wide multiplexer state: the endpoint registry, the
/// port→endpoint index, the kernel-bound handler table, and the
/// event-id sequence counter. Constructed once at startup and handed to
/// every device `open` the way the source passed a module-global through
/// the file's private data (§9).
pub struct Core {
    registry: Mutex<Registry>,
    handlers: Mutex<HashMap<u16, Arc<Handler>>>,
    sequence: AtomicU32,
    next_id: AtomicU64,
    capacity: Option<usize>,
}

impl Default for Core {
    fn default() -> Self {
        Self::new()
    }
}

impl Core {
    /// An unbounded-queue core: the spec's default (§5, "the queue is
    /// unbounded in this specification").
    pub fn new() -> Self {
        Self::with_capacity(None)
    }

    /// A core whose per-endpoint queues reject further writes once they
    /// hold `capacity` frames, per the optional high-water mark §5 leaves
    /// as an implementation choice. `None` means unbounded.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Core {
            registry: Mutex::new(Registry::new()),
            handlers: Mutex::new(HashMap::new()),
            sequence: AtomicU32::new(0),
            next_id: AtomicU64::new(0),
            capacity,
        }
    }

    /// Allocate a new, unbound endpoint and register it.
    pub fn open(&self) -> Arc<Endpoint> {
        let id = EndpointId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let endpoint = Arc::new(Endpoint::new(id));
        self.registry
            .lock()
            .unwrap()
            .endpoints
            .insert(id, endpoint.clone());
        endpoint
    }

    /// Bind `endpoint` to `port`. Fails if the port is the reserved
    /// kernel port, if `endpoint` is already bound, or if another open,
    /// unflushed endpoint already owns the port.
    pub fn bind(&self, endpoint: &Arc<Endpoint>, port: u32) -> Result<(), DeviceError> {
        if port == KERNEL_PORT {
            return Err(DeviceError::BadPort);
        }
        let mut registry = self.registry.lock().unwrap();
        if endpoint.state.lock().unwrap().port.is_some() {
            return Err(DeviceError::AlreadyBound);
        }
        if let Some(holder_id) = registry.ports.get(&port).copied() {
            if holder_id != endpoint.id {
                let shadow = registry
                    .endpoints
                    .get(&holder_id)
                    .map(|holder| holder.state.lock().unwrap().flushed)
                    .unwrap_or(true);
                if !shadow {
                    return Err(DeviceError::PortInUse);
                }
            }
        }
        registry.ports.insert(port, endpoint.id);
        endpoint.state.lock().unwrap().port = Some(port);
        Ok(())
    }

    /// Route one fully-serialized frame: to the peer endpoint bound to
    /// its destination port, or — if that port is [`KERNEL_PORT`] — to
    /// the handler registered for its decoded message type.
    pub fn submit(&self, frame: Vec<u8>) -> Result<(), DeviceError> {
        if frame.len() < MIN_ROUTABLE_LEN {
            return Err(DeviceError::InvalidArgument);
        }
        let dst_port = u32::from_be_bytes(frame[6..10].try_into().unwrap());
        if dst_port != KERNEL_PORT {
            let target = {
                let registry = self.registry.lock().unwrap();
                registry
                    .ports
                    .get(&dst_port)
                    .and_then(|id| registry.endpoints.get(id).cloned())
            };
            let target = target.ok_or(DeviceError::PortNotFound)?;
            return target.enqueue(frame, self.capacity);
        }

        let mut cursor = &frame[..];
        let message = Message::decode(&mut cursor)?;
        if !cursor.is_empty() {
            return Err(DeviceError::Codec(CodecError::TrailingBytes));
        }
        let handler = {
            let handlers = self.handlers.lock().unwrap();
            handlers.get(&message.message_type().ordinal()).cloned()
        };
        let handler = handler.ok_or(DeviceError::NoHandler)?;
        handler(message)
    }

    /// Install a handler for `msg_type`. The source's own range check
    /// (`msg_type <= MIN && msg_type >= MAX`) could never reject anything;
    /// this crate uses the corrected `||` form (§9 design notes).
    pub fn register_handler(
        &self,
        msg_type: u16,
        handler: impl Fn(Message) -> Result<(), DeviceError> + Send + Sync + 'static,
    ) -> Result<(), DeviceError> {
        if msg_type == 0 || msg_type >= 74 {
            return Err(DeviceError::InvalidArgument);
        }
        let mut handlers = self.handlers.lock().unwrap();
        if handlers.contains_key(&msg_type) {
            return Err(DeviceError::HandlerAlreadyRegistered);
        }
        handlers.insert(msg_type, Arc::new(handler));
        Ok(())
    }

    /// Remove the handler for `msg_type`, if any. Idempotent.
    pub fn unregister_handler(&self, msg_type: u16) {
        self.handlers.lock().unwrap().remove(&msg_type);
    }

    /// Whether a handler is currently installed for `message_type`.
    pub fn has_handler(&self, message_type: MessageType) -> bool {
        self.handlers
            .lock()
            .unwrap()
            .contains_key(&message_type.ordinal())
    }

    /// Allocate the next value of the process-wide, wrap-tolerant
    /// sequence counter (§3 invariant: "monotonically increasing modulo
    /// 2^32; wrap is tolerated"). Logs a warning on wraparound, the
    /// other event the spec calls out as warning-worthy without being an
    /// error.
    pub fn next_sequence(&self) -> u32 {
        let previous = self.sequence.fetch_add(1, Ordering::Relaxed);
        if previous == u32::MAX {
            log::warn!("control sequence counter wrapped");
        }
        previous.wrapping_add(1)
    }

    /// Number of currently-open endpoints, bound or not. Exposed for
    /// tests and diagnostics.
    pub fn open_endpoint_count(&self) -> usize {
        self.registry.lock().unwrap().endpoints.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::payload::BaseResp;
    use crate::message::{Envelope, MessageBody};
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc as StdArc;
    use std::thread;
    use std::time::Duration;

    fn frame_to(dst_port: u32, marker: u8) -> Vec<u8> {
        // A minimal, routable frame: type ordinal + envelope + 1 payload
        // byte. The walker never inspects bytes past what the target's
        // own `read` cares about for these tests, so the "payload" here
        // is a bare marker rather than a fully valid message body.
        let mut buf = Vec::new();
        1u16.encode(&mut buf).unwrap();
        0u32.encode(&mut buf).unwrap();
        dst_port.encode(&mut buf).unwrap();
        0u16.encode(&mut buf).unwrap();
        0u16.encode(&mut buf).unwrap();
        0u32.encode(&mut buf).unwrap();
        buf.push(marker);
        buf
    }

    #[test]
    fn test_bind_then_port_in_use_then_flush_then_rebind() {
        let core = Core::new();
        let p = core.open();
        let q = core.open();

        core.bind(&p, 7).unwrap();
        assert_eq!(core.bind(&q, 7), Err(DeviceError::PortInUse));

        p.flush().unwrap();
        core.bind(&q, 7).unwrap();
        assert_eq!(q.port(), Some(7));
    }

    #[test]
    fn test_kernel_port_cannot_be_bound() {
        let core = Core::new();
        let ep = core.open();
        assert_eq!(core.bind(&ep, KERNEL_PORT), Err(DeviceError::BadPort));
    }

    #[test]
    fn test_double_bind_rejected() {
        let core = Core::new();
        let ep = core.open();
        core.bind(&ep, 11).unwrap();
        assert_eq!(core.bind(&ep, 12), Err(DeviceError::AlreadyBound));
    }

    #[test]
    fn test_forwarding_by_port() {
        let core = StdArc::new(Core::new());
        let x = core.open();
        let y = core.open();
        core.bind(&x, 10).unwrap();
        core.bind(&y, 20).unwrap();

        let frame = frame_to(10, 0xAB);
        y.write(&core, frame).unwrap();

        match x.read(1024, ReadMode::Blocking).unwrap() {
            ReadOutcome::Frame(bytes) => assert_eq!(*bytes.last().unwrap(), 0xAB),
            other => panic!("expected a frame, got {:?}", other),
        }
    }

    #[test]
    fn test_forwarding_to_unknown_port_fails() {
        let core = Core::new();
        let frame = frame_to(999, 0x00);
        assert_eq!(core.submit(frame), Err(DeviceError::PortNotFound));
    }

    #[test]
    fn test_read_zero_length_peeks_without_dequeue() {
        let core = Core::new();
        let x = core.open();
        core.bind(&x, 30).unwrap();
        core.submit(frame_to(30, 0x01)).unwrap();

        let first = x.read(0, ReadMode::Blocking).unwrap();
        let second = x.read(0, ReadMode::Blocking).unwrap();
        assert_eq!(first, second);
        assert!(matches!(first, ReadOutcome::Length(_)));

        // the queue must still hold the frame
        match x.read(1024, ReadMode::Blocking).unwrap() {
            ReadOutcome::Frame(_) => {}
            other => panic!("expected a frame, got {:?}", other),
        }
    }

    #[test]
    fn test_buffer_too_small_does_not_dequeue() {
        let core = Core::new();
        let x = core.open();
        core.bind(&x, 31).unwrap();
        let frame = frame_to(31, 0x02);
        let len = frame.len();
        core.submit(frame).unwrap();

        assert_eq!(
            x.read(len - 1, ReadMode::Blocking),
            Err(DeviceError::BufferTooSmall)
        );
        match x.read(len, ReadMode::Blocking).unwrap() {
            ReadOutcome::Frame(bytes) => assert_eq!(bytes.len(), len),
            other => panic!("expected a frame, got {:?}", other),
        }
    }

    #[test]
    fn test_non_blocking_read_would_block_on_empty_queue() {
        let core = Core::new();
        let x = core.open();
        core.bind(&x, 32).unwrap();
        assert_eq!(
            x.read(1024, ReadMode::NonBlocking),
            Err(DeviceError::WouldBlock)
        );
    }

    #[test]
    fn test_close_races_reader() {
        let core = StdArc::new(Core::new());
        let z = core.open();
        core.bind(&z, 40).unwrap();

        let reader_z = z.clone();
        let reader = thread::spawn(move || reader_z.read(1024, ReadMode::Blocking));

        thread::sleep(Duration::from_millis(50));
        z.release(&core);

        assert_eq!(reader.join().unwrap(), Err(DeviceError::Closed));
    }

    #[test]
    fn test_interrupt_wakes_reader_without_closing() {
        let core = StdArc::new(Core::new());
        let ep = core.open();
        core.bind(&ep, 41).unwrap();

        let flag_set = StdArc::new(AtomicBool::new(false));
        let reader_ep = ep.clone();
        let reader_flag = flag_set.clone();
        let reader = thread::spawn(move || {
            let result = reader_ep.read(1024, ReadMode::Blocking);
            reader_flag.store(true, Ordering::SeqCst);
            result
        });

        thread::sleep(Duration::from_millis(50));
        ep.interrupt();
        assert_eq!(reader.join().unwrap(), Err(DeviceError::Interrupted));
        assert!(!ep.state.lock().unwrap().queue.is_none());
    }

    #[test]
    fn test_release_drains_pending_frames() {
        let core = StdArc::new(Core::new());
        let ep = core.open();
        core.bind(&ep, 50).unwrap();
        core.submit(frame_to(50, 1)).unwrap();
        core.submit(frame_to(50, 2)).unwrap();

        ep.release(&core);
        assert_eq!(core.open_endpoint_count(), 0);
        assert_eq!(
            ep.read(1024, ReadMode::Blocking),
            Err(DeviceError::Closed)
        );
    }

    #[test]
    fn test_queue_full_once_capacity_reached() {
        let core = Core::with_capacity(Some(1));
        let ep = core.open();
        core.bind(&ep, 60).unwrap();
        core.submit(frame_to(60, 1)).unwrap();
        assert_eq!(core.submit(frame_to(60, 2)), Err(DeviceError::QueueFull));
    }

    #[test]
    fn test_kernel_dispatch_invokes_handler() {
        let core = Core::new();
        let seen = StdArc::new(Mutex::new(None));
        let seen_clone = seen.clone();
        core.register_handler(2, move |message| {
            *seen_clone.lock().unwrap() = Some(message);
            Ok(())
        })
        .unwrap();

        let message = Message {
            envelope: Envelope {
                src_port: 5,
                dst_port: KERNEL_PORT,
                src_ipcp_id: 0,
                dst_ipcp_id: 0,
                event_id: 1,
            },
            body: MessageBody::AssignToDifResponse(BaseResp { result: -1 }),
        };
        let mut buf = Vec::new();
        message.encode(&mut buf).unwrap();

        core.submit(buf).unwrap();
        assert_eq!(*seen.lock().unwrap(), Some(message));
    }

    #[test]
    fn test_kernel_dispatch_without_handler_fails() {
        let core = Core::new();
        let message = Message {
            envelope: Envelope {
                src_port: 5,
                dst_port: KERNEL_PORT,
                src_ipcp_id: 0,
                dst_ipcp_id: 0,
                event_id: 1,
            },
            body: MessageBody::AssignToDifResponse(BaseResp { result: 0 }),
        };
        let mut buf = Vec::new();
        message.encode(&mut buf).unwrap();
        assert_eq!(core.submit(buf), Err(DeviceError::NoHandler));
    }

    #[test]
    fn test_handler_rejection_surfaces_to_writer() {
        let core = Core::new();
        core.register_handler(2, |_message| Err(DeviceError::HandlerRejected(-5)))
            .unwrap();
        let message = Message {
            envelope: Envelope::default(),
            body: MessageBody::AssignToDifResponse(BaseResp { result: 0 }),
        };
        let mut buf = Vec::new();
        message.encode(&mut buf).unwrap();
        assert_eq!(core.submit(buf), Err(DeviceError::HandlerRejected(-5)));
    }

    #[test]
    fn test_register_handler_rejects_out_of_range_ordinal() {
        let core = Core::new();
        assert_eq!(
            core.register_handler(0, |_| Ok(())),
            Err(DeviceError::InvalidArgument)
        );
        assert_eq!(
            core.register_handler(74, |_| Ok(())),
            Err(DeviceError::InvalidArgument)
        );
    }

    #[test]
    fn test_manager_port_release_is_logged_not_special_cased() {
        // No direct way to assert on `log::warn!` output without a test
        // subscriber; this exercises the path for panics/deadlocks only.
        let core = StdArc::new(Core::new());
        let ep = core.open();
        core.bind(&ep, MANAGER_PORT).unwrap();
        ep.release(&core);
        assert_eq!(core.open_endpoint_count(), 0);
    }
}
