//! The link state machine: two polling workers around one shared session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use log::{debug, info, warn};
use shape_track_core::TrackingReport;

use crate::transport::{LinkTransport, UartTransport};
use crate::wire::{encode_report, READY_SENTINEL};

/// Supplier of the most recent tracking report.
///
/// Implemented by the tracking-state adapter in production; closures get a
/// blanket impl so tests can inject reports directly.
pub trait ReportSource: Send + Sync {
    fn latest_report(&self) -> Option<TrackingReport>;
}

impl<F> ReportSource for F
where
    F: Fn() -> Option<TrackingReport> + Send + Sync,
{
    fn latest_report(&self) -> Option<TrackingReport> {
        self()
    }
}

/// Link tuning.
#[derive(Clone, Copy, Debug)]
pub struct LinkParams {
    /// How often each worker polls its side of the line.
    pub poll_interval: Duration,
}

impl Default for LinkParams {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
        }
    }
}

struct LinkShared {
    running: AtomicBool,
    /// Armed by the sentinel, consumed by one transmission.
    ready: AtomicBool,
    transport: Mutex<Box<dyn LinkTransport>>,
}

/// Serial session streaming tracking reports under request/ack flow control.
///
/// The receive worker arms `ready` when the peer announces itself with
/// [`READY_SENTINEL`]; the transmit worker then sends exactly one qualifying
/// report and disarms, so a slow or busy receiver is never overrun.
pub struct SerialLink {
    shared: Option<Arc<LinkShared>>,
    params: LinkParams,
    workers: Vec<JoinHandle<()>>,
}

impl SerialLink {
    /// Open a UART-backed link.
    ///
    /// A failed open is logged and yields a link without a transport, whose
    /// `start` is a no-op: a missing device must not take the vision
    /// pipeline down.
    pub fn open(path: &str, baud: u32) -> Self {
        match UartTransport::open(path, baud) {
            Ok(transport) => Self::with_transport(transport),
            Err(e) => {
                warn!("serial link disabled: {e}");
                Self {
                    shared: None,
                    params: LinkParams::default(),
                    workers: Vec::new(),
                }
            }
        }
    }

    /// Build a link over an arbitrary transport.
    pub fn with_transport(transport: impl LinkTransport + 'static) -> Self {
        Self {
            shared: Some(Arc::new(LinkShared {
                running: AtomicBool::new(false),
                ready: AtomicBool::new(false),
                transport: Mutex::new(Box::new(transport)),
            })),
            params: LinkParams::default(),
            workers: Vec::new(),
        }
    }

    pub fn with_params(mut self, params: LinkParams) -> Self {
        self.params = params;
        self
    }

    /// Spawn the receive and transmit workers.
    ///
    /// Returns `false` without spawning when the link has no transport or is
    /// already running.
    pub fn start(&mut self, source: impl ReportSource + 'static) -> bool {
        let Some(shared) = &self.shared else {
            info!("serial link has no transport; start skipped");
            return false;
        };
        if shared.running.swap(true, Ordering::SeqCst) {
            warn!("serial link already running; start ignored");
            return false;
        }
        let interval = self.params.poll_interval;

        let rx = Arc::clone(shared);
        self.workers
            .push(std::thread::spawn(move || receive_loop(&rx, interval)));

        let tx = Arc::clone(shared);
        self.workers
            .push(std::thread::spawn(move || transmit_loop(&tx, &source, interval)));
        true
    }

    /// True while the handshake is armed and unconsumed.
    pub fn is_ready(&self) -> bool {
        self.shared
            .as_ref()
            .is_some_and(|s| s.ready.load(Ordering::SeqCst))
    }

    pub fn is_running(&self) -> bool {
        self.shared
            .as_ref()
            .is_some_and(|s| s.running.load(Ordering::SeqCst))
    }

    /// Signal both workers, wait for them to exit, then release the port.
    pub fn stop(&mut self) {
        if let Some(shared) = &self.shared {
            shared.running.store(false, Ordering::SeqCst);
        }
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("serial worker panicked");
            }
        }
        // Last owner of the transport; dropping it closes the port.
        self.shared = None;
    }
}

impl Drop for SerialLink {
    fn drop(&mut self) {
        self.stop();
    }
}

fn receive_loop(shared: &LinkShared, interval: Duration) {
    info!("serial receive worker started");
    while shared.running.load(Ordering::SeqCst) {
        let polled = shared
            .transport
            .lock()
            .expect("transport lock poisoned")
            .poll_line();
        match polled {
            Ok(Some(line)) if line == READY_SENTINEL => {
                debug!("peer ready to receive");
                shared.ready.store(true, Ordering::SeqCst);
            }
            Ok(Some(line)) => debug!("ignoring inbound line {line:?}"),
            Ok(None) => {}
            Err(e) => warn!("serial read failed: {e}"),
        }
        std::thread::sleep(interval);
    }
    info!("serial receive worker stopped");
}

fn transmit_loop(shared: &LinkShared, source: &dyn ReportSource, interval: Duration) {
    info!("serial transmit worker started");
    while shared.running.load(Ordering::SeqCst) {
        if shared.ready.load(Ordering::SeqCst) {
            if let Some(report) = source.latest_report() {
                if report.qualifies() {
                    let line = encode_report(&report);
                    let sent = shared
                        .transport
                        .lock()
                        .expect("transport lock poisoned")
                        .send_line(&line);
                    match sent {
                        Ok(()) => {
                            // One handshake authorizes exactly one send.
                            shared.ready.store(false, Ordering::SeqCst);
                            debug!("report sent: {}", line.trim_end());
                        }
                        Err(e) => warn!("serial write failed: {e}"),
                    }
                }
            }
        }
        std::thread::sleep(interval);
    }
    info!("serial transmit worker stopped");
}
