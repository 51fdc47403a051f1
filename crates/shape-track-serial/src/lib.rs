//! Handshake-gated serial link.
//!
//! The embedded controller announces readiness with a sentinel line; every
//! sentinel authorizes exactly one outbound tracking report. Receive and
//! transmit run as independent polling workers so a slow or silent peer
//! never blocks shutdown.

mod error;
mod link;
mod transport;
mod wire;

pub use error::LinkError;
pub use link::{LinkParams, ReportSource, SerialLink};
pub use transport::{LinkTransport, UartTransport};
pub use wire::{encode_report, READY_SENTINEL};
