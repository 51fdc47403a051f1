//! Transport seam between the link protocol and the serial device.

use std::io::{Read, Write};
use std::time::Duration;

use crate::error::LinkError;

/// Line-oriented byte transport driven by the link workers.
pub trait LinkTransport: Send {
    /// Next complete inbound line without its terminator, or `None` when no
    /// full line has arrived yet. Must not block much longer than the link's
    /// poll interval.
    fn poll_line(&mut self) -> Result<Option<String>, LinkError>;

    /// Write one outbound line (the caller includes the terminator).
    fn send_line(&mut self, line: &str) -> Result<(), LinkError>;
}

/// `serialport`-backed transport.
pub struct UartTransport {
    port: Box<dyn serialport::SerialPort>,
    pending: Vec<u8>,
}

impl UartTransport {
    /// Open `path` at `baud` with a short read timeout so polling stays
    /// responsive to shutdown.
    pub fn open(path: &str, baud: u32) -> Result<Self, LinkError> {
        let port = serialport::new(path, baud)
            .timeout(Duration::from_millis(100))
            .open()
            .map_err(|source| LinkError::Open {
                port: path.to_string(),
                source,
            })?;
        Ok(Self {
            port,
            pending: Vec::new(),
        })
    }
}

impl LinkTransport for UartTransport {
    fn poll_line(&mut self) -> Result<Option<String>, LinkError> {
        let mut buf = [0u8; 256];
        match self.port.read(&mut buf) {
            Ok(0) => {}
            Ok(n) => self.pending.extend_from_slice(&buf[..n]),
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {}
            Err(e) => return Err(e.into()),
        }
        Ok(take_line(&mut self.pending))
    }

    fn send_line(&mut self, line: &str) -> Result<(), LinkError> {
        self.port.write_all(line.as_bytes())?;
        self.port.flush()?;
        Ok(())
    }
}

/// Split the first complete line out of `pending`, trimming `\r\n`.
///
/// Invalid UTF-8 is replaced rather than rejected; the sentinel comparison
/// happens on the cleaned text.
fn take_line(pending: &mut Vec<u8>) -> Option<String> {
    let pos = pending.iter().position(|&b| b == b'\n')?;
    let line: Vec<u8> = pending.drain(..=pos).collect();
    let text = String::from_utf8_lossy(&line);
    Some(text.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_line_waits_for_a_terminator() {
        let mut pending = b"RECEIVING".to_vec();
        assert_eq!(take_line(&mut pending), None);
        pending.extend_from_slice(b" DATA\r\n");
        assert_eq!(take_line(&mut pending), Some("RECEIVING DATA".to_string()));
        assert!(pending.is_empty());
    }

    #[test]
    fn take_line_splits_one_line_at_a_time() {
        let mut pending = b"first\nsecond\nrest".to_vec();
        assert_eq!(take_line(&mut pending), Some("first".to_string()));
        assert_eq!(take_line(&mut pending), Some("second".to_string()));
        assert_eq!(take_line(&mut pending), None);
        assert_eq!(pending, b"rest");
    }
}
