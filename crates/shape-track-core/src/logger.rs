//! Minimal process-wide logger.
//!
//! Prints `[elapsed LEVEL target] message` to stderr. Install once at startup
//! with `init_logging`; later calls are no-ops.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

struct UptimeLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for UptimeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.started.elapsed().as_secs_f64();
        let mut stderr = std::io::stderr();
        let _ = writeln!(
            stderr,
            "[{:8.3}s {:>5} {}] {}",
            elapsed,
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<UptimeLogger> = OnceLock::new();

/// Install the process logger with the given level filter.
pub fn init_logging(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| UptimeLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}
