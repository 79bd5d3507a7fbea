//! Stderr backend for the `log` facade
//!
//! The library only emits records; the binary decides whether anything is
//! printed by calling [`init`] once at startup. Records are written as
//! `[LEVEL target] message`, one per line.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        // Nothing sensible to do if stderr is gone
        let _ = writeln!(stderr, "{}", format_record(record));
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn format_record(record: &Record) -> String {
    format!(
        "[{:<5} {}] {}",
        record.level(),
        record.target(),
        record.args()
    )
}

/// Install the stderr logger at `level`. Fails if a logger is already set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
