use std::io::Write;
use std::sync::OnceLock;

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::config::PROGRAM_LOG_LEVEL;

/// Diagnostic logger writing to stderr.
///
/// Reports go to stdout, so diagnostics must never share that stream.
struct StderrLogger {
    max: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.max
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut err = std::io::stderr().lock();
        let _ = writeln!(
            err,
            "{} {:5} {} {}",
            Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

fn level_from_env() -> LevelFilter {
    std::env::var(PROGRAM_LOG_LEVEL)
        .ok()
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn)
}

/// Install the stderr logger with the level taken from the environment.
pub fn init() -> Result<(), SetLoggerError> {
    init_at(level_from_env())
}

/// Install the stderr logger at an explicit level.
///
/// Only the first call decides the level; later calls return an error from
/// `log::set_logger` and change nothing.
pub fn init_at(max: LevelFilter) -> Result<(), SetLoggerError> {
    static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

    let logger = LOGGER.get_or_init(|| StderrLogger { max });
    log::set_logger(logger)?;
    log::set_max_level(logger.max);

    Ok(())
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
