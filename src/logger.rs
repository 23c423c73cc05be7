use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use chrono::{DateTime, SecondsFormat, Utc};
use log::{LevelFilter, Metadata, Record};
use parking_lot::Mutex;

use crate::error::Result;
use crate::paths;
use crate::sink::LogSink;

/// Turns a timestamp and a message into one log line.
pub type Formatter = fn(DateTime<Utc>, &str) -> String;

/// `<UTC ISO-8601 timestamp>: <message>\n`, no level and no source location.
pub fn format_line(time: DateTime<Utc>, message: &str) -> String {
    format!(
        "{}: {}\n",
        time.to_rfc3339_opts(SecondsFormat::Secs, true),
        message
    )
}

/// A [`LogSink`] paired with a line formatter.
///
/// Everything is logged by default (`LevelFilter::Trace`).
pub struct ProcessLogger {
    sink: LogSink,
    formatter: Formatter,
    level: LevelFilter,
}

impl ProcessLogger {
    pub fn new(sink: LogSink) -> Self {
        ProcessLogger {
            sink,
            formatter: format_line,
            level: LevelFilter::Trace,
        }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(LogSink::open(path)?))
    }

    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn path(&self) -> Option<&Path> {
        self.sink.path()
    }

    pub fn log_message(&self, message: &str) {
        self.log_at(Utc::now(), message);
    }

    pub fn log_at(&self, time: DateTime<Utc>, message: &str) {
        self.sink.write((self.formatter)(time, message));
    }

    pub fn close(&mut self) {
        self.sink.close();
    }
}

impl fmt::Debug for ProcessLogger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ProcessLogger")
            .field("sink", &self.sink)
            .field("level", &self.level)
            .finish()
    }
}

impl log::Log for ProcessLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.log_message(&record.args().to_string());
    }

    fn flush(&self) {
        self.sink.flush();
    }
}

static LOGGER: OnceLock<ProcessLogger> = OnceLock::new();
static INIT: Mutex<()> = parking_lot::const_mutex(());

/// The process-wide logger writing to `~/.playa/playa.log`.
///
/// The first successful call creates the directory and opens the file;
/// later calls return the same instance. If opening fails nothing is
/// cached and the next call tries again.
pub fn logger() -> Result<&'static ProcessLogger> {
    if let Some(logger) = LOGGER.get() {
        return Ok(logger);
    }

    let _guard = INIT.lock();
    if let Some(logger) = LOGGER.get() {
        return Ok(logger);
    }

    let path = paths::log_file()?;
    let logger = ProcessLogger::open(path)?;
    Ok(LOGGER.get_or_init(|| logger))
}

/// Registers the process-wide logger with the `log` facade.
pub fn install() -> Result<&'static ProcessLogger> {
    let logger = logger()?;
    log::set_logger(logger)?;
    log::set_max_level(logger.level());
    Ok(logger)
}
