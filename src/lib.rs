//! Append-only file logger for playa.
//!
//! Lines go to `~/.playa/playa.log` as `<UTC ISO-8601>: <message>`. Opening
//! the file may fail; writing to it never does.

pub mod error;
pub mod logger;
pub mod paths;
pub mod sink;

pub use error::{Error, Result};
pub use logger::{format_line, install, logger, Formatter, ProcessLogger};
pub use sink::{LogSink, PROG_NAME};
