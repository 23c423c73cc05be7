use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while setting up or driving the log file.
///
/// Only opening is allowed to fail loudly. Once a sink is open, write
/// failures are reported as warnings and never reach the caller.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot determine home directory")]
    NoHomeDir,

    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("log device is closed")]
    Closed,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("a global logger is already installed")]
    SetLogger(#[from] log::SetLoggerError),
}

impl Error {
    /// The underlying I/O error kind, when there is one.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Error::CreateDir { source, .. } | Error::Open { source, .. } => Some(source.kind()),
            Error::Io(err) => Some(err.kind()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
