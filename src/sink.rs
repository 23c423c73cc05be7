use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use parking_lot::Mutex;

use crate::error::{Error, Result};

/// Program tag written into the header of a freshly created log file.
pub const PROG_NAME: &str = concat!(env!("CARGO_PKG_NAME"), "/v", env!("CARGO_PKG_VERSION"));

enum Device {
    // Unbuffered, opened in append mode. Written through `&File`, no lock.
    File(File),
    Stream(Mutex<Box<dyn Write + Send>>),
}

/// Append-only log device.
///
/// A sink either opens the log file itself or adopts a stream that is
/// already open. File-backed sinks take no lock around writes and rely on
/// the OS placing every append at the current end of file, so concurrent
/// writers interleave whole writes in unspecified order.
///
/// Opening can fail. Writing never does: a failed write is reported on
/// stderr and the call returns normally.
pub struct LogSink {
    dev: Option<Device>,
    path: Option<PathBuf>,
}

impl LogSink {
    /// Opens `path` for appending, creating it with a header line if it
    /// does not exist yet. Existing content is never truncated.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = if path.exists() {
            open_logfile(path)
        } else {
            create_logfile(path)
        }
        .map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(LogSink {
            dev: Some(Device::File(file)),
            path: Some(path.to_path_buf()),
        })
    }

    /// Adopts an already open stream. No path is recorded.
    pub fn from_stream<W>(stream: W) -> Self
    where
        W: Write + Send + 'static,
    {
        LogSink {
            dev: Some(Device::Stream(Mutex::new(Box::new(stream)))),
            path: None,
        }
    }

    /// Path of the file, if this sink opened it.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.dev.is_none()
    }

    /// Appends `message` as is. Failures, including writing to a closed
    /// sink, become a warning on stderr.
    pub fn write(&self, message: impl AsRef<[u8]>) {
        if let Err(err) = self.try_write(message.as_ref()) {
            warn_failed(&err);
        }
    }

    /// Appends `message`, returning the failure instead of reporting it.
    pub fn try_write(&self, message: &[u8]) -> Result<()> {
        match &self.dev {
            Some(Device::File(file)) => {
                let mut file: &File = file;
                file.write_all(message)?;
            }
            Some(Device::Stream(stream)) => {
                let mut stream = stream.lock();
                stream.write_all(message)?;
                stream.flush()?;
            }
            None => return Err(Error::Closed),
        }
        Ok(())
    }

    pub fn flush(&self) {
        let result = match &self.dev {
            Some(Device::Stream(stream)) => stream.lock().flush().map_err(Error::from),
            Some(Device::File(_)) => Ok(()),
            None => Err(Error::Closed),
        };
        if let Err(err) = result {
            warn_failed(&err);
        }
    }

    /// Releases the device. Errors are discarded.
    pub fn close(&mut self) {
        if let Some(Device::Stream(stream)) = self.dev.take() {
            let _ = stream.into_inner().flush();
        }
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("LogSink")
            .field("path", &self.path)
            .field("closed", &self.is_closed())
            .finish()
    }
}

fn warn_failed(err: &Error) {
    eprintln!("log writing failed. {}", err);
}

fn open_logfile(path: &Path) -> io::Result<File> {
    OpenOptions::new().append(true).open(path)
}

fn create_logfile(path: &Path) -> io::Result<File> {
    create_logfile_with(path, |file| file.write_all(log_header().as_bytes()))
}

// `init` writes the header. A file whose header could not be written is
// removed again so the next open starts over.
fn create_logfile_with<F>(path: &Path, init: F) -> io::Result<File>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    match OpenOptions::new().append(true).create_new(true).open(path) {
        Ok(mut file) => match init(&mut file) {
            Ok(()) => Ok(file),
            Err(err) => {
                drop(file);
                let _ = fs::remove_file(path);
                Err(err)
            }
        },
        // someone else created it since we looked, or `path` is a dangling
        // symlink; append without a header, creating the target if needed
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            OpenOptions::new().append(true).create(true).open(path)
        }
        Err(err) => Err(err),
    }
}

fn log_header() -> String {
    format!(
        "# Logfile created on {} by {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S %z"),
        PROG_NAME
    )
}
