//! Location of the log file.
//!
//! The log always lives at `<home>/.playa/playa.log`. Nothing here reads
//! configuration; the layout is fixed.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DIR_NAME: &str = ".playa";
pub const FILE_NAME: &str = "playa.log";

/// `<home>/.playa` for the current user.
pub fn log_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(Error::NoHomeDir)?;
    Ok(log_dir_in(&home))
}

pub fn log_dir_in(home: &Path) -> PathBuf {
    home.join(DIR_NAME)
}

/// Creates `dir` (and missing parents) unless it is already a directory.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    if dir.exists() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }

    fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Resolves the log file path, creating its directory if needed.
pub fn log_file() -> Result<PathBuf> {
    let dir = log_dir()?;
    ensure_dir(&dir)?;
    Ok(dir.join(FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_in_home() {
        let dir = log_dir_in(Path::new("/home/someone"));
        assert_eq!(dir, PathBuf::from("/home/someone/.playa"));
    }

    #[test]
    fn test_ensure_dir_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = log_dir_in(tmp.path());
        assert!(!dir.exists());

        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = log_dir_in(tmp.path());

        ensure_dir(&dir).unwrap();
        fs::write(dir.join(FILE_NAME), "kept\n").unwrap();
        ensure_dir(&dir).unwrap();

        assert_eq!(fs::read_to_string(dir.join(FILE_NAME)).unwrap(), "kept\n");
    }

    #[test]
    fn test_ensure_dir_rejects_regular_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = log_dir_in(tmp.path());
        fs::write(&dir, "not a dir").unwrap();

        let err = ensure_dir(&dir).unwrap_err();
        assert!(matches!(err, Error::NotADirectory(ref p) if p == &dir));
    }

    #[test]
    fn test_ensure_dir_reports_io_kind_on_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        // parent is a regular file, so create_dir_all cannot succeed
        let err = ensure_dir(&blocker.join(DIR_NAME)).unwrap_err();
        assert!(matches!(err, Error::CreateDir { .. }));
        assert!(err.io_kind().is_some());
    }
}
