//! Log directory setup and the size-rotated writer behind the file sink.

use std::{
    ffi::OsString,
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};

use file_rotate::{compression::Compression, suffix::AppendCount, ContentLimit, FileRotate};

use crate::lib::errors::LoggingError;

/// Rotation threshold for log files (10 MiB).
pub const DEFAULT_MAX_BYTES: usize = 10 * 1024 * 1024;
/// Number of rotated files kept next to the active one.
pub const DEFAULT_BACKUP_COUNT: usize = 5;

/// Writer that rolls `<path>` over to `<path>.1 .. <path>.N`.
pub type RotatingLog = FileRotate<AppendCount>;

/// Open `path` for appending, rotating once it grows past `max_bytes`.
///
/// Lines are never split across files; the oldest backup beyond
/// `backup_count` is deleted.
pub fn open_rotating_log(
    path: &Path,
    max_bytes: usize,
    backup_count: usize,
) -> Result<RotatingLog, LoggingError> {
    // FileRotate swallows open errors, so surface them here first.
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::OpenFile {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(FileRotate::new(
        path,
        AppendCount::new(backup_count),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    ))
}

/// [`open_rotating_log`] with the 10 MiB / 5 backups policy.
pub fn open_default_rotating_log(path: &Path) -> Result<RotatingLog, LoggingError> {
    open_rotating_log(path, DEFAULT_MAX_BYTES, DEFAULT_BACKUP_COUNT)
}

/// `<path>.<index>`
pub fn backup_path(path: &Path, index: usize) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

/// Create `dir` (and parents) unless it already exists.
pub fn ensure_log_dir(dir: &Path) -> Result<(), LoggingError> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}
