//! Default sink: append to `ScopeTimer.log` in the configured directory.

use std::fs::{File, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::traits::LogSink;
use crate::config::{self, LOG_FILE_NAME};
use crate::error::SinkError;

/// Appends lines to a log file that is opened on the first write.
///
/// If opening fails, the path is remembered and later writes to the same
/// path return [`SinkError::Suppressed`] without touching the filesystem.
/// A different path (for example after the configured directory changes)
/// is tried again.
///
/// Lines go straight to the OS handle; [`LogSink::flush`] syncs file data
/// to disk. Rust opens files close-on-exec, so the handle does not leak
/// into spawned programs.
#[derive(Debug, Default)]
pub struct FileSink {
    file: Option<File>,
    directory: Option<PathBuf>,
    failed_path: Option<PathBuf>,
    open_attempts: u32,
}

impl FileSink {
    /// A sink that follows [`config::log_file_path`].
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that always writes into `dir`, ignoring the configured directory.
    pub fn with_directory(dir: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(dir.into()),
            ..Self::default()
        }
    }

    /// Path the next open attempt would use.
    pub fn log_path(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => dir.join(LOG_FILE_NAME),
            None => config::log_file_path(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Number of times the sink has tried to open a file.
    pub fn open_attempts(&self) -> u32 {
        self.open_attempts
    }

    fn open(&mut self) -> Result<File, SinkError> {
        let path = self.log_path();
        if self.failed_path.as_deref() == Some(path.as_path()) {
            return Err(SinkError::suppressed(path));
        }

        self.open_attempts += 1;
        match open_append(&path) {
            Ok(file) => {
                debug!(path = %path.display(), "opened scope timer log");
                self.failed_path = None;
                Ok(file)
            }
            Err(source) => {
                warn!(
                    path = %path.display(),
                    error = %source,
                    "cannot open scope timer log, suppressing retries for this path"
                );
                self.failed_path = Some(path.clone());
                Err(SinkError::open(path, source))
            }
        }
    }
}

impl LogSink for FileSink {
    fn write(&mut self, line: &[u8]) -> Result<(), SinkError> {
        if line.is_empty() {
            return Ok(());
        }
        if self.file.is_none() {
            self.file = Some(self.open()?);
        }
        match self.file.as_mut() {
            Some(file) => file.write_all(line).map_err(SinkError::Write),
            None => Ok(()),
        }
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        match self.file.as_mut() {
            Some(file) => file.sync_data().map_err(SinkError::Flush),
            None => Ok(()),
        }
    }

    fn close(&mut self) -> Result<(), SinkError> {
        let Some(file) = self.file.take() else {
            return Ok(());
        };
        debug!(path = %self.log_path().display(), "closing scope timer log");
        file.sync_data().map_err(SinkError::Flush)
    }
}

fn open_append(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt as _;
        options.mode(0o644);
    }
    options.open(path)
}
