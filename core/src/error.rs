use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by a [`LogSink`](crate::sink::LogSink).
///
/// Timers never surface these to the timed code; they only reach callers
/// that drive a sink directly.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to open log file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("log file {} failed to open earlier, not retrying", .path.display())]
    Suppressed { path: PathBuf },
    #[error("failed to write log line: {0}")]
    Write(#[source] io::Error),
    #[error("failed to flush log: {0}")]
    Flush(#[source] io::Error),
}

impl SinkError {
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    pub fn suppressed(path: impl Into<PathBuf>) -> Self {
        Self::Suppressed { path: path.into() }
    }
}
