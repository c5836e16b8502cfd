//! Sink trait definition.

use crate::error::SinkError;

/// Destination for finished log lines.
///
/// The dispatcher serializes every call behind one mutex, so an
/// implementation sees whole lines one at a time and needs no locking of
/// its own. See [module documentation](super) for the implementations.
pub trait LogSink: Send {
    /// Appends one complete line, newline included.
    fn write(&mut self, line: &[u8]) -> Result<(), SinkError>;

    /// Pushes buffered output to its destination.
    fn flush(&mut self) -> Result<(), SinkError>;

    /// Flushes and releases any handle. Called on shutdown and when the sink
    /// is replaced; must tolerate repeated calls.
    fn close(&mut self) -> Result<(), SinkError> {
        self.flush()
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn write(&mut self, line: &[u8]) -> Result<(), SinkError> {
        (**self).write(line)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }

    fn close(&mut self) -> Result<(), SinkError> {
        (**self).close()
    }
}
