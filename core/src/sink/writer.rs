use std::io::Write;

use super::traits::LogSink;
use crate::error::SinkError;

/// Adapts any [`Write`] implementation, such as `std::io::stderr()`.
#[derive(Debug)]
pub struct WriterSink<W> {
    inner: W,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn write(&mut self, line: &[u8]) -> Result<(), SinkError> {
        self.inner.write_all(line).map_err(SinkError::Write)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.inner.flush().map_err(SinkError::Flush)
    }
}
