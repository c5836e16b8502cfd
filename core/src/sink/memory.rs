//! In-memory sink for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::traits::LogSink;
use crate::error::SinkError;

/// Captures lines in a shared buffer.
///
/// Clones share the same buffer, so a test can install one clone with
/// [`set_sink`](super::set_sink) and inspect another.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buf: Arc<Mutex<Vec<u8>>>,
    flushes: Arc<AtomicUsize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn buf(&self) -> MutexGuard<'_, Vec<u8>> {
        self.buf.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    pub fn len(&self) -> usize {
        self.buf().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }

    pub fn clear(&self) {
        self.buf().clear();
        self.flushes.store(0, Ordering::SeqCst);
    }
}

impl LogSink for MemorySink {
    fn write(&mut self, line: &[u8]) -> Result<(), SinkError> {
        self.buf().extend_from_slice(line);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_buffer() {
        let sink = MemorySink::new();
        let mut writer = sink.clone();
        writer.write(b"a\n").unwrap();
        writer.write(b"b\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(sink.lines(), ["a", "b"]);
        assert_eq!(sink.flush_count(), 1);

        sink.clear();
        assert!(sink.is_empty());
        assert_eq!(sink.flush_count(), 0);
    }
}
