//! Where finished log lines go.
//!
//! One process-wide sink receives every line. By default it is a
//! [`FileSink`] that appends to `ScopeTimer.log` in the configured
//! directory; [`set_sink`] swaps in any other [`LogSink`] (a [`MemorySink`]
//! in tests, a [`WriterSink`] around stderr in the demo) and
//! [`restore_default_sink`] puts the file sink back.
//!
//! Writes, the line counter and periodic flushes all run under a single
//! mutex, so lines from concurrent timers never interleave.
//!
//! ```no_run
//! use scopetimer_core::sink::{self, MemorySink};
//!
//! let captured = MemorySink::new();
//! sink::set_sink(captured.clone());
//! {
//!     scopetimer_core::scope_timer!("captured");
//! }
//! assert_eq!(captured.lines().len(), 1);
//! sink::restore_default_sink();
//! ```

mod file;
mod memory;
mod traits;
mod writer;

use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use tracing::trace;

pub use file::FileSink;
pub use memory::MemorySink;
pub use traits::LogSink;
pub use writer::WriterSink;

struct Dispatch {
    sink: Box<dyn LogSink>,
    lines: u64,
}

impl Dispatch {
    fn new(sink: Box<dyn LogSink>) -> Self {
        Self { sink, lines: 0 }
    }
}

static DISPATCH: LazyLock<Mutex<Dispatch>> =
    LazyLock::new(|| Mutex::new(Dispatch::new(Box::new(FileSink::new()))));

fn dispatch() -> MutexGuard<'static, Dispatch> {
    DISPATCH.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Writes one line and flushes every `flush_interval` lines.
///
/// Errors are swallowed: a timer must never disturb the code it measures.
pub(crate) fn emit(line: &[u8], flush_interval: u32) {
    let mut dispatch = dispatch();
    if !line.is_empty() {
        if let Err(err) = dispatch.sink.write(line) {
            trace!(error = %err, "dropped scope timer line");
        }
    }
    dispatch.lines += 1;
    if dispatch.lines % u64::from(flush_interval.max(1)) == 0 {
        if let Err(err) = dispatch.sink.flush() {
            trace!(error = %err, "scope timer flush failed");
        }
    }
}

/// Replaces the process-wide sink.
///
/// The previous sink is closed and dropped, and the flush cadence starts
/// over for the new one.
pub fn set_sink(sink: impl LogSink + 'static) {
    replace(Box::new(sink));
}

/// Goes back to the default [`FileSink`].
pub fn restore_default_sink() {
    replace(Box::new(FileSink::new()));
}

fn replace(sink: Box<dyn LogSink>) {
    let mut previous = {
        let mut dispatch = dispatch();
        std::mem::replace(&mut *dispatch, Dispatch::new(sink))
    };
    if let Err(err) = previous.sink.close() {
        trace!(error = %err, "closing replaced scope timer sink failed");
    }
}

/// Flushes and closes the current sink. Safe to call any number of times;
/// a later line reopens the default file lazily.
pub fn shutdown() {
    if let Err(err) = dispatch().sink.close() {
        trace!(error = %err, "closing scope timer sink failed");
    }
}

/// Lines handed to the current sink since it was installed.
pub fn lines_emitted() -> u64 {
    dispatch().lines
}

/// Calls [`shutdown`] when dropped.
///
/// Statics are never dropped at process exit, so hold one of these for the
/// lifetime of `main` to close the log file on the way out.
#[derive(Debug, Default)]
#[must_use = "the sink is closed when the guard is dropped"]
pub struct ShutdownGuard {
    _private: (),
}

impl ShutdownGuard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Drop for ShutdownGuard {
    fn drop(&mut self) {
        shutdown();
    }
}
