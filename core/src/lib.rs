//! Scope timing that appends one human-readable line per timed scope.
//!
//! Put [`scope_timer!`] at the top of a block and, when the block ends, a
//! line like this is appended to `ScopeTimer.log`:
//!
//! ```text
//! [Useful logging info] TID=001 | my_app::work | start=2025-08-13 12:00:12.659 | end=2025-08-13 12:00:26.714 | elapsed=14.055s
//! ```
//!
//! - Durations come from a monotonic clock; the start/end stamps are local
//!   wall-clock time used for display only.
//! - Behavior is controlled by `SCOPE_TIMER`, `SCOPE_TIMER_DIR`,
//!   `SCOPE_TIMER_FLUSH_N` and `SCOPE_TIMER_FORMAT`, read once per process
//!   (see [`config`]).
//! - Output goes through a replaceable process-wide [`sink`].
//! - Nothing here panics or returns errors into the timed code; if the log
//!   cannot be written, the line is dropped.
//!
//! Lines are written to the log file unbuffered, but nothing syncs and
//! closes it at process exit on its own: statics are never dropped. A
//! binary or embedding library should hold a [`sink::ShutdownGuard`] for as
//! long as timers may run, typically for the whole of `main`:
//!
//! ```no_run
//! let _shutdown = scopetimer_core::sink::ShutdownGuard::new();
//! scopetimer_core::scope_timer!("main");
//! // ... work ...
//! ```
//!
//! Enabling the `compile-out` feature turns both macros into no-ops.

pub mod config;
mod conditional;
mod error;
mod format;
mod label;
mod macros;
pub mod sink;
mod thread_id;
mod timer;

pub use conditional::ConditionalScopeTimer;
pub use config::{Config, DurationFormat};
pub use error::SinkError;
pub use format::{
    ElapsedFormatter, FixedBuf, format_elapsed, format_wall_clock, write_auto, write_micros,
    write_millis, write_nanos, write_seconds, write_wall_clock,
};
pub use label::{DEFAULT_LABEL, Label};
pub use thread_id::{assigned_thread_number, thread_number};
pub use timer::{LINE_CAPACITY, ScopeTimer};

#[doc(hidden)]
pub mod __private {
    /// Turns `path::to::func::__here` into `path::to::func`, dropping closure segments.
    pub fn strip_function_name(name: &'static str) -> &'static str {
        let mut name = name.strip_suffix("::__here").unwrap_or(name);
        while let Some(outer) = name.strip_suffix("::{{closure}}") {
            name = outer;
        }
        name
    }
}
