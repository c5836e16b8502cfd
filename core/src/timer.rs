use std::fmt::Write as _;
use std::time::Instant;

use chrono::{DateTime, Local};

use crate::config;
use crate::format::{ElapsedFormatter, FIELD_CAPACITY, FixedBuf, write_wall_clock};
use crate::label::Label;
use crate::sink;
use crate::thread_id::thread_number;

/// Capacity of one formatted log line, newline included.
pub const LINE_CAPACITY: usize = 512;

/// Measures the time between its construction and its drop.
///
/// Dropping an active timer appends one line to the process-wide sink:
///
/// ```text
/// [label] TID=001 | where | start=2025-08-13 11:57:21.832 | end=2025-08-13 11:57:35.885 | elapsed=14.052s
/// ```
///
/// When timing is disabled through `SCOPE_TIMER`, construction only checks
/// the cached flag and the drop does nothing. Neither construction nor drop
/// can fail or panic on I/O problems.
///
/// Usually created through [`scope_timer!`](crate::scope_timer), which
/// fills in the enclosing function as `where`.
#[must_use = "the scope is timed until this value is dropped"]
#[derive(Debug)]
pub struct ScopeTimer<'a> {
    active: Option<Active<'a>>,
}

#[derive(Debug)]
struct Active<'a> {
    location: &'a str,
    label: Label<'a>,
    thread: u32,
    start: Instant,
    start_wall: DateTime<Local>,
}

impl<'a> ScopeTimer<'a> {
    /// Starts timing `location`, unless timing is disabled for the process.
    ///
    /// `label` is converted only when timing is enabled.
    pub fn new(location: &'a str, label: impl Into<Label<'a>>) -> Self {
        if !config::is_enabled() {
            return Self::disabled();
        }
        Self {
            active: Some(Active {
                location,
                label: label.into(),
                thread: thread_number(),
                start: Instant::now(),
                start_wall: Local::now(),
            }),
        }
    }

    /// A timer that records nothing.
    pub fn disabled() -> Self {
        Self { active: None }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn label(&self) -> Option<&Label<'a>> {
        self.active.as_ref().map(|active| &active.label)
    }

    pub fn location(&self) -> Option<&'a str> {
        self.active.as_ref().map(|active| active.location)
    }

    pub fn thread_number(&self) -> Option<u32> {
        self.active.as_ref().map(|active| active.thread)
    }
}

impl Drop for ScopeTimer<'_> {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            active.finish();
        }
    }
}

impl Active<'_> {
    fn finish(self) {
        let end = Instant::now();
        let end_wall = Local::now();
        let elapsed = end.saturating_duration_since(self.start);
        let elapsed_ns = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);

        let (flush_interval, formatter) = config::emit_settings();
        let mut line = FixedBuf::<LINE_CAPACITY>::new();
        self.render(&mut line, &end_wall, elapsed_ns, formatter);
        sink::emit(line.as_bytes(), flush_interval);
    }

    fn render(
        &self,
        line: &mut FixedBuf<LINE_CAPACITY>,
        end_wall: &DateTime<Local>,
        elapsed_ns: u64,
        formatter: ElapsedFormatter,
    ) {
        let mut start = FixedBuf::<FIELD_CAPACITY>::new();
        let mut end = FixedBuf::<FIELD_CAPACITY>::new();
        let mut elapsed = FixedBuf::<FIELD_CAPACITY>::new();
        // FixedBuf writes cannot fail; overflow is truncated.
        write_wall_clock(&self.start_wall, &mut start).unwrap_or_default();
        write_wall_clock(end_wall, &mut end).unwrap_or_default();
        formatter(elapsed_ns, &mut elapsed).unwrap_or_default();

        write!(
            line,
            "[{}] TID={:03} | {} | start={} | end={} | elapsed={}",
            self.label,
            self.thread,
            self.location,
            start.as_str(),
            end.as_str(),
            elapsed.as_str(),
        )
        .unwrap_or_default();
        line.terminate_line();
    }
}
