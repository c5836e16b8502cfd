//! Elapsed-time and wall-clock rendering into bounded buffers.

use std::fmt::{self, Write};

use chrono::{DateTime, Datelike as _, Local, Timelike as _};

use crate::config::DurationFormat;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Capacity of a timestamp or elapsed-value buffer.
pub const FIELD_CAPACITY: usize = 32;

/// Renders an elapsed nanosecond count.
pub type ElapsedFormatter = fn(u64, &mut dyn Write) -> fmt::Result;

/// `{sec}.{ms:03}s`
pub fn write_seconds(ns: u64, out: &mut dyn Write) -> fmt::Result {
    let sec = ns / NANOS_PER_SEC;
    let ms = (ns / NANOS_PER_MILLI) % 1_000;
    write!(out, "{sec}.{ms:03}s")
}

/// `{ms}.{us:03}ms`
pub fn write_millis(ns: u64, out: &mut dyn Write) -> fmt::Result {
    let ms = ns / NANOS_PER_MILLI;
    let us = (ns / NANOS_PER_MICRO) % 1_000;
    write!(out, "{ms}.{us:03}ms")
}

/// `{us}.{ns:03}us`
pub fn write_micros(ns: u64, out: &mut dyn Write) -> fmt::Result {
    let us = ns / NANOS_PER_MICRO;
    let rem = ns % NANOS_PER_MICRO;
    write!(out, "{us}.{rem:03}us")
}

/// `{ns}ns`
pub fn write_nanos(ns: u64, out: &mut dyn Write) -> fmt::Result {
    write!(out, "{ns}ns")
}

/// Picks the largest unit the value reaches.
pub fn write_auto(ns: u64, out: &mut dyn Write) -> fmt::Result {
    if ns >= NANOS_PER_SEC {
        write_seconds(ns, out)
    } else if ns >= NANOS_PER_MILLI {
        write_millis(ns, out)
    } else if ns >= NANOS_PER_MICRO {
        write_micros(ns, out)
    } else {
        write_nanos(ns, out)
    }
}

/// Renders `ns` in the given unit.
pub fn format_elapsed(ns: u64, format: DurationFormat) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    format.formatter()(ns, &mut out).unwrap_or_default();
    out
}

/// `YYYY-MM-DD HH:MM:SS.mmm` in local time.
pub fn write_wall_clock(at: &DateTime<Local>, out: &mut dyn Write) -> fmt::Result {
    // A leap second reports 1000..=1999 ms; keep the field three digits wide.
    let millis = at.timestamp_subsec_millis().min(999);
    write!(
        out,
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{millis:03}",
        at.year(),
        at.month(),
        at.day(),
        at.hour(),
        at.minute(),
        at.second(),
    )
}

pub fn format_wall_clock(at: &DateTime<Local>) -> String {
    let mut out = String::new();
    write_wall_clock(at, &mut out).unwrap_or_default();
    out
}

/// Fixed-capacity text buffer living on the stack.
///
/// Writes past the capacity are cut at a character boundary instead of
/// failing, so formatting never errors and never allocates. After the first
/// cut every further write is dropped.
pub struct FixedBuf<const N: usize> {
    bytes: [u8; N],
    len: usize,
    truncated: bool,
}

impl<const N: usize> FixedBuf<N> {
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
            truncated: false,
        }
    }

    pub fn as_str(&self) -> &str {
        // Only whole characters are ever copied in.
        std::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.truncated = false;
    }

    /// Appends `\n`, dropping trailing characters if that is the only way to fit it.
    pub fn terminate_line(&mut self) {
        if N == 0 {
            return;
        }
        if self.len == N {
            let mut cut = N - 1;
            while cut > 0 && is_continuation(self.bytes[cut]) {
                cut -= 1;
            }
            self.len = cut;
            self.truncated = true;
        }
        self.bytes[self.len] = b'\n';
        self.len += 1;
    }
}

impl<const N: usize> Default for FixedBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Write for FixedBuf<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        // Once cut, later fields must not fill the leftover bytes.
        if self.truncated {
            return Ok(());
        }
        let room = N - self.len;
        let take = if s.len() <= room {
            s.len()
        } else {
            self.truncated = true;
            let mut end = room;
            while !s.is_char_boundary(end) {
                end -= 1;
            }
            end
        };
        self.bytes[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}

impl<const N: usize> fmt::Debug for FixedBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedBuf")
            .field("text", &self.as_str())
            .field("truncated", &self.truncated)
            .finish()
    }
}

fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}
