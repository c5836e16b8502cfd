//! Shared helpers for the integration tests.
//!
//! The configuration cache and the sink are process-wide, so every test that
//! touches them holds [`serial`] for its whole body.

use std::sync::{Mutex, MutexGuard, PoisonError};

use scopetimer_core::config::{self, Config};
use scopetimer_core::sink::{self, MemorySink};

static SERIAL: Mutex<()> = Mutex::new(());

pub fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Installs a configuration built from `vars` and a fresh in-memory sink.
pub fn capture(vars: &[(&str, &str)]) -> MemorySink {
    config::install(Config::from_vars(vars.iter().copied()));
    let captured = MemorySink::new();
    sink::set_sink(captured.clone());
    captured
}

/// One parsed log line.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub label: String,
    pub tid: u32,
    pub location: String,
    pub start: String,
    pub end: String,
    pub elapsed_value: f64,
    pub elapsed_unit: String,
}

/// Parses `[label] TID=001 | where | start=... | end=... | elapsed=...`.
pub fn parse_line(line: &str) -> Option<Record> {
    let rest = line.strip_prefix('[')?;
    let (label, rest) = rest.split_once("] TID=")?;
    let mut fields = rest.split(" | ");
    let tid_text = fields.next()?;
    let location = fields.next()?;
    let start = fields.next()?.strip_prefix("start=")?;
    let end = fields.next()?.strip_prefix("end=")?;
    let elapsed = fields.next()?.strip_prefix("elapsed=")?;
    if fields.next().is_some() || tid_text.len() < 3 {
        return None;
    }

    let unit_at = elapsed.find(|c: char| c.is_ascii_alphabetic())?;
    let (value, unit) = elapsed.split_at(unit_at);
    if !matches!(unit, "s" | "ms" | "us" | "ns") {
        return None;
    }
    if !is_timestamp(start) || !is_timestamp(end) {
        return None;
    }

    Some(Record {
        label: label.to_owned(),
        tid: tid_text.parse().ok()?,
        location: location.to_owned(),
        start: start.to_owned(),
        end: end.to_owned(),
        elapsed_value: value.parse().ok()?,
        elapsed_unit: unit.to_owned(),
    })
}

/// `YYYY-MM-DD HH:MM:SS.mmm`
fn is_timestamp(text: &str) -> bool {
    const SHAPE: &[u8] = b"dddd-dd-dd dd:dd:dd.ddd";
    text.len() == SHAPE.len()
        && text.bytes().zip(SHAPE).all(|(b, s)| match s {
            b'd' => b.is_ascii_digit(),
            other => b == *other,
        })
}

/// Parses every line, panicking with the offending text on the first malformed one.
#[allow(dead_code)]
pub fn records(captured: &MemorySink) -> Vec<Record> {
    captured
        .lines()
        .iter()
        .map(|line| parse_line(line).unwrap_or_else(|| panic!("malformed line: {line:?}")))
        .collect()
}
