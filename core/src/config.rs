//! Process-wide timer configuration.
//!
//! Settings come from the environment the first time any of them is needed and
//! stay cached for the rest of the process:
//!
//! - `SCOPE_TIMER`: `off`, `false`, `no` or `0` (any case) disables timing.
//! - `SCOPE_TIMER_DIR`: directory holding `ScopeTimer.log`, defaults to the
//!   platform temp directory.
//! - `SCOPE_TIMER_FLUSH_N`: lines between forced flushes, `1..=1_000_000`,
//!   defaults to 256.
//! - `SCOPE_TIMER_FORMAT`: `seconds`, `millis`, `micros` or `nanos` (any case),
//!   anything else selects [`DurationFormat::Auto`].
//!
//! Invalid values never raise an error; they fall back to the defaults.

use std::ffi::OsString;
use std::fmt::Display;
use std::path::{MAIN_SEPARATOR, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde::Deserialize;
use tracing::trace;

use crate::format::{self, ElapsedFormatter};

/// Default number of emitted lines between forced flushes.
pub const DEFAULT_FLUSH_INTERVAL: u32 = 256;

/// Largest accepted `SCOPE_TIMER_FLUSH_N`.
pub const MAX_FLUSH_INTERVAL: u32 = 1_000_000;

/// Name of the log file created inside the log directory.
pub const LOG_FILE_NAME: &str = "ScopeTimer.log";

const DISABLING_VALUES: [&str; 4] = ["off", "false", "no", "0"];

/// Unit used when rendering the elapsed field of a log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DurationFormat {
    /// Largest unit the value reaches: seconds, millis, micros, then nanos.
    #[default]
    Auto,
    Seconds,
    Millis,
    Micros,
    Nanos,
}

impl DurationFormat {
    /// Case-insensitive parse; unknown or empty input selects `Auto`.
    pub fn parse_lenient(value: &str) -> Self {
        if value.eq_ignore_ascii_case("seconds") {
            Self::Seconds
        } else if value.eq_ignore_ascii_case("millis") {
            Self::Millis
        } else if value.eq_ignore_ascii_case("micros") {
            Self::Micros
        } else if value.eq_ignore_ascii_case("nanos") {
            Self::Nanos
        } else {
            Self::Auto
        }
    }

    /// The formatter for this unit, resolved once so rendering does not branch on the format.
    pub fn formatter(self) -> ElapsedFormatter {
        match self {
            Self::Auto => format::write_auto,
            Self::Seconds => format::write_seconds,
            Self::Millis => format::write_millis,
            Self::Micros => format::write_micros,
            Self::Nanos => format::write_nanos,
        }
    }
}

impl Display for DurationFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Seconds => write!(f, "seconds"),
            Self::Millis => write!(f, "millis"),
            Self::Micros => write!(f, "micros"),
            Self::Nanos => write!(f, "nanos"),
        }
    }
}

/// Validated settings. Every field has already been defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    enabled: bool,
    log_directory: String,
    flush_interval: u32,
    duration_format: DurationFormat,
}

// Raw values as they appear in the environment, before validation.
// Keys are renamed to single words by `raw_key` first.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    enabled: Option<String>,
    dir: Option<String>,
    flush: Option<String>,
    format: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_raw(RawConfig::default())
    }
}

impl Config {
    /// Reads the `SCOPE_TIMER*` variables of the current process.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars_os().filter_map(|(key, value)| {
            let key = key.into_string().ok()?;
            raw_key(&key).map(|_| (key, lossy(value)))
        }))
    }

    /// Builds a configuration from explicit key/value pairs, using the same
    /// parsing rules as [`Config::from_env`]. Unrelated keys are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let vars: Vec<(String, String)> = vars
            .into_iter()
            .filter_map(|(key, value)| {
                let key = raw_key(key.as_ref())?;
                Some((key.to_owned(), value.as_ref().to_owned()))
            })
            .collect();

        let parsed: Result<RawConfig, _> = serde_env::from_iter(vars);
        let raw = parsed.unwrap_or_else(|err| {
            trace!(error = %err, "unreadable scope timer environment, using defaults");
            RawConfig::default()
        });
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Self {
        let RawConfig {
            enabled,
            dir,
            flush,
            format,
        } = raw;

        Self {
            enabled: enabled.as_deref().is_none_or(parse_enabled),
            log_directory: normalize_directory(dir.as_deref()),
            flush_interval: flush
                .as_deref()
                .and_then(parse_flush_interval)
                .unwrap_or(DEFAULT_FLUSH_INTERVAL),
            duration_format: format
                .as_deref()
                .map(DurationFormat::parse_lenient)
                .unwrap_or_default(),
        }
    }

    /// Returns a copy with the log directory replaced and normalized.
    pub fn with_log_directory(mut self, dir: impl AsRef<str>) -> Self {
        self.log_directory = normalize_directory(Some(dir.as_ref()));
        self
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Log directory, always terminated by a path separator.
    pub fn log_directory(&self) -> &str {
        &self.log_directory
    }

    pub fn log_file_path(&self) -> PathBuf {
        PathBuf::from(format!("{}{LOG_FILE_NAME}", self.log_directory))
    }

    pub fn flush_interval(&self) -> u32 {
        self.flush_interval
    }

    pub fn duration_format(&self) -> DurationFormat {
        self.duration_format
    }
}

fn raw_key(key: &str) -> Option<&'static str> {
    match key {
        "SCOPE_TIMER" => Some("ENABLED"),
        "SCOPE_TIMER_DIR" => Some("DIR"),
        "SCOPE_TIMER_FLUSH_N" => Some("FLUSH"),
        "SCOPE_TIMER_FORMAT" => Some("FORMAT"),
        _ => None,
    }
}

fn lossy(value: OsString) -> String {
    value
        .into_string()
        .unwrap_or_else(|raw| raw.to_string_lossy().into_owned())
}

fn parse_enabled(value: &str) -> bool {
    !DISABLING_VALUES
        .iter()
        .any(|off| value.eq_ignore_ascii_case(off))
}

// Only a fully consumed run of ASCII digits in range is accepted.
fn parse_flush_interval(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value
        .parse::<u32>()
        .ok()
        .filter(|n| (1..=MAX_FLUSH_INTERVAL).contains(n))
}

fn normalize_directory(dir: Option<&str>) -> String {
    let mut dir = match dir {
        Some(dir) if !dir.is_empty() => dir.to_owned(),
        _ => std::env::temp_dir().to_string_lossy().into_owned(),
    };
    if !dir.ends_with('/') && !dir.ends_with(MAIN_SEPARATOR) {
        dir.push(MAIN_SEPARATOR);
    }
    dir
}

static CURRENT: RwLock<Option<Config>> = RwLock::new(None);

fn with_current<R>(f: impl FnOnce(&Config) -> R) -> R {
    {
        let guard = CURRENT.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(config) = guard.as_ref() {
            return f(config);
        }
    }
    let mut guard = CURRENT.write().unwrap_or_else(PoisonError::into_inner);
    f(guard.get_or_insert_with(Config::from_env))
}

/// Whether timing is enabled for this process.
pub fn is_enabled() -> bool {
    with_current(Config::enabled)
}

/// Directory the default sink writes into, terminated by a separator.
pub fn log_directory() -> String {
    with_current(|config| config.log_directory.clone())
}

/// Full path of the default log file.
pub fn log_file_path() -> PathBuf {
    with_current(Config::log_file_path)
}

/// Lines between forced flushes.
pub fn flush_interval() -> u32 {
    with_current(Config::flush_interval)
}

/// Unit used for the elapsed field.
pub fn duration_format() -> DurationFormat {
    with_current(Config::duration_format)
}

/// Flush cadence and elapsed formatter in one cache lookup.
pub(crate) fn emit_settings() -> (u32, ElapsedFormatter) {
    with_current(|config| (config.flush_interval, config.duration_format.formatter()))
}

/// Replaces the cached configuration.
///
/// Meant for tests and embedders that configure timing without the
/// environment. Timers already running keep the enabled state they latched.
pub fn install(config: Config) {
    *CURRENT.write().unwrap_or_else(PoisonError::into_inner) = Some(config);
}

/// Forgets the cached configuration so the next access re-reads the environment.
pub fn reset() {
    *CURRENT.write().unwrap_or_else(PoisonError::into_inner) = None;
}
