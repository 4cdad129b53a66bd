//! Timestamp parsing and formatting for plain-text log lines.
//!
//! [`TimestampInterpreter`] tries a fixed, ordered list of textual formats.
//! Zone-less times are read as UTC. When nothing matches, the permissive
//! mode substitutes the current time and says so through
//! [`TimestampOutcome::Fallback`]; the strict mode reports a
//! [`TimestampParseError`] instead.

use std::fmt;

use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use serde::{Serialize, Serializer};

use crate::error::TimestampParseError;

/// A point in time extracted from a log line, with up to nanosecond precision.
///
/// Ordering and equality follow the wrapped [`jiff::Timestamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    pub value: jiff::Timestamp,
}

impl Timestamp {
    /// The current wall-clock time.
    pub fn now() -> Self {
        Self {
            value: jiff::Timestamp::now(),
        }
    }

    /// Interpret a civil date-time as UTC.
    pub fn from_civil(dt: DateTime) -> Option<Self> {
        let zoned = dt.to_zoned(TimeZone::UTC).ok()?;
        Some(Self {
            value: zoned.timestamp(),
        })
    }

    /// Format the timestamp for display using the given strftime-compatible format string.
    pub fn format_with(&self, format: &str) -> String {
        let zdt = self.value.to_zoned(TimeZone::UTC);
        zdt.strftime(format).to_string()
    }

    /// Format the timestamp using the default format (`YYYY-MM-DD HH:MM:SS`).
    pub fn format_display(&self) -> String {
        self.format_with(DEFAULT_DISPLAY_FORMAT)
    }
}

/// Display format used by [`Timestamp`]'s [`fmt::Display`] impl.
pub const DEFAULT_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_display())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.value)
    }
}

/// The textual timestamp layouts understood by [`TimestampInterpreter`],
/// in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampFormat {
    /// `YYYY-MM-DD HH:MM:SS`
    SpaceSeparated,
    /// `YYYY-MM-DDTHH:MM:SS`
    TSeparated,
    /// `YYYY-MM-DD HH:MM:SS,mmm`
    CommaMillis,
    /// `YYYY-MM-DDTHH:MM:SS.mmm`, optionally followed by `Z`
    IsoMillis,
    /// `Mon DD HH:MM:SS` (syslog, no year)
    Syslog,
}

impl TimestampFormat {
    pub const ORDERED: [Self; 5] = [
        Self::SpaceSeparated,
        Self::TSeparated,
        Self::CommaMillis,
        Self::IsoMillis,
        Self::Syslog,
    ];

    /// Parse `s` in this format. `year` fills in formats that carry none.
    fn parse(self, s: &str, year: i16) -> Option<Timestamp> {
        let dt = match self {
            Self::SpaceSeparated => DateTime::strptime("%Y-%m-%d %H:%M:%S", s).ok()?,
            Self::TSeparated => DateTime::strptime("%Y-%m-%dT%H:%M:%S", s).ok()?,
            Self::CommaMillis => {
                let (head, frac) = s.split_once(',')?;
                if frac.is_empty() || frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit())
                {
                    return None;
                }
                DateTime::strptime("%Y-%m-%d %H:%M:%S%.f", format!("{head}.{frac}")).ok()?
            }
            Self::IsoMillis => {
                let s = s.strip_suffix('Z').unwrap_or(s);
                DateTime::strptime("%Y-%m-%dT%H:%M:%S%.f", s).ok()?
            }
            Self::Syslog => {
                let mut parts = s.split_whitespace();
                let (month, day, time) = (parts.next()?, parts.next()?, parts.next()?);
                if parts.next().is_some() || day.len() > 2 {
                    return None;
                }
                let normalized = format!("{year} {month} {day:0>2} {time}");
                DateTime::strptime("%Y %b %d %H:%M:%S", normalized).ok()?
            }
        };
        Timestamp::from_civil(dt)
    }
}

/// How [`TimestampInterpreter`] reacts to text no format accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampMode {
    /// Substitute the current time.
    #[default]
    Permissive,
    /// Report a [`TimestampParseError`].
    Strict,
}

/// Result of interpreting timestamp text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampOutcome {
    /// One of the known formats matched.
    Parsed(Timestamp),
    /// Nothing matched; this is the wall-clock time at interpretation.
    Fallback(Timestamp),
}

impl TimestampOutcome {
    pub const fn timestamp(&self) -> Timestamp {
        match self {
            Self::Parsed(ts) | Self::Fallback(ts) => *ts,
        }
    }

    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Converts timestamp text into a [`Timestamp`], trying
/// [`TimestampFormat::ORDERED`] and keeping the first success.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampInterpreter {
    mode: TimestampMode,
    /// Year given to syslog timestamps; `None` means the current UTC year.
    reference_year: Option<i16>,
}

impl TimestampInterpreter {
    pub const fn new(mode: TimestampMode) -> Self {
        Self {
            mode,
            reference_year: None,
        }
    }

    /// Pin the year used for formats without one.
    #[must_use]
    pub const fn with_reference_year(mut self, year: i16) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// Switch the mode, keeping the reference year.
    #[must_use]
    pub const fn with_mode(mut self, mode: TimestampMode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn mode(&self) -> TimestampMode {
        self.mode
    }

    /// Try every known format, returning `None` when all of them fail.
    pub fn parse_known(&self, s: &str) -> Option<Timestamp> {
        let s = s.trim();
        let year = self.year();
        TimestampFormat::ORDERED
            .iter()
            .find_map(|format| format.parse(s, year))
    }

    /// Interpret `s` according to the configured [`TimestampMode`].
    pub fn interpret(&self, s: &str) -> Result<TimestampOutcome, TimestampParseError> {
        if let Some(ts) = self.parse_known(s) {
            return Ok(TimestampOutcome::Parsed(ts));
        }
        match self.mode {
            TimestampMode::Permissive => {
                tracing::trace!(text = s, "unrecognized timestamp, using current time");
                Ok(TimestampOutcome::Fallback(Timestamp::now()))
            }
            TimestampMode::Strict => Err(TimestampParseError {
                text: s.to_string(),
            }),
        }
    }

    fn year(&self) -> i16 {
        self.reference_year
            .unwrap_or_else(|| jiff::Timestamp::now().to_zoned(TimeZone::UTC).year())
    }
}
