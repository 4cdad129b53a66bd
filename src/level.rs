//! Log level representation with parsing, display, and colorization.
//!
//! Level text found in log lines is matched case-insensitively against the
//! canonical names plus aliases used by common logging frameworks. Text that
//! matches nothing is read as [`Level::Info`] rather than rejected.

use std::collections::HashMap;
use std::fmt;

use owo_colors::Style;
use serde::Serialize;

/// Canonical log level enumeration.
///
/// Ordered by severity (ascending) via [`Ord`]:
/// `Debug < Info < Warn < Error < Fatal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    /// Every level, least severe first.
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
    ];

    /// Upper-case canonical name (e.g., `"WARN"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    /// 5-character display badge for the level, right-justified (e.g., `" INFO"`, `"ERROR"`).
    pub const fn badge(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => " INFO",
            Self::Warn => " WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    /// Returns the [`Style`] for this level's badge when colors are enabled.
    pub const fn style(self) -> Style {
        match self {
            Self::Debug => Style::new().blue().bold(),
            Self::Info => Style::new().green().bold(),
            Self::Warn => Style::new().yellow().bold(),
            Self::Error => Style::new().red().bold(),
            Self::Fatal => Style::new().magenta().bold(),
        }
    }

    /// Parse a string into a [`Level`], case-insensitive.
    ///
    /// Returns `None` for unrecognized strings. `trace` folds into
    /// [`Debug`](Self::Debug) since there is no finer level.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "debug" | "dbg" | "trace" | "trc" | "verbose" => Some(Self::Debug),
            "info" | "inf" | "information" | "notice" => Some(Self::Info),
            "warn" | "warning" | "wrn" => Some(Self::Warn),
            "error" | "err" => Some(Self::Error),
            "fatal" | "critical" | "crit" | "panic" | "emerg" | "emergency" | "alert" => {
                Some(Self::Fatal)
            }
            _ => None,
        }
    }

    /// Read level text from a log line.
    ///
    /// Custom aliases (keys lower-case) are consulted first, then
    /// [`from_str_loose`](Self::from_str_loose). Unknown text becomes
    /// [`Info`](Self::Info).
    pub fn from_log_text(s: &str, custom_aliases: Option<&HashMap<String, Self>>) -> Self {
        if let Some(aliases) = custom_aliases
            && let Some(level) = aliases.get(&s.trim().to_lowercase())
        {
            return *level;
        }
        Self::from_str_loose(s).unwrap_or(Self::Info)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
