//! Error types for `logscan`.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Line-level parse misses
//! are not errors at all; they only show up in
//! [`ParseStatistics`](crate::parser::ParseStatistics).

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the library and the `logscan` binary.
///
/// Maps to exit codes: [`Config`](Self::Config) and [`Toml`](Self::Toml) → exit 1,
/// [`Io`](Self::Io) → exit 2. [`Pattern`](Self::Pattern) is reported as a
/// warning and parsing goes on without that pattern.
#[derive(Debug, Error)]
pub enum LogscanError {
    /// Configuration error (invalid flag value, unreadable config file).
    #[error("configuration error: {0}")]
    Config(String),

    /// A log file could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A custom line pattern was refused.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// TOML deserialization error.
    #[error("config file error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Reasons a custom line pattern is refused by the catalog.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The pattern is not a valid regular expression.
    #[error("invalid pattern `{pattern}`: {source}")]
    Syntax {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The pattern cannot yield timestamp, level and message.
    #[error("pattern `{pattern}` has {groups} capture group(s); at least 3 are required")]
    TooFewGroups { pattern: String, groups: usize },
}

/// A timestamp that none of the known formats accept (strict mode only).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized timestamp `{text}`")]
pub struct TimestampParseError {
    pub text: String,
}
