//! The structured log entry produced by the line parser.

use std::fmt;

use serde::Serialize;

use crate::level::Level;
use crate::timestamp::Timestamp;

/// Source label used when a pattern has no source group.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// One parsed log line.
///
/// Fields are private and only readable after construction. Two records
/// are equal when all four fields are equal; sorting by time goes through
/// [`LogRecord::timestamp`] with a stable sort, see
/// [`analyzer::sort_by_timestamp`](crate::analyzer::sort_by_timestamp).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LogRecord {
    timestamp: Timestamp,
    level: Level,
    source: String,
    message: String,
}

impl LogRecord {
    /// Build a record. An empty `source` is stored as [`UNKNOWN_SOURCE`].
    pub fn new(
        timestamp: Timestamp,
        level: Level,
        source: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let mut source = source.into();
        if source.is_empty() {
            source = UNKNOWN_SOURCE.to_string();
        }
        Self {
            timestamp,
            level,
            source,
            message: message.into(),
        }
    }

    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub const fn level(&self) -> Level {
        self.level
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Renders as `[timestamp] [LEVEL] [source] message`.
impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}] [{}] {}",
            self.timestamp, self.level, self.source, self.message
        )
    }
}
