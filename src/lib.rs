//! `logscan`: Parse, merge and analyze plain-text log files.
//!
//! This library provides the parsing and analysis core of the `logscan` CLI.
//! Lines are matched against an ordered catalog of regular-expression
//! patterns (custom patterns first, then five built-in formats), turned into
//! [`LogRecord`]s, merged across files in timestamp order, and then filtered
//! or aggregated.
//!
//! # Example
//!
//! ```
//! use logscan::{Level, LogLineParser, analyzer};
//!
//! let mut parser = LogLineParser::new();
//! let records: Vec<_> = [
//!     "2024-01-15 10:00:00 [INFO] [auth] user login",
//!     "2024-01-15 09:59:59 [ERROR] [db] connection lost",
//!     "not a log line at all",
//! ]
//! .into_iter()
//! .filter_map(|line| parser.parse_line(line))
//! .collect();
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(parser.statistics().error_lines, 1);
//! assert_eq!(analyzer::filter_by_level(&records, Level::Error)[0].source(), "db");
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod level;
pub mod parser;
pub mod pattern;
pub mod record;
pub mod timestamp;

// Re-export primary API types for convenience.
pub use config::Config;
pub use error::{LogscanError, PatternError, TimestampParseError};
pub use formatter::{format_record, format_statistics};
pub use level::Level;
pub use parser::{BatchOutcome, FileFailure, LogLineParser, ParseStatistics, parse_files_parallel};
pub use pattern::{PatternCatalog, PatternDescriptor};
pub use record::LogRecord;
pub use timestamp::{Timestamp, TimestampInterpreter, TimestampMode, TimestampOutcome};
