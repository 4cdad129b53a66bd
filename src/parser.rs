//! Line parser with pattern dispatch and parse statistics.
//!
//! [`LogLineParser`] walks its [`PatternCatalog`] for every line, keeping the
//! first pattern that matches the whole line. Lines that match nothing are
//! dropped and counted; blank lines are dropped and counted separately.
//! Nothing at line level is ever an error for the caller. Only files that
//! cannot be opened or read surface as [`LogscanError::Io`].

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::analyzer;
use crate::error::{LogscanError, PatternError};
use crate::level::Level;
use crate::pattern::PatternCatalog;
use crate::record::{LogRecord, UNKNOWN_SOURCE};
use crate::timestamp::{TimestampInterpreter, TimestampMode};

/// Counters kept by one [`LogLineParser`].
///
/// Every line lands in exactly one of `parsed_lines`, `error_lines` and
/// `blank_lines`, so those three always add up to `total_lines`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStatistics {
    pub total_lines: u64,
    pub parsed_lines: u64,
    /// Non-blank lines no pattern matched, plus strict-mode timestamp misses.
    pub error_lines: u64,
    pub blank_lines: u64,
    /// Parsed lines whose timestamp was replaced by the current time.
    pub fallback_timestamps: u64,
}

impl ParseStatistics {
    /// Percentage of all lines (blank ones included) that produced a record.
    ///
    /// `0.0` when no line has been seen.
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        if self.total_lines == 0 {
            return 0.0;
        }
        self.parsed_lines as f64 / self.total_lines as f64 * 100.0
    }

    /// Add another parser's counters to these.
    pub fn merge(&mut self, other: &Self) {
        self.total_lines += other.total_lines;
        self.parsed_lines += other.parsed_lines;
        self.error_lines += other.error_lines;
        self.blank_lines += other.blank_lines;
        self.fallback_timestamps += other.fallback_timestamps;
    }
}

/// A file in a batch that could not be parsed.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: LogscanError,
}

/// Records from a multi-file batch, plus the files that were skipped.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// All records, stably sorted by timestamp.
    pub records: Vec<LogRecord>,
    pub failures: Vec<FileFailure>,
}

/// Turns raw lines into [`LogRecord`]s.
///
/// Not meant for concurrent use: parallel callers give each worker its own
/// parser (see [`parse_files_parallel`]) and merge the statistics.
#[derive(Debug, Clone, Default)]
pub struct LogLineParser {
    catalog: PatternCatalog,
    interpreter: TimestampInterpreter,
    level_aliases: Option<HashMap<String, Level>>,
    stats: ParseStatistics,
}

impl LogLineParser {
    /// A parser using only the built-in patterns and permissive timestamps.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: PatternCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn with_interpreter(mut self, interpreter: TimestampInterpreter) -> Self {
        self.interpreter = interpreter;
        self
    }

    #[must_use]
    pub fn with_timestamp_mode(mut self, mode: TimestampMode) -> Self {
        self.interpreter = self.interpreter.with_mode(mode);
        self
    }

    /// Extra level names (lower-case keys) checked before the built-in aliases.
    #[must_use]
    pub fn with_level_aliases(mut self, aliases: HashMap<String, Level>) -> Self {
        self.level_aliases = Some(aliases);
        self
    }

    /// Register a custom pattern; see [`PatternCatalog::add_custom_pattern`].
    pub fn add_custom_pattern(&mut self, pattern: &str) -> Result<(), PatternError> {
        self.catalog.add_custom_pattern(pattern)
    }

    pub const fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    pub const fn timestamp_mode(&self) -> TimestampMode {
        self.interpreter.mode()
    }

    pub const fn statistics(&self) -> &ParseStatistics {
        &self.stats
    }

    pub fn success_rate(&self) -> f64 {
        self.stats.success_rate()
    }

    /// A parser with the same patterns and settings but zeroed statistics.
    #[must_use]
    pub fn fresh(&self) -> Self {
        Self {
            stats: ParseStatistics::default(),
            ..self.clone()
        }
    }

    /// Parse one line.
    ///
    /// Returns `None` for blank lines, lines no pattern matches, and (in
    /// strict mode) lines whose timestamp text is unrecognized.
    pub fn parse_line(&mut self, line: &str) -> Option<LogRecord> {
        self.stats.total_lines += 1;

        if line.trim().is_empty() {
            self.stats.blank_lines += 1;
            return None;
        }

        let Some((_, fields)) = self.catalog.match_line(line) else {
            self.stats.error_lines += 1;
            return None;
        };

        let outcome = match self.interpreter.interpret(fields.timestamp) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(error = %e, "dropping line with unrecognized timestamp");
                self.stats.error_lines += 1;
                return None;
            }
        };
        if outcome.is_fallback() {
            self.stats.fallback_timestamps += 1;
        }

        let level = Level::from_log_text(fields.level, self.level_aliases.as_ref());
        let source = fields.source.unwrap_or(UNKNOWN_SOURCE);

        self.stats.parsed_lines += 1;
        Some(LogRecord::new(outcome.timestamp(), level, source, fields.message))
    }

    /// Parse every line from `reader`, keeping records in input order.
    ///
    /// Line endings (`\n` or `\r\n`) are stripped; invalid UTF-8 is decoded
    /// lossily.
    pub fn parse_reader<R: BufRead>(&mut self, reader: R) -> io::Result<Vec<LogRecord>> {
        let mut records = Vec::new();
        for chunk in reader.split(b'\n') {
            let mut bytes = chunk?;
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            let line = String::from_utf8_lossy(&bytes);
            if let Some(record) = self.parse_line(&line) {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Parse a single file, keeping records in file order.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<LogRecord>, LogscanError> {
        let path = path.as_ref();
        let io_error = |source| LogscanError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_error)?;
        let records = self.parse_reader(BufReader::new(file)).map_err(io_error)?;
        tracing::debug!(path = %path.display(), records = records.len(), "parsed file");
        Ok(records)
    }

    /// Parse several files into one time-ordered sequence.
    ///
    /// Statistics accumulate across files. A file that fails is logged,
    /// recorded in [`BatchOutcome::failures`], and skipped.
    pub fn parse_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for path in paths {
            match self.parse_file(path) {
                Ok(records) => outcome.records.extend(records),
                Err(error) => outcome.failures.push(skip_file(path.as_ref(), error)),
            }
        }
        analyzer::sort_by_timestamp(&mut outcome.records);
        outcome
    }
}

fn skip_file(path: &Path, error: LogscanError) -> FileFailure {
    tracing::warn!(path = %path.display(), error = %error, "skipping file");
    FileFailure {
        path: path.to_path_buf(),
        error,
    }
}

/// Parse files on the rayon pool, one fresh copy of `template` per file.
///
/// Produces the same records, order and failures as
/// [`LogLineParser::parse_files`] on `template`; the returned statistics are
/// the sum over all workers. `template` itself is left untouched.
pub fn parse_files_parallel<P: AsRef<Path> + Sync>(
    template: &LogLineParser,
    paths: &[P],
) -> (BatchOutcome, ParseStatistics) {
    let results: Vec<_> = paths
        .par_iter()
        .map(|path| {
            let mut worker = template.fresh();
            let result = worker.parse_file(path);
            (result, worker.stats)
        })
        .collect();

    let mut outcome = BatchOutcome::default();
    let mut stats = ParseStatistics::default();
    for (path, (result, worker_stats)) in paths.iter().zip(results) {
        stats.merge(&worker_stats);
        match result {
            Ok(records) => outcome.records.extend(records),
            Err(error) => outcome.failures.push(skip_file(path.as_ref(), error)),
        }
    }
    analyzer::sort_by_timestamp(&mut outcome.records);
    (outcome, stats)
}
