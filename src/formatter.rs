//! Text and JSON rendering for records and parse statistics.
//!
//! Text output mirrors [`LogRecord`]'s `Display` form
//! (`[timestamp] [LEVEL] [source] message`) with a configurable timestamp
//! format and, when enabled, colored level badges.

use std::collections::BTreeMap;
use std::fmt::Write;

use owo_colors::OwoColorize;

use crate::config::Config;
use crate::level::Level;
use crate::parser::ParseStatistics;
use crate::record::LogRecord;

/// Format a single record for output, writing into `out`.
///
/// In JSON mode the record becomes one compact JSON object.
pub fn format_record(record: &LogRecord, config: &Config, use_color: bool, out: &mut String) {
    if config.json_output {
        // LogRecord's fields all serialize infallibly.
        if let Ok(json) = serde_json::to_string(record) {
            out.push_str(&json);
        }
        return;
    }

    let ts_str = record.timestamp().format_with(&config.timestamp_format);
    let level = record.level();

    if use_color {
        let _ = write!(
            out,
            "[{}] [{}] [{}] {}",
            ts_str.bold(),
            level.as_str().style(level.style()),
            record.source().cyan(),
            record.message()
        );
    } else {
        let _ = write!(
            out,
            "[{ts_str}] [{level}] [{}] {}",
            record.source(),
            record.message()
        );
    }
}

/// Render parse health and content counts as a short report.
///
/// ```text
/// lines: 120 total, 100 parsed, 15 unparsable, 5 blank (83.3% parsed)
/// fallback timestamps: 0
/// records by level:
///   ERROR: 7
/// ```
pub fn format_statistics(
    stats: &ParseStatistics,
    counts: &BTreeMap<Level, usize>,
    failed_files: usize,
    out: &mut String,
) {
    let _ = writeln!(
        out,
        "lines: {} total, {} parsed, {} unparsable, {} blank ({:.1}% parsed)",
        stats.total_lines,
        stats.parsed_lines,
        stats.error_lines,
        stats.blank_lines,
        stats.success_rate()
    );
    let _ = writeln!(out, "fallback timestamps: {}", stats.fallback_timestamps);
    if failed_files > 0 {
        let _ = writeln!(out, "unreadable files: {failed_files}");
    }
    out.push_str("records by level:");
    for level in Level::ALL {
        let count = counts.get(&level).copied().unwrap_or(0);
        let _ = write!(out, "\n  {}: {count}", level.badge());
    }
}
