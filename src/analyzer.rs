//! Filters and aggregates over an already-parsed record sequence.
//!
//! Every function borrows its input and returns a new value; relative order
//! is preserved by all filters. Text search is case-sensitive and looks at
//! the message only. Use [`filter_by_source`] to select on the source label.

use std::collections::BTreeMap;

use crate::level::Level;
use crate::record::LogRecord;
use crate::timestamp::Timestamp;

fn filter_by(records: &[LogRecord], keep: impl Fn(&LogRecord) -> bool) -> Vec<LogRecord> {
    records.iter().filter(|&r| keep(r)).cloned().collect()
}

/// Records whose level is exactly `level`.
pub fn filter_by_level(records: &[LogRecord], level: Level) -> Vec<LogRecord> {
    filter_by(records, |r| r.level() == level)
}

/// Records at `min_level` or more severe.
pub fn filter_by_min_level(records: &[LogRecord], min_level: Level) -> Vec<LogRecord> {
    filter_by(records, |r| r.level() >= min_level)
}

/// Records with `start <= timestamp <= end`. Empty when `start > end`.
pub fn filter_by_time_range(
    records: &[LogRecord],
    start: Timestamp,
    end: Timestamp,
) -> Vec<LogRecord> {
    filter_by(records, |r| (start..=end).contains(&r.timestamp()))
}

/// Records whose message contains `needle`. An empty needle keeps everything.
pub fn filter_by_text(records: &[LogRecord], needle: &str) -> Vec<LogRecord> {
    filter_by(records, |r| r.message().contains(needle))
}

/// Records whose source label equals `source`.
pub fn filter_by_source(records: &[LogRecord], source: &str) -> Vec<LogRecord> {
    filter_by(records, |r| r.source() == source)
}

/// Number of records per level. Levels with no records are absent.
pub fn count_by_level(records: &[LogRecord]) -> BTreeMap<Level, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.level()).or_insert(0) += 1;
    }
    counts
}

/// Number of records per source label.
pub fn count_by_source(records: &[LogRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.source().to_string()).or_insert(0) += 1;
    }
    counts
}

/// The last `n` records. All of them when `n >= records.len()`.
pub fn recent(records: &[LogRecord], n: usize) -> Vec<LogRecord> {
    records[records.len().saturating_sub(n)..].to_vec()
}

/// Earliest and latest timestamps, or `None` for an empty sequence.
pub fn time_span(records: &[LogRecord]) -> Option<(Timestamp, Timestamp)> {
    let first = records.first()?.timestamp();
    Some(records.iter().fold((first, first), |(lo, hi), r| {
        (lo.min(r.timestamp()), hi.max(r.timestamp()))
    }))
}

/// Stable sort by timestamp; equal timestamps keep their relative order.
pub fn sort_by_timestamp(records: &mut [LogRecord]) {
    records.sort_by_key(LogRecord::timestamp);
}
