//! Command-line argument definitions for `logscan`.
//!
//! Uses [`clap`] derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_complete::Shell;

/// Parse, merge and analyze plain-text log files.
///
/// Lines from every file are matched against the built-in formats (and any
/// custom patterns), merged, and printed in timestamp order. Lines that match
/// no pattern are dropped; `--stats` shows how many.
#[derive(Debug, Parser)]
#[command(name = "logscan", version, about, long_about = None)]
pub struct Cli {
    /// Log files to read.
    #[arg(required_unless_present = "completions")]
    pub files: Vec<PathBuf>,

    /// Control color output.
    ///
    /// `auto` enables colors only when stdout is a TTY and `NO_COLOR` is unset.
    /// Falls back to the config file's `color`, then `auto`.
    #[arg(short = 'c', long, value_enum)]
    pub color: Option<ColorMode>,

    /// Only show records with exactly this level.
    #[arg(short = 'l', long, value_parser = parse_level_arg, conflicts_with = "min_level")]
    pub level: Option<String>,

    /// Only show records at this level or more severe.
    #[arg(long, value_parser = parse_level_arg)]
    pub min_level: Option<String>,

    /// Only show records whose message contains this text (case-sensitive).
    #[arg(short = 's', long)]
    pub search: Option<String>,

    /// Only show records at or after this time.
    #[arg(long)]
    pub since: Option<String>,

    /// Only show records at or before this time.
    #[arg(long)]
    pub until: Option<String>,

    /// Show only the last N records after all other filters.
    #[arg(short = 'n', long)]
    pub recent: Option<usize>,

    /// Additional line pattern, tried before the built-in formats.
    ///
    /// A regular expression with 4 groups (timestamp, level, source,
    /// message), 3 groups (no source), or named groups `timestamp`, `level`,
    /// `message` and optionally `source`. May be repeated.
    #[arg(short = 'p', long = "pattern")]
    pub patterns: Vec<String>,

    /// Drop lines whose timestamp is unrecognized instead of stamping them
    /// with the current time.
    #[arg(long)]
    pub strict_timestamps: bool,

    /// Output one JSON object per record instead of text.
    #[arg(short = 'j', long)]
    pub json: bool,

    /// Print parse statistics and per-level counts to stderr.
    #[arg(long)]
    pub stats: bool,

    /// Parse files on parallel worker threads.
    #[arg(long)]
    pub parallel: bool,

    /// Path to configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print a shell completion script and exit.
    #[arg(long, value_enum)]
    pub completions: Option<Shell>,

    /// Show debug diagnostics on stderr.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Enable colors only when stdout is a TTY.
    Auto,
    /// Always enable colors.
    Always,
    /// Never enable colors.
    Never,
}

/// Parse level argument as case-insensitive string.
fn parse_level_arg(s: &str) -> Result<String, String> {
    let lower = s.to_lowercase();
    match lower.as_str() {
        "debug" | "info" | "warn" | "error" | "fatal" => Ok(lower),
        _ => Err(format!(
            "invalid level '{s}': expected one of debug, info, warn, error, fatal"
        )),
    }
}
