//! Configuration management with TOML file support.
//!
//! Merges settings from three sources (highest precedence first):
//! 1. CLI flags
//! 2. Config file (`~/.config/logscan/config.toml` or `$XDG_CONFIG_HOME/logscan/config.toml`)
//! 3. Built-in defaults
//!
//! Custom patterns are the exception: file patterns and CLI patterns are
//! both kept, file patterns first.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::analyzer;
use crate::cli::{Cli, ColorMode};
use crate::error::LogscanError;
use crate::level::Level;
use crate::parser::LogLineParser;
use crate::record::LogRecord;
use crate::timestamp::{Timestamp, TimestampInterpreter, TimestampMode};

/// Runtime configuration merged from defaults, config file, and CLI arguments.
///
/// Use [`Config::from_cli`] to build from parsed CLI arguments, or
/// [`Config::default`] for built-in defaults (useful in tests and benchmarks).
#[derive(Debug, Clone)]
pub struct Config {
    /// Color output mode (auto/always/never).
    pub color_mode: ColorMode,
    /// Keep only records with exactly this level.
    pub level: Option<Level>,
    /// Keep only records at or above this level.
    pub min_level: Option<Level>,
    /// Case-sensitive message substring to keep.
    pub search: Option<String>,
    /// Inclusive lower time bound.
    pub since: Option<Timestamp>,
    /// Inclusive upper time bound.
    pub until: Option<Timestamp>,
    /// Keep only the last N records after the other filters.
    pub recent: Option<usize>,
    /// Custom line patterns, in registration order.
    pub patterns: Vec<String>,
    /// How unrecognized timestamps are handled.
    pub timestamp_mode: TimestampMode,
    /// Output JSON objects instead of text.
    pub json_output: bool,
    /// Print statistics to stderr after the records.
    pub show_stats: bool,
    /// Parse files on worker threads.
    pub parallel: bool,
    /// Timestamp display format string (strftime-compatible).
    pub timestamp_format: String,
    /// Custom level name aliases mapping lower-case string → [`Level`].
    pub level_aliases: Option<HashMap<String, Level>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Auto,
            level: None,
            min_level: None,
            search: None,
            since: None,
            until: None,
            recent: None,
            patterns: Vec::new(),
            timestamp_mode: TimestampMode::Permissive,
            json_output: false,
            show_stats: false,
            parallel: false,
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            level_aliases: None,
        }
    }
}

impl Config {
    /// Build a [`Config`] from CLI arguments, loading the config file if present.
    ///
    /// Merge precedence: CLI flags > config file > defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self, LogscanError> {
        let mut config = Self::default();

        let config_path = cli.config.clone().unwrap_or_else(Self::default_config_path);

        if config_path.exists() {
            let file_config = FileConfig::load(&config_path)?;
            config.apply_file_config(file_config)?;
        } else if cli.config.is_some() {
            return Err(LogscanError::Config(format!(
                "config file {} does not exist",
                config_path.display()
            )));
        }

        if let Some(color) = cli.color {
            config.color_mode = color;
        }

        if let Some(ref level_str) = cli.level {
            config.level = Level::from_str_loose(level_str);
            config.min_level = None;
        }
        if let Some(ref level_str) = cli.min_level {
            config.min_level = Level::from_str_loose(level_str);
            config.level = None;
        }

        if cli.search.is_some() {
            config.search.clone_from(&cli.search);
        }
        if let Some(ref since) = cli.since {
            config.since = Some(parse_bound("--since", since)?);
        }
        if let Some(ref until) = cli.until {
            config.until = Some(parse_bound("--until", until)?);
        }
        if cli.recent.is_some() {
            config.recent = cli.recent;
        }

        config.patterns.extend(cli.patterns.iter().cloned());

        if cli.strict_timestamps {
            config.timestamp_mode = TimestampMode::Strict;
        }

        config.json_output = cli.json;
        config.show_stats = cli.stats;
        config.parallel = cli.parallel;

        Ok(config)
    }

    /// Default config file path: `$XDG_CONFIG_HOME/logscan/config.toml` or `~/.config/logscan/config.toml`.
    fn default_config_path() -> PathBuf {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(xdg).join("logscan").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("logscan")
                .join("config.toml")
        } else {
            PathBuf::from(".config/logscan/config.toml")
        }
    }

    /// Apply settings from a parsed config file.
    fn apply_file_config(&mut self, file: FileConfig) -> Result<(), LogscanError> {
        if let Some(color) = file.color {
            self.color_mode = match color.as_str() {
                "always" => ColorMode::Always,
                "never" => ColorMode::Never,
                _ => ColorMode::Auto,
            };
        }

        if let Some(level) = file.level {
            self.level = Some(Level::from_str_loose(&level).ok_or_else(|| {
                LogscanError::Config(format!("unknown level `{level}` in config file"))
            })?);
        }

        if let Some(level) = file.min_level {
            self.min_level = Some(Level::from_str_loose(&level).ok_or_else(|| {
                LogscanError::Config(format!("unknown min_level `{level}` in config file"))
            })?);
        }

        if file.recent.is_some() {
            self.recent = file.recent;
        }

        if file.strict_timestamps == Some(true) {
            self.timestamp_mode = TimestampMode::Strict;
        }

        if let Some(format) = file.timestamp_format {
            self.timestamp_format = format;
        }

        if let Some(patterns) = file.patterns {
            self.patterns.extend(patterns);
        }

        if let Some(levels) = file.levels {
            let mut aliases = HashMap::new();
            for (key, value) in levels {
                if let Some(level) = Level::from_str_loose(&value) {
                    aliases.insert(key.to_lowercase(), level);
                } else {
                    tracing::warn!(alias = %key, target_level = %value, "ignoring alias to unknown level");
                }
            }
            if !aliases.is_empty() {
                self.level_aliases = Some(aliases);
            }
        }

        Ok(())
    }

    /// A parser set up with this configuration's patterns and modes.
    ///
    /// Patterns that fail to compile are logged and left out.
    pub fn build_parser(&self) -> LogLineParser {
        let mut parser = LogLineParser::new().with_timestamp_mode(self.timestamp_mode);
        if let Some(ref aliases) = self.level_aliases {
            parser = parser.with_level_aliases(aliases.clone());
        }
        for pattern in &self.patterns {
            if let Err(e) = parser.add_custom_pattern(pattern) {
                let error = LogscanError::from(e);
                tracing::warn!(%error, "custom pattern rejected");
            }
        }
        parser
    }

    /// Apply the configured filters, then the `recent` cut.
    pub fn select(&self, records: &[LogRecord]) -> Vec<LogRecord> {
        let mut selected = records.to_vec();
        if let Some(level) = self.level {
            selected = analyzer::filter_by_level(&selected, level);
        }
        if let Some(min_level) = self.min_level {
            selected = analyzer::filter_by_min_level(&selected, min_level);
        }
        if let Some(ref needle) = self.search {
            selected = analyzer::filter_by_text(&selected, needle);
        }
        if self.since.is_some() || self.until.is_some() {
            let start = self.since.unwrap_or(Timestamp {
                value: jiff::Timestamp::MIN,
            });
            let end = self.until.unwrap_or(Timestamp {
                value: jiff::Timestamp::MAX,
            });
            selected = analyzer::filter_by_time_range(&selected, start, end);
        }
        if let Some(n) = self.recent {
            selected = analyzer::recent(&selected, n);
        }
        selected
    }
}

fn parse_bound(flag: &str, text: &str) -> Result<Timestamp, LogscanError> {
    TimestampInterpreter::new(TimestampMode::Strict)
        .interpret(text)
        .map(|outcome| outcome.timestamp())
        .map_err(|e| LogscanError::Config(format!("{flag}: {e}")))
}

/// Config file structure (TOML deserialization).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    color: Option<String>,
    level: Option<String>,
    min_level: Option<String>,
    recent: Option<usize>,
    strict_timestamps: Option<bool>,
    timestamp_format: Option<String>,
    patterns: Option<Vec<String>>,
    levels: Option<HashMap<String, String>>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self, LogscanError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LogscanError::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}
