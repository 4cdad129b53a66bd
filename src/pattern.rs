//! Line patterns and the ordered catalog the parser walks.
//!
//! Each [`PatternDescriptor`] pairs a regular expression with the way its
//! capture groups map onto timestamp, level, source and message. Every
//! pattern must match the whole line. The built-in table is compiled once
//! per process; custom patterns live in the [`PatternCatalog`] that
//! registered them and are always tried before the built-ins.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::PatternError;

/// Built-in line formats as `(name, pattern)`, in the order they are tried.
pub const BUILTIN_PATTERN_SOURCES: &[(&str, &str)] = &[
    (
        "bracketed",
        r"\[?(\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}:\d{2})\]?\s*\[(\w+)\]\s*\[([^\]]*)\]\s*(.*)",
    ),
    (
        "syslog",
        r"(\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}:\d{2}|[A-Z][a-z]{2}\s+\d{1,2}\s+\d{2}:\d{2}:\d{2})\s+(\w+)\s+([^\s:]+):\s*(.*)",
    ),
    (
        "bracketed-millis",
        r"\[?(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2},\d{3})\]?\s*\[(\w+)\]\s*\[([^\]]*)\]\s*(.*)",
    ),
    (
        "simple",
        r"\[?(\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}:\d{2})\]?\s+(\w+):\s*(.*)",
    ),
    (
        "iso8601",
        r"\[?(\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{1,9}Z?)\]?\s*\[(\w+)\]\s*\[([^\]]*)\]\s*(.*)",
    ),
];

/// The compiled built-in table, shared by every catalog.
#[allow(clippy::expect_used)] // constant patterns; covered by test_builtin_patterns_compile
static BUILTIN_PATTERNS: LazyLock<Vec<PatternDescriptor>> = LazyLock::new(|| {
    BUILTIN_PATTERN_SOURCES
        .iter()
        .map(|(name, pattern)| {
            PatternDescriptor::compile(*name, pattern).expect("built-in pattern compiles")
        })
        .collect()
});

/// Text slices pulled out of a matching line, before any conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFields<'a> {
    pub timestamp: &'a str,
    pub level: &'a str,
    /// `None` when the pattern has no source group.
    pub source: Option<&'a str>,
    pub message: &'a str,
}

/// How capture groups map to record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLayout {
    /// Groups 1-4 are timestamp, level, source, message.
    WithSource,
    /// Groups 1-3 are timestamp, level, message.
    WithoutSource,
    /// Groups named `timestamp`, `level`, `message` and optionally `source`.
    Named { has_source: bool },
}

impl FieldLayout {
    fn for_regex(regex: &Regex, pattern: &str) -> Result<Self, PatternError> {
        let names: Vec<&str> = regex.capture_names().flatten().collect();
        if ["timestamp", "level", "message"]
            .iter()
            .all(|required| names.contains(required))
        {
            return Ok(Self::Named {
                has_source: names.contains(&"source"),
            });
        }

        match regex.captures_len() - 1 {
            groups if groups >= 4 => Ok(Self::WithSource),
            3 => Ok(Self::WithoutSource),
            groups => Err(PatternError::TooFewGroups {
                pattern: pattern.to_string(),
                groups,
            }),
        }
    }
}

/// A compiled line pattern plus its [`FieldLayout`].
#[derive(Debug, Clone)]
pub struct PatternDescriptor {
    name: String,
    pattern: String,
    regex: Regex,
    layout: FieldLayout,
}

impl PatternDescriptor {
    /// Compile `pattern` anchored to the full line.
    pub fn compile(name: impl Into<String>, pattern: &str) -> Result<Self, PatternError> {
        let syntax_error = |source| PatternError::Syntax {
            pattern: pattern.to_string(),
            source,
        };
        // Validate the text as given; wrapping could paper over stray parens.
        Regex::new(pattern).map_err(syntax_error)?;
        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(syntax_error)?;
        let layout = FieldLayout::for_regex(&regex, pattern)?;

        Ok(Self {
            name: name.into(),
            pattern: pattern.to_string(),
            regex,
            layout,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pattern text as registered, without the anchoring wrapper.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub const fn layout(&self) -> FieldLayout {
        self.layout
    }

    /// Match the whole line and slice out its fields.
    ///
    /// Groups that did not participate in the match read as empty text.
    pub fn extract<'a>(&self, line: &'a str) -> Option<RawFields<'a>> {
        let caps = self.regex.captures(line)?;
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
        let named = |n: &str| caps.name(n).map_or("", |m| m.as_str());

        let fields = match self.layout {
            FieldLayout::WithSource => RawFields {
                timestamp: group(1),
                level: group(2),
                source: Some(group(3)),
                message: group(4),
            },
            FieldLayout::WithoutSource => RawFields {
                timestamp: group(1),
                level: group(2),
                source: None,
                message: group(3),
            },
            FieldLayout::Named { has_source } => RawFields {
                timestamp: named("timestamp"),
                level: named("level"),
                source: has_source.then(|| named("source")),
                message: named("message"),
            },
        };
        Some(fields)
    }
}

/// Ordered set of line patterns: custom patterns in registration order,
/// followed by the built-in table.
#[derive(Debug, Clone, Default)]
pub struct PatternCatalog {
    custom: Vec<PatternDescriptor>,
}

impl PatternCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared built-in patterns, in match order.
    pub fn builtin() -> &'static [PatternDescriptor] {
        &BUILTIN_PATTERNS
    }

    /// Register a custom pattern ahead of the built-ins.
    ///
    /// A rejected pattern leaves the catalog unchanged.
    pub fn add_custom_pattern(&mut self, pattern: &str) -> Result<(), PatternError> {
        let name = format!("custom-{}", self.custom.len() + 1);
        let descriptor = PatternDescriptor::compile(name, pattern)?;
        tracing::debug!(
            name = descriptor.name(),
            pattern = descriptor.pattern(),
            "registered custom pattern"
        );
        self.custom.push(descriptor);
        Ok(())
    }

    pub fn custom_len(&self) -> usize {
        self.custom.len()
    }

    /// All patterns in match order.
    pub fn iter(&self) -> impl Iterator<Item = &PatternDescriptor> {
        let builtin: &[PatternDescriptor] = Self::builtin();
        self.custom.iter().chain(builtin.iter())
    }

    /// The first pattern matching `line`, with the fields it extracted.
    pub fn match_line<'s, 'a>(
        &'s self,
        line: &'a str,
    ) -> Option<(&'s PatternDescriptor, RawFields<'a>)> {
        self.iter()
            .find_map(|descriptor| descriptor.extract(line).map(|fields| (descriptor, fields)))
    }
}
