use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::parse::{self, ParseError};

/// Key marking a pattern when a configuration is written as JSON:
/// `{"$regexp": "/\\.js$/i"}`.
pub const PATTERN_KEY: &str = "$regexp";

/// A regular-expression pattern, kept as source text plus flags.
///
/// The crate never compiles patterns; the engine does. Only the source is
/// forwarded across the boundary, see [`EncodedCondition::Regexp`](crate::EncodedCondition).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PatternRepr", into = "PatternRepr")]
pub struct Pattern {
    source: String,
    flags: String,
}

impl Pattern {
    /// A pattern without flags. `source` is taken as-is, without delimiters.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            flags: String::new(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = flags.into();
        self
    }

    /// Parse a `/source/flags` literal.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the literal is malformed.
    pub fn parse(literal: &str) -> Result<Self, ParseError> {
        parse::parse_pattern(literal)
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn flags(&self) -> &str {
        &self.flags
    }
}

impl FromStr for Pattern {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PatternRepr {
    #[serde(rename = "$regexp")]
    literal: String,
}

impl TryFrom<PatternRepr> for Pattern {
    type Error = ParseError;

    fn try_from(repr: PatternRepr) -> Result<Self, Self::Error> {
        Self::parse(&repr.literal)
    }
}

impl From<Pattern> for PatternRepr {
    fn from(pattern: Pattern) -> Self {
        PatternRepr {
            literal: pattern.to_string(),
        }
    }
}
