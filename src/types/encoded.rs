use serde::Serialize;

/// A condition in the engine's tagged form.
///
/// Serialized with an explicit `type` discriminant and exactly one payload
/// field matching it:
///
/// ```text
/// { "type": "string",  "stringMatcher":  "..." }
/// { "type": "regexp",  "regexpMatcher":  "..." }
/// { "type": "array",   "arrayMatcher":   [ ... ] }
/// { "type": "logical", "logicalMatcher": [ { "and"?, "or"?, "not"? } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum EncodedCondition {
    String { string_matcher: String },
    Regexp { regexp_matcher: String },
    Array { array_matcher: Vec<EncodedCondition> },
    Logical { logical_matcher: Vec<EncodedLogical> },
}

/// Encoded `and` / `or` / `not` record. Absent keys are omitted on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EncodedLogical {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub and: Option<Vec<EncodedCondition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub or: Option<Vec<EncodedCondition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<EncodedCondition>>,
}

impl EncodedCondition {
    /// The wire discriminant of this node.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            EncodedCondition::String { .. } => "string",
            EncodedCondition::Regexp { .. } => "regexp",
            EncodedCondition::Array { .. } => "array",
            EncodedCondition::Logical { .. } => "logical",
        }
    }

    /// Number of nested levels below and including this node.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            EncodedCondition::String { .. } | EncodedCondition::Regexp { .. } => 1,
            EncodedCondition::Array { array_matcher } => {
                1 + array_matcher.iter().map(Self::depth).max().unwrap_or(0)
            }
            EncodedCondition::Logical { logical_matcher } => {
                1 + logical_matcher
                    .iter()
                    .map(EncodedLogical::depth)
                    .max()
                    .unwrap_or(0)
            }
        }
    }
}

impl EncodedLogical {
    fn depth(&self) -> usize {
        let lists = self.and.iter().chain(self.or.iter()).flatten();
        let children = lists.chain(self.not.as_deref());
        children.map(EncodedCondition::depth).max().unwrap_or(0)
    }
}
