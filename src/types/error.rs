use thiserror::Error;

/// Errors raised while translating normalized options into canonical options.
///
/// Both translation kinds signal a bug upstream rather than a user mistake:
/// a missing field means the defaulting stage did not run, an unsupported
/// condition means type narrowing let through a value it should not have.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("missing required option(s) after defaulting in '{section}': {}", fields.join(", "))]
    MissingFields { section: String, fields: Vec<String> },

    #[error(
        "unsupported condition shape: {found}; expected a string, a pattern, an array or a logical object"
    )]
    UnsupportedCondition { found: String },

    /// Failure reported by a [`UseChainEncoder`](crate::UseChainEncoder).
    #[error("use chain encoding failed: {0}")]
    UseChain(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TranslateError {
    pub(crate) fn unsupported(found: impl Into<String>) -> Self {
        TranslateError::UnsupportedCondition {
            found: found.into(),
        }
    }

    /// Names of the missing fields, empty for other error kinds.
    #[must_use]
    pub fn missing_fields(&self) -> &[String] {
        match self {
            TranslateError::MissingFields { fields, .. } => fields,
            _ => &[],
        }
    }
}
