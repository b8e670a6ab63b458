use thiserror::Error;

use crate::TranslateError;
use crate::parse::ParseError;

/// Unified error type covering loading, parsing and translation.
///
/// Returned by convenience entry points like
/// [`NormalizedOptions::from_file()`](crate::NormalizedOptions::from_file) and
/// [`translate_json()`](crate::translate_json).
#[derive(Debug, Error)]
pub enum CanonError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error("invalid normalized options: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
