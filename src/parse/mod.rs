mod error;
mod grammar;
mod parser;

pub use error::ParseError;
pub use parser::LoaderRequest;

use crate::Pattern;

/// Flags accepted after the closing `/` of a pattern literal.
const PATTERN_FLAGS: &str = "dgimsuvy";

/// Parse a `/source/flags` pattern literal into a [`Pattern`].
///
/// # Errors
///
/// Returns [`ParseError`] if the literal is malformed, empty, or carries an
/// unknown or repeated flag.
pub fn parse_pattern(input: &str) -> Result<Pattern, ParseError> {
    use winnow::Parser;
    let (source, flags) = grammar::pattern_literal
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string()))?;
    check_flags(flags)?;
    Ok(Pattern::new(source).with_flags(flags))
}

/// Split an inline loader request (`"style-loader!css-loader?modules"`) into
/// its loaders, in order.
///
/// # Errors
///
/// Returns [`ParseError`] if the request is empty or has an empty segment.
pub fn parse_loader_request(input: &str) -> Result<Vec<LoaderRequest>, ParseError> {
    use winnow::Parser;
    grammar::loader_chain
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string()))
}

fn check_flags(flags: &str) -> Result<(), ParseError> {
    for (i, flag) in flags.char_indices() {
        if !PATTERN_FLAGS.contains(flag) {
            return Err(ParseError::new(format!("unknown pattern flag '{flag}'")));
        }
        if flags[..i].contains(flag) {
            return Err(ParseError::new(format!("duplicate pattern flag '{flag}'")));
        }
    }
    Ok(())
}
