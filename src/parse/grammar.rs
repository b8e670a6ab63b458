use winnow::combinator::{cut_err, opt, preceded, separated};
use winnow::error::{ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, take_till, take_while};

use super::parser::LoaderRequest;

// -- Pattern literals -------------------------------------------------------

/// Body of a `/source/flags` literal, up to and including the closing `/`.
///
/// Escapes are kept verbatim and a `/` inside a character class does not
/// terminate the body.
fn pattern_body(input: &mut &str) -> ModalResult<String> {
    let mut body = String::new();
    let mut in_class = false;
    loop {
        let ch = any.parse_next(input)?;
        match ch {
            '\\' => {
                let escaped = any.parse_next(input)?;
                body.push('\\');
                body.push(escaped);
            }
            '[' => {
                in_class = true;
                body.push(ch);
            }
            ']' => {
                in_class = false;
                body.push(ch);
            }
            '/' if !in_class => return Ok(body),
            '\n' | '\r' => return Err(ErrMode::from_input(input).cut()),
            c => body.push(c),
        }
    }
}

fn pattern_flags<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(0.., |c: char| c.is_ascii_alphabetic()).parse_next(input)
}

pub fn pattern_literal<'i>(input: &mut &'i str) -> ModalResult<(String, &'i str)> {
    '/'.context(StrContext::Expected(StrContextValue::CharLiteral('/')))
        .parse_next(input)?;
    let source = cut_err(pattern_body)
        .context(StrContext::Expected(StrContextValue::Description(
            "pattern body terminated by `/`",
        )))
        .parse_next(input)?;
    if source.is_empty() {
        return Err(ErrMode::from_input(input).cut());
    }
    let flags = pattern_flags.parse_next(input)?;
    Ok((source, flags))
}

// -- Loader requests --------------------------------------------------------

fn loader_request(input: &mut &str) -> ModalResult<LoaderRequest> {
    let loader = take_till(1.., ['!', '?'])
        .context(StrContext::Expected(StrContextValue::Description(
            "loader name",
        )))
        .parse_next(input)?;
    let query = opt(preceded('?', take_till(0.., '!'))).parse_next(input)?;
    Ok(LoaderRequest {
        loader: loader.to_owned(),
        query: query.map(str::to_owned),
    })
}

pub fn loader_chain(input: &mut &str) -> ModalResult<Vec<LoaderRequest>> {
    separated(1.., loader_request, '!').parse_next(input)
}
