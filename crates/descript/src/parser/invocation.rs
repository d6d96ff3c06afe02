//! Function call parser using winnow.
//!
//! Parses one call starting at a known offset. Handles:
//! - Quoted arguments with embedded variables: `"at least {min}"`
//! - Standalone variable arguments: `{min}`
//! - Empty arguments between two separators: `::`
//! - Escape sequences inside strings, kept verbatim: `\"` `\{` `\:`
//! - Escaped delimiters directly after the call: `\:` `\"`

use winnow::combinator::{alt, cut_err, preceded, repeat, terminated};
use winnow::error::{ContextError, ErrMode, StrContext};
use winnow::prelude::*;
use winnow::token::{any, take_till};

use super::ast::{Argument, Invocation, Piece, TrailingEscape};
use super::error::ParseError;
use super::escape::is_escaped;

const STRING_LABEL: &str = "string";
const VARIABLE_LABEL: &str = "variable";

/// Parse the call beginning at byte offset `start` of `text`.
///
/// The function name runs up to the first unescaped `:`. Arguments follow,
/// separated by `:`, until a character that cannot continue the list.
///
/// ```
/// use descript::parser::{Argument, Piece, parse_invocation};
///
/// let call = parse_invocation(r#"is plur:"field":{n} long"#, 3).unwrap();
/// assert_eq!(call.name, "plur");
/// assert_eq!(
///     call.arguments,
///     vec![
///         Argument::Quoted(vec![Piece::Text("field".into())]),
///         Argument::Variable("n".into()),
///     ]
/// );
/// assert_eq!((call.start, call.end), (3, 19));
/// ```
pub fn parse_invocation(text: &str, start: usize) -> Result<Invocation, ParseError> {
    let separator =
        find_separator(text, start).ok_or(ParseError::MissingSeparator { offset: start })?;
    let name = &text[start..separator];

    let mut arguments = Vec::new();
    let mut cursor = separator + 1;

    loop {
        let mut input = &text[cursor..];
        match argument.parse_next(&mut input) {
            Ok(parsed) => {
                arguments.push(parsed);
                cursor = text.len() - input.len();
            }
            Err(ErrMode::Backtrack(_)) => {
                // Two separators in a row delimit an empty argument; anything
                // else ends the call, swallowing a dangling separator.
                if text[cursor..].starts_with(':') && cursor > separator + 1 {
                    arguments.push(Argument::Empty);
                    cursor += 1;
                    continue;
                }
                break;
            }
            Err(error) => return Err(syntax_error(&error, name, cursor)),
        }

        if !text[cursor..].starts_with(':') {
            break;
        }
        cursor += 1;
    }

    let rest = &text[cursor..];
    let trailing = if rest.starts_with("\\:") {
        Some(TrailingEscape::Colon)
    } else if rest.starts_with("\\\"") {
        Some(TrailingEscape::Quote)
    } else {
        None
    };

    Ok(Invocation {
        name: name.to_string(),
        arguments,
        start,
        end: cursor,
        trailing,
    })
}

/// Find the first unescaped `:` at or after `start`.
fn find_separator(text: &str, start: usize) -> Option<usize> {
    text[start..]
        .char_indices()
        .map(|(offset, c)| (start + offset, c))
        .find(|&(index, c)| c == ':' && !is_escaped(text, index))
        .map(|(index, _)| index)
}

/// Map a fatal winnow error to a [`ParseError`] for the argument at `offset`.
fn syntax_error(error: &ErrMode<ContextError>, function: &str, offset: usize) -> ParseError {
    let in_variable = match error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e
            .context()
            .any(|c| matches!(c, StrContext::Label(label) if *label == VARIABLE_LABEL)),
        ErrMode::Incomplete(_) => false,
    };

    if in_variable {
        ParseError::UnterminatedVariable {
            function: function.to_string(),
            offset,
        }
    } else {
        ParseError::UnterminatedString {
            function: function.to_string(),
            offset,
        }
    }
}

/// Parse a single argument (quoted string or standalone variable).
fn argument(input: &mut &str) -> ModalResult<Argument> {
    alt((quoted, variable)).parse_next(input)
}

/// Parse a quoted argument: `"` pieces* `"`
fn quoted(input: &mut &str) -> ModalResult<Argument> {
    preceded('"', cut_err(terminated(repeat(0.., piece), '"')))
        .context(StrContext::Label(STRING_LABEL))
        .map(Argument::Quoted)
        .parse_next(input)
}

/// Parse a standalone variable argument: `{name}`
fn variable(input: &mut &str) -> ModalResult<Argument> {
    preceded('{', cut_err(terminated(take_till(0.., '}'), '}')))
        .context(StrContext::Label(VARIABLE_LABEL))
        .map(|name: &str| Argument::Variable(name.to_string()))
        .parse_next(input)
}

/// Parse one piece of a quoted argument (escape, variable, or plain text).
fn piece(input: &mut &str) -> ModalResult<Piece> {
    alt((escape_sequence, embedded_variable, plain_text)).parse_next(input)
}

/// Parse a backslash and the character it escapes, keeping both.
fn escape_sequence(input: &mut &str) -> ModalResult<Piece> {
    ('\\', any)
        .take()
        .map(|s: &str| Piece::Text(s.to_string()))
        .parse_next(input)
}

/// Parse a variable reference inside a string. The string's closing quote
/// may not appear inside the reference.
fn embedded_variable(input: &mut &str) -> ModalResult<Piece> {
    preceded('{', cut_err(terminated(take_till(0.., ['}', '"']), '}')))
        .context(StrContext::Label(VARIABLE_LABEL))
        .map(|name: &str| Piece::Variable(name.to_string()))
        .parse_next(input)
}

/// Parse a run of characters with no special meaning inside a string.
fn plain_text(input: &mut &str) -> ModalResult<Piece> {
    take_till(1.., ['"', '{', '\\'])
        .map(|s: &str| Piece::Text(s.to_string()))
        .parse_next(input)
}
