//! Parse error types for template calls.

use thiserror::Error;

/// An error that occurred while parsing a function call.
///
/// Offsets are byte offsets into the text handed to the parser. Errors
/// returned from a render point into the raw template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A quoted argument was never closed.
    #[error("unterminated string argument in call to '{function}' at offset {offset}")]
    UnterminatedString { function: String, offset: usize },

    /// A `{` was never matched by a `}`.
    #[error("unterminated variable reference in call to '{function}' at offset {offset}")]
    UnterminatedVariable { function: String, offset: usize },

    /// No `:` follows the function name.
    #[error("missing argument separator after function name at offset {offset}")]
    MissingSeparator { offset: usize },
}

impl ParseError {
    /// Byte offset the error points at.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnterminatedString { offset, .. }
            | ParseError::UnterminatedVariable { offset, .. }
            | ParseError::MissingSeparator { offset } => *offset,
        }
    }

    /// The same error pointing at `offset` instead.
    pub(crate) fn with_offset(self, offset: usize) -> Self {
        match self {
            ParseError::UnterminatedString { function, .. } => {
                ParseError::UnterminatedString { function, offset }
            }
            ParseError::UnterminatedVariable { function, .. } => {
                ParseError::UnterminatedVariable { function, offset }
            }
            ParseError::MissingSeparator { .. } => ParseError::MissingSeparator { offset },
        }
    }
}
