//! Parsed representation of a single function call.

/// A function call found in template text: `name:arg(:arg)*`.
///
/// Offsets are byte offsets into the text the call was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// Function name, the text between `start` and the first unescaped `:`.
    pub name: String,
    /// Arguments in call order.
    pub arguments: Vec<Argument>,
    /// Offset of the first character of the function name.
    pub start: usize,
    /// Offset one past the last character belonging to the call.
    pub end: usize,
    /// Escaped delimiter directly after the call, if any.
    pub trailing: Option<TrailingEscape>,
}

/// A single call argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// A standalone variable reference: `{name}`.
    Variable(String),
    /// A quoted string: `"text {name} text"`.
    Quoted(Vec<Piece>),
    /// Nothing between two separators: `::`.
    Empty,
}

/// Part of a quoted argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Piece {
    /// Verbatim text. Escape sequences are kept with their backslash.
    Text(String),
    /// A variable reference inside the string.
    Variable(String),
}

/// An escaped delimiter immediately following a call (`\:` or `\"`).
///
/// These never continue the argument list; they let a template put a
/// literal delimiter right after a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingEscape {
    Colon,
    Quote,
}
