//! Template text parsing.
//!
//! Templates are plain text with two embedded constructs: variable
//! references (`{name}`) and function calls (`name:arg:arg`). This module
//! locates calls, parses their argument lists, and handles the backslash
//! escaping that lets `:`, `"`, `{` and `}` appear literally.

pub mod ast;
pub mod error;
mod escape;
mod invocation;
mod scanner;

pub use ast::*;
pub use error::ParseError;
pub(crate) use escape::ends_with_name;
pub use escape::{escape_function_result, is_escaped, strip_escapes};
pub use invocation::parse_invocation;
pub use scanner::find_function_calls;
