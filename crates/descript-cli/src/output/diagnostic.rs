//! Miette diagnostic wrapper for template parse errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use descript::parser::ParseError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for template parse errors.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("syntax error: {message}")]
#[diagnostic(code(descript::syntax))]
pub struct TemplateDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl TemplateDiagnostic {
    /// Create a diagnostic pointing into the raw template text.
    pub fn from_parse_error(name: &str, raw: &str, err: &ParseError) -> Self {
        let help = match err {
            ParseError::UnterminatedString { .. } => {
                r#"close the string with `"`, or write `\"` for a literal quote"#
            }
            ParseError::UnterminatedVariable { .. } => {
                r"close the variable with `}`, or write `\{` for a literal brace"
            }
            ParseError::MissingSeparator { .. } => "separate the function name and its arguments with `:`",
        };

        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = err.offset().min(raw.len());

        TemplateDiagnostic {
            src: NamedSource::new(name, raw.to_string()),
            span: (offset, 1).into(),
            message: err.to_string(),
            help: Some(help.to_string()),
        }
    }
}
