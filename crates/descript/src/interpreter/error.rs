//! Error types for template rendering and catalog loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseError;

/// Errors that occur while loading a template catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a catalog file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The catalog is not valid JSON of the expected shape.
    #[error("failed to parse '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// An error that occurred while rendering a template.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No template is registered under the name.
    #[error("template '{key}' is not registered{}", format_suggestions(.suggestions))]
    TemplateNotFound {
        name: String,
        key: String,
        suggestions: Vec<String>,
    },

    /// The template has no entry for the requested language.
    #[error("could not find the requested language '{language}' for template '{name}'")]
    UnknownLanguage { name: String, language: String },

    /// A template function returned no value.
    #[error("function '{name}' returned no result")]
    FunctionResultMissing { name: String },

    /// A function call in the template is malformed.
    #[error(transparent)]
    Syntax(#[from] ParseError),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!("; did you mean: {}?", suggestions.join(", "))
    }
}

/// Compute names similar to `key` from `available`.
///
/// Uses Levenshtein distance: at most 1 edit for keys of three characters or
/// fewer, 2 otherwise. Returns up to three suggestions, closest first.
pub fn compute_suggestions(key: &str, available: &[String]) -> Vec<String> {
    let max_distance = if key.chars().count() <= 3 { 1 } else { 2 };

    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .filter(|candidate| candidate.as_str() != key)
        .map(|candidate| (strsim::levenshtein(key, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}
