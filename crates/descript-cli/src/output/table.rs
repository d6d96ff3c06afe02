//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use descript::{TemplateCatalog, TemplateSource};

/// Label shown for the default (empty) language.
pub const DEFAULT_LANGUAGE_LABEL: &str = "(default)";

/// Format a language code for display.
pub fn language_label(language: &str) -> &str {
    if language.is_empty() {
        DEFAULT_LANGUAGE_LABEL
    } else {
        language
    }
}

/// Format a catalog as a table of template names and their languages.
pub fn format_catalog_table(catalog: &TemplateCatalog) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Template", "Languages"]);

    for name in catalog.names() {
        let languages: Vec<&str> = catalog
            .languages(&name)
            .into_iter()
            .map(language_label)
            .collect();
        table.add_row(vec![name, languages.join(", ")]);
    }

    table
}

/// A failed dry render, for the check report.
pub struct CheckFailure {
    /// Template name.
    pub name: String,
    /// Language code.
    pub language: String,
    /// Error message.
    pub error: String,
}

/// Format check failures as a table.
pub fn format_failure_table(failures: &[CheckFailure]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Template", "Language", "Error"]);

    for failure in failures {
        table.add_row(vec![
            failure.name.clone(),
            language_label(&failure.language).to_string(),
            failure.error.clone(),
        ]);
    }

    table
}
