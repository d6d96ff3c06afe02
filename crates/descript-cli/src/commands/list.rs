//! Implementation of the `descript list` command.

use clap::Args;
use descript::TemplateSource;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use super::source::SourceArgs;
use crate::output::table::format_catalog_table;

/// Arguments for the list command.
#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for one template.
#[derive(Debug, Serialize)]
struct TemplateJson<'a> {
    name: &'a str,
    languages: Vec<&'a str>,
}

/// Run the list command.
pub fn run_list(args: ListArgs) -> Result<i32> {
    let catalog = args.source.catalog()?;

    if args.json {
        let names = catalog.names();
        let json_data: Vec<TemplateJson<'_>> = names
            .iter()
            .map(|name| TemplateJson {
                name,
                languages: catalog.languages(name),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json_data).into_diagnostic()?);
    } else if catalog.is_empty() {
        println!("No templates found.");
    } else {
        println!("{}", format_catalog_table(&catalog));
    }

    Ok(exitcode::OK)
}
