//! Implementation of the `descript check` command.

use descript::{FunctionMap, RenderError, Renderer, VariableMap};
use miette::{IntoDiagnostic, Report, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::debug;

use super::source::SourceArgs;
use crate::output::table::{format_failure_table, language_label, CheckFailure};
use crate::output::TemplateDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for one failure.
#[derive(Debug, Serialize)]
struct FailureJson<'a> {
    name: &'a str,
    language: &'a str,
    error: &'a str,
}

/// Run the check command.
///
/// Every entry is rendered with no variables, so only malformed calls and
/// functions that produce no result are reported.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let catalog = args.source.catalog()?;
    let renderer = Renderer::with_global_functions(&catalog);
    let vars = VariableMap::new();
    let funcs = FunctionMap::new();

    let mut checked = 0;
    let mut failures = Vec::new();
    for (name, language, raw) in catalog.entries() {
        checked += 1;
        debug!(name, language, "checking template");
        let Err(e) = renderer.render_str(raw, &vars, &funcs) else {
            continue;
        };

        if !args.json {
            if let RenderError::Syntax(parse_error) = &e {
                let label = format!("{name} [{}]", language_label(language));
                let diagnostic = TemplateDiagnostic::from_parse_error(&label, raw, parse_error);
                eprintln!("{:?}", Report::new(diagnostic));
            }
        }
        failures.push(CheckFailure {
            name: name.to_string(),
            language: language.to_string(),
            error: e.to_string(),
        });
    }

    if args.json {
        let json_data: Vec<FailureJson<'_>> = failures
            .iter()
            .map(|f| FailureJson {
                name: &f.name,
                language: &f.language,
                error: &f.error,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json_data).into_diagnostic()?);
    } else if failures.is_empty() {
        println!("{} {} templates checked", "ok:".green().bold(), checked);
    } else {
        println!("{}", format_failure_table(&failures));
        println!(
            "{} {} of {} templates failed",
            "error:".red().bold(),
            failures.len(),
            checked
        );
    }

    if failures.is_empty() {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}
