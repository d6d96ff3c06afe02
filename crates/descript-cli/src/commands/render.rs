//! Implementation of the `descript render` command.

use descript::{FunctionMap, RenderError, Renderer, TemplateSource, Value, VariableMap};
use miette::{miette, IntoDiagnostic, Report};
use serde::Serialize;

use super::source::SourceArgs;
use crate::output::TemplateDiagnostic;

/// Arguments for the render command.
#[derive(Debug, clap::Args)]
pub struct RenderArgs {
    /// Name of the template to render
    #[arg(required_unless_present = "text", conflicts_with = "text")]
    pub name: Option<String>,

    /// Render this template text instead of a named template
    #[arg(long)]
    pub text: Option<String>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Language code (empty for the default language)
    #[arg(long, default_value = "")]
    pub lang: String,

    /// Variables in name=value format (repeatable)
    #[arg(short = 'V', long = "var", value_parser = parse_key_val)]
    pub vars: Vec<(String, String)>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for render results.
#[derive(Serialize)]
pub struct RenderResult {
    pub result: String,
}

/// Parse a name=value variable string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid variable format '{}': expected name=value", s))?;
    Ok((name.to_string(), value.to_string()))
}

/// Run the render command.
pub fn run_render(args: RenderArgs) -> miette::Result<i32> {
    let renderer = Renderer::with_global_functions(args.source.open()?);

    let vars: VariableMap = args
        .vars
        .into_iter()
        .map(|(name, raw)| (name, Value::parse_loose(&raw)))
        .collect();

    let result = match (&args.text, &args.name) {
        (Some(text), _) => renderer.render_str(text, &vars, &FunctionMap::new()),
        (None, Some(name)) => renderer.render(name, &vars, &FunctionMap::new(), &args.lang),
        (None, None) => return Err(miette!("nothing to render: pass a name or --text")),
    };

    match result {
        Ok(text) => {
            if args.json {
                let output = RenderResult { result: text };
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                println!("{}", text);
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({ "error": e.to_string() });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else if let RenderError::Syntax(parse_error) = &e {
                let (label, raw) = match (&args.text, &args.name) {
                    (Some(text), _) => ("<text>".to_string(), Some(text.clone())),
                    (None, Some(name)) => (name.clone(), renderer.source().lookup(name, &args.lang)),
                    (None, None) => ("<text>".to_string(), None),
                };
                match raw {
                    Some(raw) => {
                        let diagnostic = TemplateDiagnostic::from_parse_error(&label, &raw, parse_error);
                        eprintln!("{:?}", Report::new(diagnostic));
                    }
                    None => eprintln!("Render error: {}", e),
                }
            } else {
                eprintln!("Render error: {}", e);
            }
            Ok(exitcode::DATAERR)
        }
    }
}
