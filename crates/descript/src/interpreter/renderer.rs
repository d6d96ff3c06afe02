//! Rendering of named templates.
//!
//! A render is a straight pipeline: look up the raw template, resolve every
//! function call from the rightmost one leftward, substitute the remaining
//! variables, strip one level of escaping, and trim.

use bon::Builder;
use tracing::{debug, trace};

use crate::global;
use crate::interpreter::call::{CallScope, SpliceSpan};
use crate::interpreter::error::compute_suggestions;
use crate::interpreter::{
    FunctionMap, FunctionRegistry, RenderError, TemplateSource, VariableMap, substitute_variables,
};
use crate::parser::{find_function_calls, strip_escapes};

/// Render raw template text.
///
/// Call offsets are found once up front. Because they are processed from
/// highest to lowest and a splice only changes text at or after its own
/// start, the remaining offsets stay valid and nested calls are resolved
/// before the calls that contain them.
///
/// Syntax errors report offsets into `raw`, not into the partly resolved
/// working text.
///
/// # Example
///
/// ```
/// use descript::{FunctionRegistry, render_template, vars};
///
/// let functions = FunctionRegistry::with_builtins().snapshot();
/// let text = render_template(
///     r#"at least {min} plur:"character":{min}"#,
///     &vars! { "min" => 5 },
///     &functions,
/// )
/// .unwrap();
/// assert_eq!(text, "at least 5 characters");
/// ```
///
/// # Errors
///
/// Returns an error if a call is malformed or a function returns no result.
pub fn render_template(
    raw: &str,
    vars: &VariableMap,
    functions: &FunctionMap,
) -> Result<String, RenderError> {
    let scope = CallScope::new(vars, functions);
    let mut text = raw.to_string();
    let mut splices: Vec<SpliceSpan> = Vec::new();

    for start in find_function_calls(raw, scope.function_names()) {
        trace!(start, "processing call");
        let resolved = scope.process(&text, start).map_err(|error| match error {
            RenderError::Syntax(parse) => {
                let offset = raw_offset(&splices, parse.offset());
                RenderError::Syntax(parse.with_offset(offset))
            }
            other => other,
        })?;
        if let Some(spliced) = resolved {
            splices.push(spliced.span);
            text = spliced.text;
        }
    }

    let text = substitute_variables(&text, vars);
    let text = strip_escapes(&text);
    Ok(text.trim().to_string())
}

/// Map an offset in the working text back to `raw` by undoing the splices,
/// newest first.
fn raw_offset(splices: &[SpliceSpan], offset: usize) -> usize {
    splices
        .iter()
        .rev()
        .fold(offset, |offset, span| span.unmap(offset))
}

/// Renders named templates from a [`TemplateSource`].
///
/// The renderer owns its function registry; functions passed to a single
/// render call are layered on top of it and win on name collisions.
///
/// # Example
///
/// ```
/// use descript::{Renderer, TemplateCatalog, vars, FunctionMap};
///
/// let mut catalog = TemplateCatalog::new();
/// catalog.insert("GREETING", "", "{a} {b}");
/// catalog.insert("GREETING", "de", "{b}, {a}");
///
/// let renderer = Renderer::builder().source(catalog).build();
/// let v = vars! { "a" => "Hello", "b" => "World" };
///
/// assert_eq!(renderer.render("GREETING", &v, &FunctionMap::new(), "").unwrap(), "Hello World");
/// assert_eq!(renderer.render("GREETING", &v, &FunctionMap::new(), "de").unwrap(), "World, Hello");
/// ```
#[derive(Debug, Builder)]
pub struct Renderer<S: TemplateSource> {
    /// Where raw templates come from.
    source: S,

    /// Functions available to every render.
    #[builder(default = FunctionRegistry::with_builtins())]
    functions: FunctionRegistry,

    /// Language used when a render asks for the default (empty) language.
    #[builder(default, into)]
    default_language: String,
}

impl<S: TemplateSource> Renderer<S> {
    /// Create a renderer with the built-in functions.
    pub fn new(source: S) -> Self {
        Renderer::builder().source(source).build()
    }

    /// Create a renderer seeded from the process-wide function registry.
    pub fn with_global_functions(source: S) -> Self {
        Renderer::builder()
            .source(source)
            .functions(global::registry())
            .build()
    }

    /// Get the template source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Language substituted for an empty language argument.
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Get the function registry (read-only).
    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Get the function registry (mutable) for registering functions.
    pub fn functions_mut(&mut self) -> &mut FunctionRegistry {
        &mut self.functions
    }

    /// Render the template `name` in `language`.
    ///
    /// An empty `language` selects the renderer's default language, which is
    /// itself empty (the default entry) unless configured.
    ///
    /// # Errors
    ///
    /// - [`RenderError::UnknownLanguage`] if a non-default language was
    ///   requested and has no entry
    /// - [`RenderError::TemplateNotFound`] if there is no default entry
    /// - any error from [`render_template`]
    pub fn render(
        &self,
        name: &str,
        vars: &VariableMap,
        funcs: &FunctionMap,
        language: &str,
    ) -> Result<String, RenderError> {
        let language = if language.is_empty() {
            self.default_language.as_str()
        } else {
            language
        };
        let raw = self.lookup(name, language)?;
        debug!(name, language, "rendering template");
        let functions = self.functions.merged(funcs);
        render_template(&raw, vars, &functions)
    }

    /// Render raw template text with this renderer's functions.
    pub fn render_str(
        &self,
        raw: &str,
        vars: &VariableMap,
        funcs: &FunctionMap,
    ) -> Result<String, RenderError> {
        let functions = self.functions.merged(funcs);
        render_template(raw, vars, &functions)
    }

    /// Fetch raw template text, mapping absence to the right error.
    fn lookup(&self, name: &str, language: &str) -> Result<String, RenderError> {
        if let Some(raw) = self.source.lookup(name, language) {
            return Ok(raw);
        }

        if !language.is_empty() {
            debug!(name, language, "no template entry for language");
            return Err(RenderError::UnknownLanguage {
                name: name.to_string(),
                language: language.to_string(),
            });
        }

        let suggestions =
            compute_suggestions(&self.source.normalize_name(name), &self.source.names());
        Err(RenderError::TemplateNotFound {
            name: name.to_string(),
            key: self.source.key(name, language),
            suggestions,
        })
    }
}
