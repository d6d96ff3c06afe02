use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use bon::Builder;

use crate::interpreter::{FunctionMap, RenderError, Renderer, TemplateSource, VariableMap};

/// A reference to a named template plus the values it should be rendered with.
///
/// # Example
///
/// ```
/// use descript::{TemplateRef, vars};
///
/// let reference = TemplateRef::builder()
///     .name("ENSURE_MINLEN")
///     .vars(vars! { "min" => 5 })
///     .build();
/// assert_eq!(reference.name, "ENSURE_MINLEN");
/// assert!(reference.funcs.is_empty());
/// ```
#[derive(Clone, Default, Builder)]
#[builder(on(String, into))]
pub struct TemplateRef {
    /// Template name passed to the template source.
    pub name: String,

    /// Variables available to the template.
    #[builder(default)]
    pub vars: VariableMap,

    /// Extra functions, taking precedence over the renderer's own.
    #[builder(default)]
    pub funcs: FunctionMap,
}

impl Debug for TemplateRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut funcs: Vec<&str> = self.funcs.keys().map(String::as_str).collect();
        funcs.sort_unstable();
        f.debug_struct("TemplateRef")
            .field("name", &self.name)
            .field("vars", &self.vars)
            .field("funcs", &funcs)
            .finish()
    }
}

/// The description attached to a validation rule.
///
/// Only the [`Description::Template`] variant touches the template engine;
/// the other two are returned as they are.
///
/// # Example
///
/// ```
/// use descript::{Description, Renderer, TemplateCatalog, TemplateRef, vars};
///
/// let mut catalog = TemplateCatalog::new();
/// catalog.insert("ENSURE_MINLEN", "", "at least {min} plur:\"character\":{min}");
/// let renderer = Renderer::new(catalog);
///
/// let immediate = Description::from("must not be empty");
/// assert_eq!(immediate.evaluate(&renderer, "").unwrap(), "must not be empty");
///
/// let thunk = Description::thunk(|| "computed".to_string());
/// assert_eq!(thunk.evaluate(&renderer, "").unwrap(), "computed");
///
/// let template = Description::from(
///     TemplateRef::builder().name("ENSURE_MINLEN").vars(vars! { "min" => 5 }).build(),
/// );
/// assert_eq!(template.evaluate(&renderer, "").unwrap(), "at least 5 characters");
/// ```
#[derive(Clone)]
pub enum Description {
    /// A fixed string.
    Immediate(String),

    /// A string computed on demand.
    Thunk(Arc<dyn Fn() -> String + Send + Sync>),

    /// A named template rendered through a [`Renderer`].
    Template(TemplateRef),
}

impl Description {
    /// Wrap a closure as a [`Description::Thunk`].
    pub fn thunk(f: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Description::Thunk(Arc::new(f))
    }

    /// Produce the description text.
    ///
    /// `language` is only consulted for template descriptions; an empty
    /// string selects the default language.
    pub fn evaluate<S: TemplateSource>(
        &self,
        renderer: &Renderer<S>,
        language: &str,
    ) -> Result<String, RenderError> {
        match self {
            Description::Immediate(text) => Ok(text.clone()),
            Description::Thunk(f) => Ok(f()),
            Description::Template(reference) => renderer.render(
                &reference.name,
                &reference.vars,
                &reference.funcs,
                language,
            ),
        }
    }
}

impl Debug for Description {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Description::Immediate(text) => f.debug_tuple("Immediate").field(text).finish(),
            Description::Thunk(_) => f.write_str("Thunk(..)"),
            Description::Template(reference) => f.debug_tuple("Template").field(reference).finish(),
        }
    }
}

impl From<&str> for Description {
    fn from(text: &str) -> Self {
        Description::Immediate(text.to_string())
    }
}

impl From<String> for Description {
    fn from(text: String) -> Self {
        Description::Immediate(text)
    }
}

impl From<TemplateRef> for Description {
    fn from(reference: TemplateRef) -> Self {
        Description::Template(reference)
    }
}
