//! Template rendering engine.
//!
//! This module turns raw templates into finished text. It evaluates the
//! function calls embedded in a template, substitutes variables, and
//! resolves escapes. Raw templates come from a [`TemplateSource`].

use std::collections::HashMap;

use crate::types::Value;

mod call;
mod error;
mod functions;
mod renderer;
mod source;
mod substitute;

pub use call::{CallOutcome, process_call};
pub use error::{LoadError, RenderError, compute_suggestions};
pub use functions::{FunctionMap, FunctionRegistry, TemplateFn, truthy};
pub use renderer::{Renderer, render_template};
pub use source::{EnvTemplateSource, TemplateCatalog, TemplateSource};
pub use substitute::substitute_variables;

/// Variable name to value mapping.
pub type VariableMap = HashMap<String, Value>;
