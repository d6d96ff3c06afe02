//! Evaluation of a single function call and splicing of its result.

use tracing::trace;

use crate::interpreter::{FunctionMap, RenderError, VariableMap};
use crate::parser::ast::{Argument, Invocation, Piece, TrailingEscape};
use crate::parser::{ends_with_name, escape_function_result, parse_invocation};

/// The result of processing one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// The call was evaluated; holds the new working text.
    Resolved(String),
    /// The call names no known function; the text stays as it is.
    UnknownFunction,
}

/// Evaluate the call starting at `start` and splice its result into `text`.
///
/// The function's output is escaped before it is spliced so that it cannot
/// be read as a new call, string delimiter, or variable reference later on.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use descript::interpreter::{CallOutcome, FunctionMap, TemplateFn, process_call};
/// use descript::vars;
///
/// let mut funcs = FunctionMap::new();
/// let concat: TemplateFn = Arc::new(|args: &[String]| Some(args.concat()));
/// funcs.insert("concat".to_string(), concat);
///
/// let outcome = process_call("concat:{a}:{b} tail", 0, &vars! { "a" => 5, "b" => 3 }, &funcs);
/// assert_eq!(outcome.unwrap(), CallOutcome::Resolved("53 tail".to_string()));
/// ```
///
/// # Errors
///
/// Returns an error if the call is malformed or the function returns no
/// result.
pub fn process_call(
    text: &str,
    start: usize,
    vars: &VariableMap,
    functions: &FunctionMap,
) -> Result<CallOutcome, RenderError> {
    let spliced = CallScope::new(vars, functions).process(text, start)?;
    Ok(spliced.map_or(CallOutcome::UnknownFunction, |spliced| {
        CallOutcome::Resolved(spliced.text)
    }))
}

/// A resolved call: the new working text and where the result landed.
pub(crate) struct Spliced {
    pub(crate) text: String,
    pub(crate) span: SpliceSpan,
}

/// Byte range `start..replaced_end` of the old text became `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SpliceSpan {
    pub(crate) start: usize,
    pub(crate) replaced_end: usize,
    pub(crate) end: usize,
}

impl SpliceSpan {
    /// Map an offset in the text after this splice back to the text before
    /// it. Offsets inside the spliced result point at the call start.
    pub(crate) fn unmap(&self, offset: usize) -> usize {
        if offset >= self.end {
            offset - self.end + self.replaced_end
        } else if offset > self.start {
            self.start
        } else {
            offset
        }
    }
}

/// Variables and functions visible while resolving the calls of one render.
pub(crate) struct CallScope<'a> {
    vars: &'a VariableMap,
    functions: &'a FunctionMap,
    function_names: Vec<&'a str>,
    variable_names: Vec<&'a str>,
}

impl<'a> CallScope<'a> {
    pub(crate) fn new(vars: &'a VariableMap, functions: &'a FunctionMap) -> Self {
        let mut function_names: Vec<&str> = functions.keys().map(String::as_str).collect();
        function_names.sort_unstable();
        let mut variable_names: Vec<&str> = vars.keys().map(String::as_str).collect();
        variable_names.sort_unstable();
        Self {
            vars,
            functions,
            function_names,
            variable_names,
        }
    }

    /// Known function names, sorted.
    pub(crate) fn function_names(&self) -> &[&'a str] {
        &self.function_names
    }

    /// Resolve the call at `start`, or `None` if it names no known function.
    pub(crate) fn process(&self, text: &str, start: usize) -> Result<Option<Spliced>, RenderError> {
        let invocation = parse_invocation(text, start)?;

        let Some(function) = self.functions.get(&invocation.name) else {
            trace!(name = %invocation.name, start, "leaving call to unknown function");
            return Ok(None);
        };

        let args: Vec<String> = invocation
            .arguments
            .iter()
            .map(|argument| self.resolve_argument(argument))
            .collect();

        let result = function(&args).ok_or_else(|| RenderError::FunctionResultMissing {
            name: invocation.name.clone(),
        })?;
        let escaped = escape_function_result(&result, &self.function_names, &self.variable_names);

        trace!(
            name = %invocation.name,
            start = invocation.start,
            end = invocation.end,
            "resolved call"
        );
        Ok(Some(self.splice(text, &invocation, &escaped)))
    }

    /// Replace the call's span with `replacement`.
    fn splice(&self, text: &str, invocation: &Invocation, replacement: &str) -> Spliced {
        let mut end = invocation.end;
        let mut spliced = String::with_capacity(text.len() + replacement.len());
        spliced.push_str(&text[..invocation.start]);
        spliced.push_str(replacement);

        // An escaped colon right after the call is a literal colon, unless
        // the result ends in a function name and would then read as a call.
        if invocation.trailing == Some(TrailingEscape::Colon)
            && !ends_with_name(replacement, &self.function_names)
        {
            spliced.push(':');
            end += 2;
        }

        let span = SpliceSpan {
            start: invocation.start,
            replaced_end: end,
            end: spliced.len(),
        };
        spliced.push_str(&text[end..]);
        Spliced {
            text: spliced,
            span,
        }
    }

    fn resolve_argument(&self, argument: &Argument) -> String {
        match argument {
            Argument::Variable(name) => self.variable_text(name),
            Argument::Quoted(pieces) => {
                let mut text = String::new();
                for piece in pieces {
                    match piece {
                        Piece::Text(literal) => text.push_str(literal),
                        Piece::Variable(name) => text.push_str(&self.variable_text(name)),
                    }
                }
                text
            }
            Argument::Empty => String::new(),
        }
    }

    /// The value of a variable, or the literal reference if it is unknown.
    fn variable_text(&self, name: &str) -> String {
        self.vars
            .get(name)
            .map_or_else(|| format!("{{{name}}}"), ToString::to_string)
    }
}
