//! Template function registry and the built-in functions.
//!
//! Template functions are variadic over strings. Returning `None` means the
//! function produced no result, which fails the render.

use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

/// Template function signature.
pub type TemplateFn = Arc<dyn Fn(&[String]) -> Option<String> + Send + Sync>;

/// Function name to function mapping.
pub type FunctionMap = HashMap<String, TemplateFn>;

/// A registry of functions callable from templates.
///
/// # Example
///
/// ```
/// use descript::FunctionRegistry;
///
/// let mut registry = FunctionRegistry::with_builtins();
/// registry.register("upper", |args| args.first().map(|s| s.to_uppercase()));
///
/// assert!(registry.contains("plur"));
/// assert!(registry.contains("upper"));
/// assert_eq!(registry.names(), vec!["opt", "plur", "trn", "upper"]);
/// ```
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: FunctionMap,
}

impl FunctionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with `opt`, `plur` and `trn`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("opt", opt);
        registry.register("plur", plur);
        registry.register("trn", trn);
        registry
    }

    /// Insert a function, replacing any previous function with that name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        function: impl Fn(&[String]) -> Option<String> + Send + Sync + 'static,
    ) {
        self.functions.insert(name.into(), Arc::new(function));
    }

    /// Insert an already shared function.
    pub fn insert(&mut self, name: impl Into<String>, function: TemplateFn) {
        self.functions.insert(name.into(), function);
    }

    /// Get a function by name.
    pub fn get(&self, name: &str) -> Option<&TemplateFn> {
        self.functions.get(name)
    }

    /// Check if a function is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered function names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether the registry has no functions.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Copy of the function map.
    pub fn snapshot(&self) -> FunctionMap {
        self.functions.clone()
    }

    /// Copy of the function map with `overrides` layered on top.
    ///
    /// Functions in `overrides` win on name collisions.
    pub fn merged(&self, overrides: &FunctionMap) -> FunctionMap {
        let mut functions = self.snapshot();
        functions.extend(
            overrides
                .iter()
                .map(|(name, function)| (name.clone(), Arc::clone(function))),
        );
        functions
    }
}

impl Debug for FunctionRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}

impl From<FunctionMap> for FunctionRegistry {
    fn from(functions: FunctionMap) -> Self {
        Self { functions }
    }
}

/// Interpret a template argument as a boolean.
///
/// Empty strings, `0` and `false` (any case) are false.
pub fn truthy(arg: &str) -> bool {
    let arg = arg.trim();
    !(arg.is_empty() || arg == "0" || arg.eq_ignore_ascii_case("false"))
}

fn arg(args: &[String], index: usize) -> &str {
    args.get(index).map_or("", String::as_str)
}

/// `opt(str, cond)`: the string when the condition holds, else nothing.
fn opt(args: &[String]) -> Option<String> {
    let text = arg(args, 0);
    Some(if truthy(arg(args, 1)) {
        text.to_string()
    } else {
        String::new()
    })
}

/// `plur(word, count, suffix = "s")`: pluralize unless the count is one.
fn plur(args: &[String]) -> Option<String> {
    let word = arg(args, 0).trim_end();
    let singular = arg(args, 1)
        .trim()
        .parse::<f64>()
        .is_ok_and(|count| count == 1.0);
    let suffix = args.get(2).map_or("s", String::as_str);

    let mut result = word.to_string();
    if !singular {
        result.push_str(suffix);
    }
    Some(result)
}

/// `trn(cond, ifTrue, ifFalse)`: pick one of two strings.
fn trn(args: &[String]) -> Option<String> {
    let chosen = if truthy(arg(args, 0)) {
        arg(args, 1)
    } else {
        arg(args, 2)
    };
    Some(chosen.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn opt_passes_through_when_true() {
        assert_eq!(opt(&strings(&["test", "true"])).unwrap(), "test");
    }

    #[test]
    fn opt_is_empty_when_false() {
        assert_eq!(opt(&strings(&["test", "false"])).unwrap(), "");
        assert_eq!(opt(&strings(&["test"])).unwrap(), "");
    }

    #[test]
    fn plur_default_suffix() {
        assert_eq!(plur(&strings(&["character", "0"])).unwrap(), "characters");
        assert_eq!(plur(&strings(&["character", "1"])).unwrap(), "character");
        assert_eq!(plur(&strings(&["character", "2"])).unwrap(), "characters");
    }

    #[test]
    fn plur_field() {
        assert_eq!(plur(&strings(&["field", "1"])).unwrap(), "field");
        assert_eq!(plur(&strings(&["field", "0"])).unwrap(), "fields");
        assert_eq!(plur(&strings(&["field", "1.0"])).unwrap(), "field");
    }

    #[test]
    fn plur_custom_suffix() {
        assert_eq!(plur(&strings(&["str", "0", "z"])).unwrap(), "strz");
        assert_eq!(plur(&strings(&["str", "1", "z"])).unwrap(), "str");
    }

    #[test]
    fn plur_trims_trailing_whitespace() {
        assert_eq!(plur(&strings(&["field  ", "3"])).unwrap(), "fields");
    }

    #[test]
    fn trn_picks_branch() {
        assert_eq!(trn(&strings(&["true", "yes", "no"])).unwrap(), "yes");
        assert_eq!(trn(&strings(&["false", "yes", "no"])).unwrap(), "no");
        assert_eq!(trn(&strings(&["0", "yes"])).unwrap(), "");
    }

    #[test]
    fn truthiness() {
        assert!(truthy("true"));
        assert!(truthy("1"));
        assert!(truthy("anything"));
        assert!(!truthy(""));
        assert!(!truthy("0"));
        assert!(!truthy("FALSE"));
    }

    #[test]
    fn merged_prefers_overrides() {
        let registry = FunctionRegistry::with_builtins();
        let mut overrides = FunctionMap::new();
        overrides.insert(
            "opt".to_string(),
            Arc::new(|_: &[String]| Some("custom".to_string())) as TemplateFn,
        );

        let merged = registry.merged(&overrides);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged["opt"](&[]).unwrap(), "custom");
    }
}
