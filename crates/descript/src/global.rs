//! Process-wide template function registry.
//!
//! Seeded with the built-in functions. Registration is meant to happen during
//! startup; renders work on a snapshot, so a registration never changes a
//! render that is already running.

use std::sync::{LazyLock, PoisonError, RwLock};

use crate::interpreter::{FunctionMap, FunctionRegistry};

static GLOBAL_FUNCTIONS: LazyLock<RwLock<FunctionRegistry>> =
    LazyLock::new(|| RwLock::new(FunctionRegistry::with_builtins()));

/// Provides read access to the global registry.
pub fn with_registry<T>(f: impl FnOnce(&FunctionRegistry) -> T) -> T {
    let guard = GLOBAL_FUNCTIONS
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    f(&guard)
}

/// Provides write access to the global registry.
pub fn with_registry_mut<T>(f: impl FnOnce(&mut FunctionRegistry) -> T) -> T {
    let mut guard = GLOBAL_FUNCTIONS
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Register a function for every template rendered through the global registry.
pub fn register_template_function(
    name: impl Into<String>,
    function: impl Fn(&[String]) -> Option<String> + Send + Sync + 'static,
) {
    with_registry_mut(|registry| registry.register(name, function));
}

/// Copy of the currently registered functions.
pub fn default_functions() -> FunctionMap {
    with_registry(FunctionRegistry::snapshot)
}

/// Copy of the global registry.
pub fn registry() -> FunctionRegistry {
    with_registry(FunctionRegistry::clone)
}
