pub mod global;
pub mod interpreter;
pub mod parser;
pub mod types;

pub use interpreter::{
    EnvTemplateSource, FunctionMap, FunctionRegistry, LoadError, RenderError, Renderer,
    TemplateCatalog, TemplateFn, TemplateSource, VariableMap, compute_suggestions,
    render_template,
};
pub use types::{Description, TemplateRef, Value};

/// Creates a `HashMap<String, Value>` from key-value pairs.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// integers, floats, booleans, or strings directly.
///
/// # Example
///
/// ```
/// use descript::{vars, Value};
///
/// let v = vars! { "min" => 5, "hasMin" => true, "field" => "name" };
/// assert_eq!(v.len(), 3);
/// assert_eq!(v["min"].as_number(), Some(5));
/// assert_eq!(v["hasMin"].as_bool(), Some(true));
/// assert_eq!(v["field"].as_string(), Some("name"));
/// ```
#[macro_export]
macro_rules! vars {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
