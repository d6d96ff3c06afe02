//! Locating function calls in raw template text.

use super::escape::is_escaped;

/// Find the offsets where calls to known functions begin.
///
/// A call begins wherever `name:` is followed by `"` or `{`. The scan does
/// not track strings or variables, so calls nested inside another call's
/// quoted argument are found as well. Offsets are returned from the tail of
/// the text toward its head: resolving them in that order handles inner
/// calls before the calls that contain them, and a splice never moves text
/// to the left of its own start.
///
/// Escaped separators (`name\:`) never start a call.
///
/// ```
/// use descript::parser::find_function_calls;
///
/// let text = r#"opt:"a plur:"b":{n}":{x}"#;
/// assert_eq!(find_function_calls(text, &["opt", "plur"]), vec![7, 0]);
/// ```
pub fn find_function_calls(text: &str, function_names: &[&str]) -> Vec<usize> {
    let mut calls = Vec::new();

    for (index, _) in text.char_indices().rev() {
        let rest = &text[index..];
        let found = function_names
            .iter()
            .filter(|name| !name.is_empty())
            .any(|name| starts_call(text, rest, index, name));
        if found {
            calls.push(index);
        }
    }

    calls
}

/// Check whether `rest` (found at `index` in `text`) begins a call to `name`.
fn starts_call(text: &str, rest: &str, index: usize, name: &str) -> bool {
    let Some(after_name) = rest.strip_prefix(name) else {
        return false;
    };
    let Some(after_colon) = after_name.strip_prefix(':') else {
        return false;
    };
    let colon = index + name.len();
    !is_escaped(text, colon) && (after_colon.starts_with('"') || after_colon.starts_with('{'))
}
