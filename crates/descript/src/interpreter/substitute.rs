//! Plain variable substitution, run after all calls are resolved.

use crate::interpreter::VariableMap;
use crate::parser::is_escaped;

/// Replace every unescaped `{name}` of a known variable with its value.
///
/// Unknown names and escaped references (`\{name}`, `{name\}`) are left as
/// they are. Substituted values are never scanned again.
///
/// ```
/// use descript::interpreter::substitute_variables;
/// use descript::vars;
///
/// let v = vars! { "a" => "Hello" };
/// assert_eq!(substitute_variables(r"{a} \{a} {b}", &v), r"Hello \{a} {b}");
/// ```
pub fn substitute_variables(text: &str, vars: &VariableMap) -> String {
    let mut output = String::with_capacity(text.len());
    let mut index = 0;

    while let Some(offset) = text[index..].find('{') {
        let open = index + offset;
        output.push_str(&text[index..open]);

        let rest = &text[open + 1..];
        let value = rest
            .find('}')
            .filter(|_| !is_escaped(text, open))
            .and_then(|close| vars.get(&rest[..close]).map(|value| (close, value)));

        match value {
            Some((close, value)) => {
                output.push_str(&value.to_string());
                index = open + close + 2;
            }
            None => {
                output.push('{');
                index = open + 1;
            }
        }
    }

    output.push_str(&text[index..]);
    output
}
