//! Backslash escaping for template delimiters.
//!
//! A delimiter (`:`, `"`, `{`, `}`) preceded by at least one backslash is
//! escaped. The length of the backslash run is the escape level: rendering
//! removes exactly one level, so `\:` becomes `:` and `\\:` becomes `\:`.
//! Backslashes before any other character are ordinary text.

const ESCAPE: char = '\\';

/// Check whether the character at byte `index` is preceded by a backslash.
pub fn is_escaped(text: &str, index: usize) -> bool {
    index > 0 && text.as_bytes().get(index - 1) == Some(&b'\\')
}

fn is_delimiter(c: char) -> bool {
    matches!(c, ':' | '"' | '{' | '}')
}

/// Escape a function's output so splicing it back into the template does
/// not create new calls, strings, or variable references.
///
/// - `:` directly after a known function name becomes `\:`
/// - every unescaped `"` becomes `\"`
/// - `{name}` for a known variable becomes `\{name\}`
///
/// Occurrences that are already escaped are left alone.
pub fn escape_function_result(
    input: &str,
    function_names: &[&str],
    variable_names: &[&str],
) -> String {
    let mut output = String::with_capacity(input.len());
    let mut index = 0;

    while let Some(c) = input[index..].chars().next() {
        let escaped = is_escaped(input, index);
        match c {
            ':' if !escaped && ends_with_name(&input[..index], function_names) => {
                output.push(ESCAPE);
                output.push(':');
            }
            '"' if !escaped => {
                output.push(ESCAPE);
                output.push('"');
            }
            '{' if !escaped => {
                if let Some(name) = variable_at(&input[index + 1..], variable_names) {
                    output.push(ESCAPE);
                    output.push('{');
                    output.push_str(name);
                    output.push(ESCAPE);
                    output.push('}');
                    // Skip past the name and its closing brace
                    index += name.len() + 2;
                    continue;
                }
                output.push('{');
            }
            _ => output.push(c),
        }
        index += c.len_utf8();
    }

    output
}

/// Remove one level of escaping from every escaped delimiter.
///
/// A single backslash before a delimiter is dropped; a longer run collapses
/// to a single backslash so the delimiter stays escaped for the next pass.
///
/// ```
/// use descript::parser::strip_escapes;
///
/// assert_eq!(strip_escapes(r#"\{a\} \: \""#), r#"{a} : ""#);
/// assert_eq!(strip_escapes(r"\\: \\\{"), r"\: \{");
/// assert_eq!(strip_escapes(r"C:\temp \\n"), r"C:\temp \\n");
/// ```
pub fn strip_escapes(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(position) = rest.find(ESCAPE) {
        output.push_str(&rest[..position]);
        let run = &rest[position..];
        let after = run.trim_start_matches(ESCAPE);
        let slashes = run.len() - after.len();

        match after.chars().next() {
            Some(c) if is_delimiter(c) => {
                if slashes > 1 {
                    output.push(ESCAPE);
                }
                output.push(c);
                rest = &after[c.len_utf8()..];
            }
            _ => {
                output.push_str(&run[..slashes]);
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}

/// Check whether `text` ends with one of `names`.
pub(crate) fn ends_with_name(text: &str, names: &[&str]) -> bool {
    names
        .iter()
        .any(|name| !name.is_empty() && text.ends_with(name))
}

/// Find the known variable whose name, followed by `}`, starts `rest`.
fn variable_at<'n>(rest: &str, names: &[&'n str]) -> Option<&'n str> {
    names.iter().copied().find(|name| {
        !name.is_empty()
            && rest
                .strip_prefix(name)
                .is_some_and(|after| after.starts_with('}'))
    })
}
