//! Tests for evaluating a single function call and splicing its result.

use std::sync::Arc;

use descript::interpreter::{CallOutcome, process_call};
use descript::{FunctionMap, RenderError, TemplateFn, VariableMap, vars};

/// Joins its arguments, writing `<empty>` for empty ones.
fn concat_functions() -> FunctionMap {
    let concat: TemplateFn = Arc::new(|args: &[String]| {
        Some(
            args.iter()
                .map(|arg| if arg.is_empty() { "<empty>" } else { arg.as_str() })
                .collect::<String>(),
        )
    });
    let mut functions = FunctionMap::new();
    functions.insert("concat".to_string(), concat);
    functions
}

fn test_vars() -> VariableMap {
    vars! {
        "a" => 5,
        "b" => 3,
        "c" => 22,
        "d" => "Hello, world",
        "e" => "concat",
        "empty" => "",
    }
}

fn resolve(text: &str, start: usize) -> String {
    match process_call(text, start, &test_vars(), &concat_functions()).unwrap() {
        CallOutcome::Resolved(text) => text,
        CallOutcome::UnknownFunction => panic!("expected a resolved call"),
    }
}

// =========================================================================
// Arguments
// =========================================================================

#[test]
fn string_arguments() {
    assert_eq!(resolve(r#"concat:"Hello":"World""#, 0), "HelloWorld");
}

#[test]
fn variable_arguments() {
    assert_eq!(resolve("concat:{a}:{b}:{d}:{c}", 0), "53Hello, world22");
}

#[test]
fn empty_variable_values() {
    assert_eq!(resolve("concat:{a}:{b}:{empty}:{c}", 0), "53<empty>22");
}

#[test]
fn variables_inside_strings() {
    assert_eq!(
        resolve(r#"concat:{a}:{b}:{d}:{c}:"Hello":"{a} World!""#, 0),
        "53Hello, world22Hello5 World!"
    );
}

#[test]
fn back_to_back_variables_inside_a_string() {
    assert_eq!(
        resolve(r#"concat:{a}:{b}:"{a}{b}string{c}string{c}{b}{a}{empty}{a}""#, 0),
        "5353string22string22355"
    );
}

#[test]
fn escaped_variables_inside_strings_are_kept() {
    assert_eq!(
        resolve(r#"concat:{a}:"{a}\{b}":"{a}{b\}":"{a}\{b\}":"{a}{b}""#, 0),
        r"55\{b}5{b\}5\{b\}53"
    );
}

#[test]
fn colons_inside_strings_are_not_separators() {
    assert_eq!(
        resolve(
            r#"test concat:{a}:{b}:{d}:{c}:"The colon : inside should be ignored":"last arg""#,
            5
        ),
        "test 53Hello, world22The colon : inside should be ignoredlast arg"
    );
}

#[test]
fn unknown_variables_stay_literal() {
    assert_eq!(
        resolve(r#"concat:{a}:{b}:{d}:"i am a {variable}":{unknown}:{c}"#, 0),
        "53Hello, worldi am a {variable}{unknown}22"
    );
}

#[test]
fn escaped_quotes_inside_strings() {
    assert_eq!(
        resolve(r#"concat:{a}:{b}:"\"{a}{b}\"Hello\"""#, 0),
        r#"53\"53\"Hello\""#
    );
}

// =========================================================================
// Text after the call
// =========================================================================

#[test]
fn escaped_colon_after_call_becomes_literal() {
    assert_eq!(resolve(r"concat:{a}:{b}\: after colon", 0), "53: after colon");
}

#[test]
fn escaped_colon_stays_when_result_ends_with_function_name() {
    assert_eq!(
        resolve(r"concat:{a}:{e}\: after colon", 0),
        r"5concat\: after colon"
    );
}

#[test]
fn escaped_quote_after_call_stays_escaped() {
    assert_eq!(resolve(r#"concat:{a}:{b}\" after quote"#, 0), r#"53\" after quote"#);
}

#[test]
fn text_before_and_after_is_preserved() {
    assert_eq!(resolve("x concat:{a} y", 2), "x 5 y");
}

// =========================================================================
// Result escaping
// =========================================================================

#[test]
fn result_quotes_are_escaped() {
    let mut functions = concat_functions();
    let quote: TemplateFn = Arc::new(|_: &[String]| Some(r#"say "hi""#.to_string()));
    functions.insert("quote".to_string(), quote);

    let outcome = process_call(r#"quote:"" end"#, 0, &VariableMap::new(), &functions).unwrap();
    assert_eq!(outcome, CallOutcome::Resolved(r#"say \"hi\" end"#.to_string()));
}

#[test]
fn result_call_syntax_is_escaped() {
    let outcome = process_call("concat:{e}:{x}", 0, &test_vars(), &concat_functions()).unwrap();
    // "concat" followed by the literal "{x}" must not read as a new call
    assert_eq!(outcome, CallOutcome::Resolved("concat{x}".to_string()));

    let outcome = process_call(
        r#"concat:{e}:":{a}""#,
        0,
        &test_vars(),
        &concat_functions(),
    )
    .unwrap();
    assert_eq!(outcome, CallOutcome::Resolved(r"concat\:5".to_string()));
}

#[test]
fn result_known_variables_are_escaped() {
    let varvar = vars! { "a" => "Hello", "varvar" => "{a}" };
    let outcome = process_call("concat:{varvar}", 0, &varvar, &concat_functions()).unwrap();
    assert_eq!(outcome, CallOutcome::Resolved(r"\{a\}".to_string()));
}

// =========================================================================
// Failures
// =========================================================================

#[test]
fn unknown_function_leaves_text() {
    let outcome = process_call(r#"upper:"x""#, 0, &test_vars(), &concat_functions()).unwrap();
    assert_eq!(outcome, CallOutcome::UnknownFunction);
}

#[test]
fn missing_result_is_an_error() {
    let mut functions = FunctionMap::new();
    let nothing: TemplateFn = Arc::new(|_: &[String]| None::<String>);
    functions.insert("nothing".to_string(), nothing);

    let error = process_call(r#"nothing:"x""#, 0, &test_vars(), &functions).unwrap_err();
    assert!(matches!(error, RenderError::FunctionResultMissing { ref name } if name == "nothing"));
}

#[test]
fn malformed_call_is_a_syntax_error() {
    let error = process_call(r#"concat:"open"#, 0, &test_vars(), &concat_functions()).unwrap_err();
    assert!(matches!(error, RenderError::Syntax(_)));
}
