//! Tests for the process-wide function registry.

use descript::global::{default_functions, register_template_function, with_registry};
use descript::{FunctionMap, Renderer, TemplateCatalog, vars};

#[test]
fn builtins_are_registered() {
    let functions = default_functions();
    assert!(functions.contains_key("opt"));
    assert!(functions.contains_key("plur"));
    assert!(functions.contains_key("trn"));
}

#[test]
fn registered_function_grows_registry() {
    let before = with_registry(|registry| registry.len());
    register_template_function("global_test_reverse", |args| {
        args.first().map(|s| s.chars().rev().collect())
    });
    let after = with_registry(|registry| registry.len());

    assert!(before < after);
    assert!(default_functions().contains_key("global_test_reverse"));
}

#[test]
fn renderer_uses_global_functions() {
    register_template_function("global_test_shout", |args| {
        args.first().map(|s| s.to_uppercase())
    });

    let mut catalog = TemplateCatalog::new();
    catalog.insert("LOUD", "", r#"global_test_shout:"{word}"!"#);
    let renderer = Renderer::with_global_functions(catalog);

    let text = renderer
        .render("LOUD", &vars! { "word" => "hey" }, &FunctionMap::new(), "")
        .unwrap();
    assert_eq!(text, "HEY!");
}

#[test]
fn renderer_snapshot_ignores_later_registrations() {
    let renderer = Renderer::with_global_functions(TemplateCatalog::new());
    register_template_function("global_test_late", |_| Some(String::new()));

    assert!(!renderer.functions().contains("global_test_late"));
}
