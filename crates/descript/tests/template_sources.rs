//! Integration tests for template sources.
//!
//! Every test that reads or writes the process environment runs under
//! `#[serial]`, temp file creation included since it reads `TMPDIR`.

use std::env;
use std::io::Write;

use descript::{
    EnvTemplateSource, FunctionMap, LoadError, RenderError, Renderer, TemplateCatalog,
    TemplateSource, VariableMap, vars,
};
use serial_test::serial;
use tempfile::NamedTempFile;

// =========================================================================
// TemplateCatalog
// =========================================================================

#[test]
fn catalog_insert_and_lookup() {
    let mut catalog = TemplateCatalog::new();
    assert!(catalog.is_empty());

    catalog.insert("GREETING", "", "Hello");
    catalog.insert("GREETING", "de", "Hallo");
    catalog.insert("FAREWELL", "", "Bye");

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.lookup("GREETING", "").as_deref(), Some("Hello"));
    assert_eq!(catalog.lookup("GREETING", "de").as_deref(), Some("Hallo"));
    assert_eq!(catalog.lookup("GREETING", "fr"), None);
    assert_eq!(catalog.lookup("MISSING", ""), None);
    assert_eq!(catalog.languages("GREETING"), vec!["", "de"]);
    assert_eq!(catalog.names(), vec!["FAREWELL", "GREETING"]);
}

#[test]
fn catalog_insert_replaces_entry() {
    let mut catalog = TemplateCatalog::new();
    catalog.insert("GREETING", "", "Hello");
    catalog.insert("GREETING", "", "Hi");
    assert_eq!(catalog.lookup("GREETING", "").as_deref(), Some("Hi"));
}

#[test]
fn catalog_extend_prefers_other() {
    let mut base = TemplateCatalog::new();
    base.insert("GREETING", "", "Hello");
    base.insert("GREETING", "de", "Hallo");

    let mut overlay = TemplateCatalog::new();
    overlay.insert("GREETING", "", "Hi");
    overlay.insert("FAREWELL", "", "Bye");

    base.extend(overlay);
    assert_eq!(base.lookup("GREETING", "").as_deref(), Some("Hi"));
    assert_eq!(base.lookup("GREETING", "de").as_deref(), Some("Hallo"));
    assert_eq!(base.lookup("FAREWELL", "").as_deref(), Some("Bye"));
}

#[test]
fn catalog_entries_in_order() {
    let catalog = TemplateCatalog::from_json_str(
        r#"{ "B": { "": "b" }, "A": { "de": "a-de", "": "a" } }"#,
    )
    .unwrap();
    let entries: Vec<_> = catalog.entries().collect();
    assert_eq!(
        entries,
        vec![("A", "", "a"), ("A", "de", "a-de"), ("B", "", "b")]
    );
}

#[test]
#[serial]
fn catalog_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "ENSURE_MINLEN": {{
                "": "at least {{min}} plur:\"character\":{{min}}",
                "de": "mindestens {{min}} Zeichen"
            }}
        }}"#
    )
    .unwrap();

    let catalog = TemplateCatalog::load(file.path()).unwrap();
    let renderer = Renderer::new(catalog);
    let text = renderer
        .render("ENSURE_MINLEN", &vars! { "min" => 1 }, &FunctionMap::new(), "")
        .unwrap();
    assert_eq!(text, "at least 1 character");
}

#[test]
#[serial]
fn catalog_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let error = TemplateCatalog::load(&path).unwrap_err();
    assert!(matches!(error, LoadError::Io { path: ref p, .. } if *p == path));
}

#[test]
#[serial]
fn catalog_load_invalid_json() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "GREETING": "not an object" }}"#).unwrap();

    let error = TemplateCatalog::load(file.path()).unwrap_err();
    assert!(matches!(error, LoadError::Json { .. }));
    assert!(error.to_string().starts_with("failed to parse"));
}

#[test]
fn catalog_serializes_as_nested_object() {
    let mut catalog = TemplateCatalog::new();
    catalog.insert("GREETING", "", "Hello");
    insta::assert_snapshot!(
        serde_json::to_string(&catalog).unwrap(),
        @r#"{"GREETING":{"":"Hello"}}"#
    );
}

// =========================================================================
// EnvTemplateSource
// =========================================================================

#[test]
fn env_source_keys() {
    let source = EnvTemplateSource::default();
    assert_eq!(source.prefix(), "CTOR_ENSURE_");
    assert_eq!(source.suffix(), "_DESC");
    assert_eq!(source.key("minlen", ""), "CTOR_ENSURE_MINLEN_DESC");
    assert_eq!(source.key("minlen", "de"), "CTOR_ENSURE_MINLEN--DE_DESC");
}

#[test]
#[serial]
fn env_source_reads_variables() {
    let source = EnvTemplateSource::builder()
        .prefix("DESCRIPT_TEST_READ_")
        .build();
    // SAFETY: environment tests are serialized, no other thread touches the environment
    unsafe {
        env::set_var("DESCRIPT_TEST_READ_GREETING_DESC", "{a} {b}");
        env::set_var("DESCRIPT_TEST_READ_GREETING--DE_DESC", "{b}, {a}");
    }

    let renderer = Renderer::new(source);
    let v = vars! { "a" => "Hello", "b" => "World" };
    assert_eq!(
        renderer.render("GREETING", &v, &FunctionMap::new(), "").unwrap(),
        "Hello World"
    );
    assert_eq!(
        renderer.render("greeting", &v, &FunctionMap::new(), "de").unwrap(),
        "World, Hello"
    );
    assert_eq!(renderer.source().names(), vec!["GREETING"]);
}

#[test]
#[serial]
fn env_source_empty_variable_is_missing() {
    let source = EnvTemplateSource::builder()
        .prefix("DESCRIPT_TEST_EMPTY_")
        .build();
    // SAFETY: environment tests are serialized, no other thread touches the environment
    unsafe {
        env::set_var("DESCRIPT_TEST_EMPTY_BLANK_DESC", "");
    }
    assert_eq!(source.lookup("BLANK", ""), None);
}

#[test]
#[serial]
fn env_source_unknown_template() {
    let renderer = Renderer::new(
        EnvTemplateSource::builder()
            .prefix("DESCRIPT_TEST_UNKNOWN_")
            .build(),
    );
    let error = renderer
        .render("UNKNOWN", &VariableMap::new(), &FunctionMap::new(), "")
        .unwrap_err();
    assert!(matches!(error, RenderError::TemplateNotFound { .. }));
    insta::assert_snapshot!(
        error.to_string(),
        @"template 'DESCRIPT_TEST_UNKNOWN_UNKNOWN_DESC' is not registered"
    );
}

#[test]
#[serial]
fn env_source_to_catalog() {
    let source = EnvTemplateSource::builder()
        .prefix("DESCRIPT_TEST_CATALOG_")
        .build();
    // SAFETY: environment tests are serialized, no other thread touches the environment
    unsafe {
        env::set_var("DESCRIPT_TEST_CATALOG_MINLEN_DESC", "at least {min}");
        env::set_var("DESCRIPT_TEST_CATALOG_MINLEN--DE_DESC", "mindestens {min}");
        env::set_var("DESCRIPT_TEST_CATALOG_BLANK_DESC", "");
    }

    let catalog = source.to_catalog();
    assert_eq!(catalog.names(), vec!["MINLEN"]);
    assert_eq!(catalog.languages("MINLEN"), vec!["", "de"]);
    assert_eq!(
        catalog.lookup("MINLEN", "de").as_deref(),
        Some("mindestens {min}")
    );
}

#[test]
#[serial]
fn env_source_suggestions_ignore_case() {
    let source = EnvTemplateSource::builder()
        .prefix("DESCRIPT_TEST_SUGGEST_")
        .build();
    // SAFETY: environment tests are serialized, no other thread touches the environment
    unsafe {
        env::set_var("DESCRIPT_TEST_SUGGEST_MINLEN_DESC", "at least {min}");
    }

    let renderer = Renderer::new(source);
    for name in ["minlne", "MINLNE", "MinLne"] {
        let error = renderer
            .render(name, &VariableMap::new(), &FunctionMap::new(), "")
            .unwrap_err();
        let RenderError::TemplateNotFound { suggestions, .. } = error else {
            panic!("expected TemplateNotFound for {name}, got {error:?}");
        };
        assert_eq!(suggestions, vec!["MINLEN".to_string()], "suggestions for {name}");
    }
}
