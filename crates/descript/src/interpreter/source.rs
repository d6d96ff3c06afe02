//! Template sources: where raw template text comes from.
//!
//! The renderer only needs [`TemplateSource::lookup`]. Two sources are
//! provided: an in-memory [`TemplateCatalog`] (optionally loaded from JSON)
//! and [`EnvTemplateSource`], which reads process environment variables.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::interpreter::error::LoadError;

/// A provider of raw template text keyed by name and language.
///
/// The empty string is the default language.
pub trait TemplateSource {
    /// Look up the raw template for `name` in `language`.
    fn lookup(&self, name: &str, language: &str) -> Option<String>;

    /// Names of all templates this source knows about.
    ///
    /// Used for "did you mean" suggestions; sources that cannot enumerate
    /// their templates return an empty list.
    fn names(&self) -> Vec<String> {
        Vec::new()
    }

    /// The form of `name` this source stores, used when comparing against
    /// [`TemplateSource::names`].
    fn normalize_name(&self, name: &str) -> String {
        name.to_string()
    }

    /// Human-readable key for `name` in `language`, used in error messages.
    fn key(&self, name: &str, language: &str) -> String {
        if language.is_empty() {
            name.to_string()
        } else {
            format!("{name}[{language}]")
        }
    }
}

impl<T: TemplateSource + ?Sized> TemplateSource for &T {
    fn lookup(&self, name: &str, language: &str) -> Option<String> {
        (**self).lookup(name, language)
    }

    fn names(&self) -> Vec<String> {
        (**self).names()
    }

    fn normalize_name(&self, name: &str) -> String {
        (**self).normalize_name(name)
    }

    fn key(&self, name: &str, language: &str) -> String {
        (**self).key(name, language)
    }
}

impl<T: TemplateSource + ?Sized> TemplateSource for Box<T> {
    fn lookup(&self, name: &str, language: &str) -> Option<String> {
        (**self).lookup(name, language)
    }

    fn names(&self) -> Vec<String> {
        (**self).names()
    }

    fn normalize_name(&self, name: &str) -> String {
        (**self).normalize_name(name)
    }

    fn key(&self, name: &str, language: &str) -> String {
        (**self).key(name, language)
    }
}

/// In-memory template store: name -> language -> raw template.
///
/// The JSON form maps each template name to an object of language entries,
/// with `""` as the default language:
///
/// ```
/// use descript::{TemplateCatalog, TemplateSource};
///
/// let catalog = TemplateCatalog::from_json_str(r#"{
///     "ENSURE_NONEMPTY": { "": "must not be empty", "de": "darf nicht leer sein" }
/// }"#).unwrap();
///
/// assert_eq!(catalog.lookup("ENSURE_NONEMPTY", "de").as_deref(), Some("darf nicht leer sein"));
/// assert_eq!(catalog.lookup("ENSURE_NONEMPTY", "fr"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateCatalog {
    templates: BTreeMap<String, BTreeMap<String, String>>,
}

impl TemplateCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&content).map_err(|e| LoadError::Json {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Add or replace the template for `name` in `language`.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        language: impl Into<String>,
        raw: impl Into<String>,
    ) {
        self.templates
            .entry(name.into())
            .or_default()
            .insert(language.into(), raw.into());
    }

    /// Merge another catalog into this one. Entries from `other` win.
    pub fn extend(&mut self, other: TemplateCatalog) {
        for (name, languages) in other.templates {
            self.templates.entry(name).or_default().extend(languages);
        }
    }

    /// Languages available for a template, default language first.
    pub fn languages(&self, name: &str) -> Vec<&str> {
        self.templates
            .get(name)
            .map(|languages| languages.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// All `(name, language, raw)` entries in name order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.templates.iter().flat_map(|(name, languages)| {
            languages
                .iter()
                .map(move |(language, raw)| (name.as_str(), language.as_str(), raw.as_str()))
        })
    }

    /// Number of distinct template names.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the catalog has no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateSource for TemplateCatalog {
    fn lookup(&self, name: &str, language: &str) -> Option<String> {
        self.templates
            .get(name)
            .and_then(|languages| languages.get(language))
            .cloned()
    }

    fn names(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }
}

/// Reads templates from environment variables.
///
/// The key for a template is `{prefix}{NAME}{suffix}` for the default
/// language and `{prefix}{NAME}--{LANGUAGE}{suffix}` otherwise, with name and
/// language uppercased. Empty variables count as missing.
///
/// # Example
///
/// ```
/// use descript::{EnvTemplateSource, TemplateSource};
///
/// let source = EnvTemplateSource::default();
/// assert_eq!(source.key("minlen", ""), "CTOR_ENSURE_MINLEN_DESC");
/// assert_eq!(source.key("minlen", "de"), "CTOR_ENSURE_MINLEN--DE_DESC");
///
/// let custom = EnvTemplateSource::builder().prefix("APP_").suffix("").build();
/// assert_eq!(custom.key("greeting", ""), "APP_GREETING");
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct EnvTemplateSource {
    #[builder(default = "CTOR_ENSURE_".to_string())]
    prefix: String,

    #[builder(default = "_DESC".to_string())]
    suffix: String,
}

impl Default for EnvTemplateSource {
    fn default() -> Self {
        EnvTemplateSource::builder().build()
    }
}

const LANGUAGE_SEPARATOR: &str = "--";

impl EnvTemplateSource {
    /// Variable name prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Variable name suffix.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Collect every matching, non-empty variable into a catalog.
    ///
    /// Language suffixes are lowercased, so `..._MINLEN--DE_DESC` becomes the
    /// `de` entry of `MINLEN`.
    pub fn to_catalog(&self) -> TemplateCatalog {
        let mut catalog = TemplateCatalog::new();
        for (key, raw) in env::vars_os() {
            let (Ok(key), Ok(raw)) = (key.into_string(), raw.into_string()) else {
                continue;
            };
            let Some(stem) = self.stem(&key) else {
                continue;
            };
            if raw.is_empty() {
                continue;
            }
            match stem.split_once(LANGUAGE_SEPARATOR) {
                Some((name, language)) => catalog.insert(name, language.to_lowercase(), raw),
                None => catalog.insert(stem, "", raw),
            }
        }
        catalog
    }

    /// The part of `key` between prefix and suffix, if it is non-empty.
    fn stem<'k>(&self, key: &'k str) -> Option<&'k str> {
        key.strip_prefix(&self.prefix)?
            .strip_suffix(&self.suffix)
            .filter(|stem| !stem.is_empty())
    }
}

impl TemplateSource for EnvTemplateSource {
    fn lookup(&self, name: &str, language: &str) -> Option<String> {
        env::var(self.key(name, language))
            .ok()
            .filter(|raw| !raw.is_empty())
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = env::vars_os()
            .filter_map(|(key, _)| {
                let key = key.into_string().ok()?;
                let name = self.stem(&key)?;
                (!name.contains(LANGUAGE_SEPARATOR)).then(|| name.to_string())
            })
            .collect();
        names.sort();
        names
    }

    fn normalize_name(&self, name: &str) -> String {
        name.to_uppercase()
    }

    fn key(&self, name: &str, language: &str) -> String {
        let name = self.normalize_name(name);
        if language.is_empty() {
            format!("{}{name}{}", self.prefix, self.suffix)
        } else {
            format!(
                "{}{name}{LANGUAGE_SEPARATOR}{}{}",
                self.prefix,
                language.to_uppercase(),
                self.suffix
            )
        }
    }
}
