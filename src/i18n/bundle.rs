//! Translation bundle: per-language key/value sections plus metadata.

use crate::error::BundleError;
use crate::i18n::metadata::{Metadata, META_KEY};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Values of one language section. `None` marks an explicit `null`.
pub type Section = HashMap<String, Option<String>>;

/// An immutable translation bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationBundle {
    sections: HashMap<String, Section>,
    metadata: Metadata,
}

impl TranslationBundle {
    /// Parse a bundle from its JSON text.
    pub fn from_json(text: &str) -> Result<Self, BundleError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Build a bundle from a parsed JSON document.
    ///
    /// The document must be an object. `_meta` becomes [`Metadata`]; every
    /// other object-valued entry becomes a language section. Entries that are
    /// not objects contribute nothing.
    pub fn from_value(value: Value) -> Result<Self, BundleError> {
        let mut root = match value {
            Value::Object(root) => root,
            other => return Err(BundleError::NotAnObject(json_type_name(&other))),
        };

        let metadata = Metadata::from_value(root.remove(META_KEY).as_ref());

        let sections = root
            .into_iter()
            .filter_map(|(lang, section)| match section {
                Value::Object(entries) => Some((lang, parse_section(entries))),
                _ => None,
            })
            .collect();

        Ok(Self { sections, metadata })
    }

    /// Bundle metadata (defaults applied).
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The section for a language, if the bundle has one.
    pub fn section(&self, lang: &str) -> Option<&Section> {
        self.sections.get(lang)
    }

    /// Non-null value for `key` in `lang`.
    ///
    /// Returns `None` when the section is missing, the key is missing, or the
    /// value is `null`. An empty string is a real value.
    pub fn value(&self, lang: &str, key: &str) -> Option<&str> {
        self.sections.get(lang)?.get(key)?.as_deref()
    }

    /// Language codes that have a section, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = self.sections.keys().map(String::as_str).collect();
        langs.sort_unstable();
        langs
    }

    /// Every key that appears in any section, sorted and deduplicated.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .sections
            .values()
            .flat_map(|section| section.keys().map(String::as_str))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }
}

fn parse_section(entries: Map<String, Value>) -> Section {
    entries
        .into_iter()
        .map(|(key, value)| (key, coerce_value(value)))
        .collect()
}

/// Render a JSON value the way the page would display it.
///
/// Strings are used verbatim, `null` is "missing", everything else is shown
/// as its compact JSON text.
fn coerce_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
